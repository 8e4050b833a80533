//! Word frequencies for the dashboard word cloud.
//!
//! Tokenizes the aggregated corpus, drops stopwords (the usual English
//! word-cloud list plus Portuguese function words) and ranks what is left by
//! frequency.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Default number of words returned
pub const DEFAULT_TOP_WORDS: usize = 50;

/// Portuguese stopwords, including the chat contractions seen in the form answers
const STOPWORDS_PT: &[&str] = &[
    "pra", "pro", "tá", "né", "da", "de", "do", "na", "no", "uma", "um", "que", "se", "por",
    "das", "dos", "nas", "nos", "em", "ao", "aos", "à", "às", "e", "ou", "mas", "o", "os", "a",
    "as", "com", "sem", "para", "como", "mais", "muito", "muita", "foi", "ser", "é", "são", "era",
    "está", "estava", "tem", "ter", "eu", "ele", "ela", "nós", "eles", "elas", "me", "meu",
    "minha", "isso", "isto", "esse", "essa", "este", "esta", "aqui", "lá", "já", "também", "só",
    "não", "sim", "bem", "ainda", "quando", "onde", "qual",
];

/// English stopwords (word-cloud default list)
const STOPWORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "nor", "for", "yet", "so", "i", "you", "he", "she", "it",
    "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their",
    "this", "that", "these", "those", "who", "whom", "which", "what", "is", "am", "are", "was",
    "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will", "would",
    "should", "can", "could", "in", "on", "at", "to", "from", "by", "with", "about", "into",
    "of", "up", "down", "out", "off", "over", "under", "here", "there", "where", "when", "why",
    "how", "all", "each", "both", "few", "more", "most", "other", "some", "any", "no", "not",
    "only", "own", "same", "than", "too", "very", "just", "also", "if", "because", "as",
];

// NOTE: expect() is acceptable here, the pattern is a literal
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w[\w']+").expect("Invalid regex: token pattern"));

/// A ranked word of the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequency {
    /// The word, lower-cased
    pub word: String,
    /// Occurrences in the corpus
    pub frequency: usize,
    /// Frequency relative to the most frequent word (0.0 - 1.0)
    pub weight: f32,
}

/// Word-frequency extractor with stopword filtering
pub struct WordFrequencyExtractor {
    stopwords: HashSet<String>,
    min_word_length: usize,
    max_words: usize,
}

impl Default for WordFrequencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl WordFrequencyExtractor {
    /// Create an extractor with default settings
    pub fn new() -> Self {
        Self::with_config(2, DEFAULT_TOP_WORDS)
    }

    /// Create an extractor with custom configuration
    pub fn with_config(min_word_length: usize, max_words: usize) -> Self {
        let stopwords = STOPWORDS_PT
            .iter()
            .chain(STOPWORDS_EN)
            .map(|s| s.to_lowercase())
            .collect();

        Self {
            stopwords,
            min_word_length,
            max_words,
        }
    }

    /// Add extra stopwords (e.g. the event name)
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Tokenize text into lower-cased words, filtering stopwords and numbers
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lower)
            .map(|m| m.as_str().trim_end_matches('\'').to_string())
            .filter(|word| {
                word.chars().count() >= self.min_word_length
                    && !self.is_stopword(word)
                    && !word.chars().all(|c| c.is_numeric())
            })
            .collect()
    }

    /// Extract the top N words of the corpus
    pub fn extract(&self, corpus: &str, top_k: Option<usize>) -> Vec<WordFrequency> {
        let max_results = top_k.unwrap_or(self.max_words);
        let words = self.tokenize(corpus);

        if words.is_empty() {
            return vec![];
        }

        let mut freq: HashMap<String, usize> = HashMap::new();
        for word in words {
            *freq.entry(word).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
        // Most frequent first, alphabetical on ties so output is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let max_frequency = ranked.first().map(|(_, count)| *count).unwrap_or(1) as f32;

        ranked
            .into_iter()
            .take(max_results)
            .map(|(word, frequency)| WordFrequency {
                word,
                frequency,
                weight: frequency as f32 / max_frequency,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_by_frequency() {
        let extractor = WordFrequencyExtractor::new();

        let words = extractor.extract("palestra ótima palestra longa fila fila fila", None);

        assert_eq!(words[0].word, "fila");
        assert_eq!(words[0].frequency, 3);
        assert_eq!(words[0].weight, 1.0);
        assert_eq!(words[1].word, "palestra");
        assert_eq!(words[1].frequency, 2);
    }

    #[test]
    fn test_stopword_filtering() {
        let extractor = WordFrequencyExtractor::new();

        let words = extractor.extract("pra que se por uma de da do né tá the and", Some(5));
        assert!(words.is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let extractor = WordFrequencyExtractor::new();

        assert!(extractor.extract("", Some(5)).is_empty());
        assert!(extractor.extract("   ", Some(5)).is_empty());
    }

    #[test]
    fn test_numbers_and_short_tokens_dropped() {
        let extractor = WordFrequencyExtractor::new();

        let words = extractor.extract("x 2025 18h wifi", None);
        let list: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(list, vec!["18h", "wifi"]);
    }

    #[test]
    fn test_custom_stopwords() {
        let extractor = WordFrequencyExtractor::new().with_stopwords(["Campus", "party"]);

        let words = extractor.extract("Campus Party evento", None);
        let list: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(list, vec!["evento"]);
    }

    #[test]
    fn test_top_k_limit() {
        let extractor = WordFrequencyExtractor::new();

        let words = extractor.extract("alfa beta gama delta", Some(2));
        assert_eq!(words.len(), 2);
    }
}
