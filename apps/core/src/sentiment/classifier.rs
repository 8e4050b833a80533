//! Sentiment classification by marker lookup.
//!
//! First match wins: positive markers are checked before negative ones and the
//! confidence is a fixed constant per branch. Markers match as plain
//! substrings of the lower-cased comment, so a marker buried inside a longer
//! word still counts.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::lexicon::Lexicon;

/// Confidence reported when a positive marker matched
pub const POSITIVE_CONFIDENCE: f32 = 0.95;
/// Confidence reported when only a negative marker matched
pub const NEGATIVE_CONFIDENCE: f32 = 0.92;
/// Confidence reported when no marker matched
pub const NEUTRAL_CONFIDENCE: f32 = 0.85;
/// Confidence reported for blank input
pub const UNDEFINED_CONFIDENCE: f32 = 0.0;

/// Sentiment category of a comment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    /// Blank input
    Undefined,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl SentimentLabel {
    /// Every label, in precedence order
    pub const ALL: [SentimentLabel; 4] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Undefined,
    ];

    /// Portuguese name shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positivo",
            SentimentLabel::Negative => "Negativo",
            SentimentLabel::Neutral => "Neutro",
            SentimentLabel::Undefined => "Indefinido",
        }
    }
}

/// Result of classifying one comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Detected sentiment
    pub label: SentimentLabel,
    /// Fixed per-branch confidence (0.0 - 1.0)
    pub confidence: f32,
    /// Marker that decided the label, if any
    pub matched_marker: Option<String>,
}

impl ClassificationResult {
    fn new(label: SentimentLabel, confidence: f32, matched_marker: Option<&str>) -> Self {
        Self {
            label,
            confidence,
            matched_marker: matched_marker.map(str::to_string),
        }
    }
}

/// Marker-lookup classifier over a [`Lexicon`]
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    lexicon: Lexicon,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentClassifier {
    /// Create a classifier over the built-in lexicon
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::builtin().clone())
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Classify a single comment
    pub fn classify(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::new(
                SentimentLabel::Undefined,
                UNDEFINED_CONFIDENCE,
                None,
            );
        }

        let text = text.to_lowercase();

        let result = if let Some(marker) = find_marker(&text, self.lexicon.positive()) {
            ClassificationResult::new(SentimentLabel::Positive, POSITIVE_CONFIDENCE, Some(marker))
        } else if let Some(marker) = find_marker(&text, self.lexicon.negative()) {
            ClassificationResult::new(SentimentLabel::Negative, NEGATIVE_CONFIDENCE, Some(marker))
        } else {
            ClassificationResult::new(SentimentLabel::Neutral, NEUTRAL_CONFIDENCE, None)
        };

        debug!(
            label = %result.label,
            marker = ?result.matched_marker,
            "classified comment"
        );

        result
    }
}

fn find_marker<'a>(text: &str, markers: &'a [String]) -> Option<&'a str> {
    markers
        .iter()
        .map(String::as_str)
        .find(|marker| text.contains(marker))
}
