//! Batch aggregation of classified comments.
//!
//! Produces label counts, the joined corpus for word frequencies and the tail
//! of the most recent comments. Every pass rebuilds the report from scratch.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::classifier::{ClassificationResult, SentimentClassifier, SentimentLabel};
use super::comment::Comment;

/// Number of recent comments kept when no size is given
pub const DEFAULT_TAIL_SIZE: usize = 10;

/// A comment together with its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedComment {
    pub comment: Comment,
    pub result: ClassificationResult,
}

/// One slice of the label distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub label: SentimentLabel,
    pub count: usize,
    /// Percentage of the total (0.0 - 100.0)
    pub percent: f64,
}

/// Aggregate view over a batch of comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Count per label, zero entries included
    pub counts: BTreeMap<SentimentLabel, usize>,
    /// Number of comments aggregated
    pub total: usize,
    /// Space-joined texts of every comment
    pub corpus: String,
    /// Most recent comments, oldest first
    pub tail: Vec<ClassifiedComment>,
}

impl AggregateReport {
    fn empty() -> Self {
        Self {
            counts: SentimentLabel::ALL.iter().map(|label| (*label, 0)).collect(),
            total: 0,
            corpus: String::new(),
            tail: Vec::new(),
        }
    }

    /// Count for a label, zero when it never occurred
    pub fn count(&self, label: SentimentLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Percentage of comments carrying `label`
    pub fn share(&self, label: SentimentLabel) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(label) as f64 * 100.0 / self.total as f64
    }

    /// Non-zero labels, most frequent first
    pub fn distribution(&self) -> Vec<LabelShare> {
        let mut shares: Vec<LabelShare> = SentimentLabel::ALL
            .iter()
            .filter(|label| self.count(**label) > 0)
            .map(|label| LabelShare {
                label: *label,
                count: self.count(*label),
                percent: self.share(*label),
            })
            .collect();

        // Stable sort keeps label order on ties
        shares.sort_by(|a, b| b.count.cmp(&a.count));
        shares
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Folds classifier results over a batch of comments
#[derive(Debug, Clone, Default)]
pub struct SentimentAggregator {
    classifier: SentimentClassifier,
}

impl SentimentAggregator {
    pub fn new(classifier: SentimentClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    /// Aggregate `comments` (arrival order), keeping the last `tail_size` in the tail.
    pub fn aggregate(&self, comments: &[Comment], tail_size: usize) -> AggregateReport {
        let mut report = AggregateReport::empty();
        let tail_start = comments.len().saturating_sub(tail_size);

        for (index, comment) in comments.iter().enumerate() {
            let result = self.classifier.classify(comment.text());
            *report.counts.entry(result.label).or_insert(0) += 1;

            if index >= tail_start {
                report.tail.push(ClassifiedComment {
                    comment: comment.clone(),
                    result,
                });
            }
        }

        report.total = comments.len();
        if !comments.iter().all(Comment::is_blank) {
            report.corpus = comments
                .iter()
                .map(Comment::text)
                .collect::<Vec<_>>()
                .join(" ");
        }

        report
    }
}
