//! # Sentiment Module
//!
//! Keyword-lookup sentiment analysis for Portuguese feedback comments.
//! No model, no I/O: every function here is pure over its inputs.
//!
//! ## Components
//! - `lexicon`: versioned positive/negative marker lists
//! - `classifier`: first-match substring classifier
//! - `comment`: boundary types for feed rows
//! - `aggregator`: batch counts, corpus and tail
//! - `keywords`: word frequencies for the word cloud
//! - `action_plan`: follow-up priority per label
//! - `packet` / `analyzer`: single-text analysis

pub mod action_plan;
pub mod aggregator;
pub mod analyzer;
pub mod classifier;
pub mod comment;
pub mod keywords;
pub mod lexicon;
pub mod packet;

pub use action_plan::{ActionPlan, Priority};
pub use aggregator::{
    AggregateReport, ClassifiedComment, LabelShare, SentimentAggregator, DEFAULT_TAIL_SIZE,
};
pub use analyzer::{SentimentAnalyzer, SAMPLE_TEXT};
pub use classifier::{ClassificationResult, SentimentClassifier, SentimentLabel};
pub use comment::{drop_absent, Comment, RawComment};
pub use keywords::{WordFrequency, WordFrequencyExtractor, DEFAULT_TOP_WORDS};
pub use lexicon::Lexicon;
pub use packet::AnalysisPacket;
