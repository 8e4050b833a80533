//! Sentiment Analyzer - orchestrator for single-text analysis.
//!
//! Runs the classifier, attaches the action plan and timing.

use chrono::Utc;
use std::time::Instant;
use tracing::info;

use super::action_plan::ActionPlan;
use super::classifier::SentimentClassifier;
use super::packet::AnalysisPacket;

/// Text pre-filled on the individual analyzer page
pub const SAMPLE_TEXT: &str =
    "A Campus Party Weekend Piauí é um evento incrível, mal posso esperar!";

/// Individual-analysis orchestrator
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer {
    classifier: SentimentClassifier,
}

impl SentimentAnalyzer {
    pub fn new(classifier: SentimentClassifier) -> Self {
        Self { classifier }
    }

    /// Analyze a text and produce an analysis packet
    pub fn analyze(&self, text: &str) -> AnalysisPacket {
        let start = Instant::now();

        let result = self.classifier.classify(text);
        let plan = ActionPlan::for_label(result.label);

        let packet = AnalysisPacket {
            text: text.to_string(),
            result,
            plan,
            processing_time_ms: start.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        };

        info!("{}", packet.summary());
        packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::action_plan::Priority;
    use crate::sentiment::classifier::SentimentLabel;

    #[test]
    fn test_sample_text_is_positive() {
        let analyzer = SentimentAnalyzer::default();

        let packet = analyzer.analyze(SAMPLE_TEXT);
        assert_eq!(packet.label(), SentimentLabel::Positive);
        assert_eq!(packet.result.matched_marker.as_deref(), Some("incrível"));
        assert_eq!(packet.plan.priority, Priority::Low);
        assert_eq!(packet.text, SAMPLE_TEXT);
    }

    #[test]
    fn test_negative_gets_high_priority() {
        let analyzer = SentimentAnalyzer::default();

        let packet = analyzer.analyze("A internet estava com falha o dia todo");
        assert_eq!(packet.label(), SentimentLabel::Negative);
        assert_eq!(packet.plan.priority, Priority::High);
    }

    #[test]
    fn test_blank_text() {
        let analyzer = SentimentAnalyzer::default();

        let packet = analyzer.analyze("  ");
        assert_eq!(packet.label(), SentimentLabel::Undefined);
        assert_eq!(packet.result.confidence, 0.0);
        assert_eq!(packet.plan.priority, Priority::Medium);
    }
}
