//! Analysis Packet - Output structure for individual comment analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action_plan::ActionPlan;
use super::classifier::{ClassificationResult, SentimentLabel};

/// Everything the individual analyzer page shows for one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPacket {
    /// Original text
    pub text: String,

    /// Label and confidence
    pub result: ClassificationResult,

    /// Suggested follow-up
    pub plan: ActionPlan,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Timestamp of analysis
    pub timestamp: DateTime<Utc>,
}

impl AnalysisPacket {
    pub fn label(&self) -> SentimentLabel {
        self.result.label
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Sentiment: {} ({:.1}%), Marker: {}, Priority: {}",
            self.result.label,
            self.result.confidence * 100.0,
            self.result.matched_marker.as_deref().unwrap_or("-"),
            self.plan.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let packet = AnalysisPacket {
            text: "adorei".to_string(),
            result: ClassificationResult {
                label: SentimentLabel::Positive,
                confidence: 0.95,
                matched_marker: Some("adorei".to_string()),
            },
            plan: ActionPlan::for_label(SentimentLabel::Positive),
            processing_time_ms: 0,
            timestamp: Utc::now(),
        };

        let summary = packet.summary();
        assert!(summary.contains("Positivo"));
        assert!(summary.contains("95.0%"));
        assert!(summary.contains("Baixa"));
    }
}
