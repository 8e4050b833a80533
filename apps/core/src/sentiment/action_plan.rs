//! Suggested follow-up for a classified comment.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::classifier::SentimentLabel;

/// Follow-up priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Baixa",
            Priority::Medium => "Média",
            Priority::High => "Alta",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Priority and recommendation for a sentiment label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub priority: Priority,
    pub recommendation: String,
}

impl ActionPlan {
    pub fn for_label(label: SentimentLabel) -> Self {
        let (priority, recommendation) = match label {
            SentimentLabel::Positive => (Priority::Low, "Agradecer o feedback."),
            SentimentLabel::Negative => {
                (Priority::High, "Contacto urgente, analisar causa raiz.")
            }
            SentimentLabel::Neutral | SentimentLabel::Undefined => {
                (Priority::Medium, "Monitorizar a conversa.")
            }
        };

        Self {
            priority,
            recommendation: recommendation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plans_by_label() {
        let plan = ActionPlan::for_label(SentimentLabel::Negative);
        assert_eq!(plan.priority, Priority::High);
        assert!(plan.recommendation.contains("causa raiz"));

        assert_eq!(ActionPlan::for_label(SentimentLabel::Positive).priority, Priority::Low);
        assert_eq!(ActionPlan::for_label(SentimentLabel::Neutral).priority, Priority::Medium);
        assert_eq!(
            ActionPlan::for_label(SentimentLabel::Undefined),
            ActionPlan::for_label(SentimentLabel::Neutral)
        );
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(Priority::High.to_string(), "Alta");
        assert_eq!(Priority::Medium.label(), "Média");
        assert!(Priority::High > Priority::Low);
    }
}
