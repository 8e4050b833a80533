//! Comment types at the boundary between the feed and the core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One feedback submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment(String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// True for empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Comment {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Comment {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// A row as delivered by a comment source, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawComment {
    Text(String),
    /// Missing cell or `null`
    Absent,
}

impl RawComment {
    /// Validates the row once. Absent rows and exactly-empty text are dropped;
    /// whitespace-only text is kept and classifies as undefined.
    pub fn into_comment(self) -> Option<Comment> {
        match self {
            RawComment::Text(text) if !text.is_empty() => Some(Comment(text)),
            RawComment::Text(_) | RawComment::Absent => None,
        }
    }
}

impl From<Option<String>> for RawComment {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawComment::Absent, RawComment::Text)
    }
}

/// Keeps the rows that carry text, in arrival order.
pub fn drop_absent<I>(rows: I) -> Vec<Comment>
where
    I: IntoIterator<Item = RawComment>,
{
    rows.into_iter().filter_map(RawComment::into_comment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_absent_keeps_order() {
        let rows = vec![
            RawComment::Text("primeiro".to_string()),
            RawComment::Absent,
            RawComment::Text(String::new()),
            RawComment::Text("   ".to_string()),
            RawComment::Text("último".to_string()),
        ];

        let comments = drop_absent(rows);
        let texts: Vec<&str> = comments.iter().map(Comment::text).collect();
        assert_eq!(texts, vec!["primeiro", "   ", "último"]);
    }

    #[test]
    fn test_blank_detection() {
        assert!(Comment::new(" \t").is_blank());
        assert!(!Comment::new("ok").is_blank());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(RawComment::from(None), RawComment::Absent);
        assert_eq!(
            RawComment::from(Some("x".to_string())),
            RawComment::Text("x".to_string())
        );
    }
}
