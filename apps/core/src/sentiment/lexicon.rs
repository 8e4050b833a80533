//! Sentiment Lexicon - the two marker lists used by the classifier.
//!
//! The built-in lists are static data for Brazilian Portuguese event feedback.
//! A replacement lexicon can be loaded from a versioned JSON file without
//! touching the matching logic.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::AppError;

/// Version tag of the built-in marker lists
pub const BUILTIN_VERSION: &str = "pt-br-feedback/1";

/// Markers signalling a positive comment
const POSITIVE_MARKERS: &[&str] = &[
    "bom",
    "ótimo",
    "excelente",
    "incrível",
    "maravilhoso",
    "adorei",
    "gostei",
    "recomendo",
    "perfeito",
    "fantástico",
    "amei",
    "sucesso",
    "parabéns",
    "top",
    "show",
    "curti",
];

/// Markers signalling a negative comment
const NEGATIVE_MARKERS: &[&str] = &[
    "ruim",
    "péssimo",
    "horrível",
    "terrível",
    "odeio",
    "detestei",
    "lixo",
    "fraude",
    "enganação",
    "não gostei",
    "decepcionado",
    "decepção",
    "frustrante",
    "esperava mais",
    "lamentável",
    "desagradável",
    "deixou a desejar",
    "problema",
    "atraso",
    "quebrado",
    "falha",
    "erro",
    "defeito",
    "complicado",
    "não funciona",
    "fraco",
    "mal feito",
    "desorganizado",
    "confuso",
    "difícil",
    "pouco",
];

// NOTE: expect() is acceptable here, the built-in lists are static data checked by tests
static BUILTIN: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(
        BUILTIN_VERSION,
        POSITIVE_MARKERS.iter().map(|s| s.to_string()).collect(),
        NEGATIVE_MARKERS.iter().map(|s| s.to_string()).collect(),
    )
    .expect("Invalid built-in lexicon")
});

/// Two disjoint, ordered marker lists plus a version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LexiconFile")]
pub struct Lexicon {
    version: String,
    positive: Vec<String>,
    negative: Vec<String>,
}

/// Unchecked on-disk form, validated through [`Lexicon::new`]
#[derive(Deserialize)]
struct LexiconFile {
    version: String,
    positive: Vec<String>,
    negative: Vec<String>,
}

impl TryFrom<LexiconFile> for Lexicon {
    type Error = AppError;

    fn try_from(file: LexiconFile) -> Result<Self, Self::Error> {
        Lexicon::new(file.version, file.positive, file.negative)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl Lexicon {
    /// Builds a lexicon, lower-casing and trimming every marker.
    ///
    /// Fails when a marker is blank (it would match every comment) or when a
    /// marker appears in both lists.
    pub fn new(
        version: impl Into<String>,
        positive: Vec<String>,
        negative: Vec<String>,
    ) -> Result<Self, AppError> {
        let positive = normalize("positive", positive)?;
        let negative = normalize("negative", negative)?;

        let lexicon = Self {
            version: version.into(),
            positive,
            negative,
        };

        let overlap = lexicon.overlap();
        if !overlap.is_empty() {
            return Err(AppError::Validation(format!(
                "lexicon {} has markers in both lists: {}",
                lexicon.version,
                overlap.join(", ")
            )));
        }

        Ok(lexicon)
    }

    /// The built-in Portuguese lexicon
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Parses a lexicon from its JSON form (`{"version", "positive", "negative"}`).
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a lexicon file from disk
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    /// Markers present in both lists, in positive-list order
    pub fn overlap(&self) -> Vec<&str> {
        let negative: HashSet<&str> = self.negative.iter().map(String::as_str).collect();
        self.positive
            .iter()
            .map(String::as_str)
            .filter(|m| negative.contains(m))
            .collect()
    }

    /// Total number of markers across both lists
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn normalize(list: &str, markers: Vec<String>) -> Result<Vec<String>, AppError> {
    markers
        .into_iter()
        .map(|marker| {
            let marker = marker.trim().to_lowercase();
            if marker.is_empty() {
                Err(AppError::Validation(format!(
                    "blank marker in {} list",
                    list
                )))
            } else {
                Ok(marker)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lists_are_disjoint() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.overlap().is_empty());
        assert_eq!(lexicon.positive().len(), 16);
        assert_eq!(lexicon.negative().len(), 31);
        assert_eq!(lexicon.version(), BUILTIN_VERSION);
    }

    #[test]
    fn test_builtin_markers_are_lowercase() {
        let lexicon = Lexicon::builtin();
        for marker in lexicon.positive().iter().chain(lexicon.negative()) {
            assert_eq!(marker, &marker.to_lowercase(), "marker '{}'", marker);
        }
    }

    #[test]
    fn test_overlap_rejected() {
        let result = Lexicon::new(
            "test",
            vec!["bom".to_string(), "legal".to_string()],
            vec!["Legal".to_string()],
        );
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("legal")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_marker_rejected() {
        let result = Lexicon::new("test", vec!["  ".to_string()], vec![]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_markers_normalized() {
        let lexicon = Lexicon::new("test", vec!["  Show ".to_string()], vec!["RUIM".to_string()])
            .unwrap();
        assert_eq!(lexicon.positive(), ["show".to_string()]);
        assert_eq!(lexicon.negative(), ["ruim".to_string()]);
    }

    #[test]
    fn test_from_json() {
        let lexicon = Lexicon::from_json(
            r#"{"version": "custom/2", "positive": ["legal"], "negative": ["chato"]}"#,
        )
        .unwrap();
        assert_eq!(lexicon.version(), "custom/2");
        assert_eq!(lexicon.len(), 2);
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let overlap = serde_json::from_str::<Lexicon>(
            r#"{"version": "x", "positive": ["BOM"], "negative": ["bom"]}"#,
        );
        assert!(overlap.is_err());

        let blank = serde_json::from_str::<Lexicon>(
            r#"{"version": "x", "positive": ["bom", ""], "negative": []}"#,
        );
        assert!(blank.is_err());

        let lexicon: Lexicon = serde_json::from_str(
            r#"{"version": "x", "positive": [" Massa "], "negative": ["CHATO"]}"#,
        )
        .unwrap();
        assert_eq!(lexicon.positive(), ["massa".to_string()]);
        assert_eq!(lexicon.negative(), ["chato".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_overlap() {
        let result = Lexicon::from_json(
            r#"{"version": "x", "positive": ["legal"], "negative": ["legal"]}"#,
        );
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("legal")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
