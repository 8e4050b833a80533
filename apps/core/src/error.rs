use std::io;
use thiserror::Error;

/// Application-wide error type for everything around the sentiment core.
///
/// The classifier and aggregator themselves never fail; these variants cover
/// the feed loader, configuration and the presentation adapter.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., an overlapping lexicon).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparseable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The comment feed could not be read.
    #[error("Comment source error: {0}")]
    Source(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Source(s) => AppError::Source(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_keeps_message() {
        let err = AppError::Source("planilha indisponível".to_string());
        assert_eq!(err.clone().to_string(), err.to_string());

        let io_err = AppError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(io_err.clone().to_string().contains("missing"));
    }

    #[test]
    fn test_json_error_maps_to_validation() {
        let err: AppError = serde_json::from_str::<Vec<String>>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
