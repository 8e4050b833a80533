use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};
use validator::Validate;

use crate::error::AppError;
use crate::feed::FeedFormat;
use crate::sentiment::{DEFAULT_TAIL_SIZE, DEFAULT_TOP_WORDS};

/// Seconds a fetched feed stays fresh before the next reload.
pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Column holding the comment in a form export (column 0 is the timestamp).
pub const DEFAULT_COMMENT_COLUMN: usize = 1;

/// Runtime configuration of the dashboard adapter.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct DashboardConfig {
    /// Feed file with the comments. `None` means no feed is configured.
    pub source: Option<PathBuf>,
    /// Layout of the feed file.
    pub format: FeedFormat,
    /// Zero-based column index of the comment in `tsv` and `json` row feeds.
    #[validate(range(max = 255))]
    pub comment_column: usize,
    /// Number of recent comments listed under the charts.
    #[validate(range(min = 1, max = 1000))]
    pub tail_size: usize,
    /// Cache lifetime of a fetched feed, in seconds.
    #[validate(range(min = 1, max = 86400))]
    pub refresh_secs: u64,
    /// Number of words kept for the word cloud.
    #[validate(range(min = 1, max = 500))]
    pub top_words: usize,
    /// Optional JSON lexicon replacing the built-in marker lists.
    pub lexicon: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: None,
            format: FeedFormat::Lines,
            comment_column: DEFAULT_COMMENT_COLUMN,
            tail_size: DEFAULT_TAIL_SIZE,
            refresh_secs: DEFAULT_REFRESH_SECS,
            top_words: DEFAULT_TOP_WORDS,
            lexicon: None,
        }
    }
}

impl DashboardConfig {
    /// Loads `.env` (if any) and reads the `SENTIMENT_*` variables over the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        if dotenv::dotenv().is_err() {
            debug!(".env file not found, using environment variables and defaults");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            source: env_path(&lookup, "SENTIMENT_SOURCE"),
            format: env_or(&lookup, "SENTIMENT_FORMAT", defaults.format)?,
            comment_column: env_or(&lookup, "SENTIMENT_COLUMN", defaults.comment_column)?,
            tail_size: env_or(&lookup, "SENTIMENT_TAIL_SIZE", defaults.tail_size)?,
            refresh_secs: env_or(&lookup, "SENTIMENT_REFRESH_SECS", defaults.refresh_secs)?,
            top_words: env_or(&lookup, "SENTIMENT_TOP_WORDS", defaults.top_words)?,
            lexicon: env_path(&lookup, "SENTIMENT_LEXICON"),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

// Values may carry trailing `# comments` from the .env file.
fn strip_comment(raw: &str) -> &str {
    raw.split('#').next().unwrap_or("").trim()
}

fn env_path<F>(lookup: &F, key: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| strip_comment(&raw).to_string())
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

fn env_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let clean = strip_comment(&raw);
    if clean.is_empty() {
        warn!("Config: {} is empty, using default", key);
        return Ok(default);
    }

    clean
        .parse::<T>()
        .map_err(|e| AppError::Config(format!("{} = '{}': {}", key, clean, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tail_size, 10);
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("SENTIMENT_SOURCE", "respostas.tsv"),
            ("SENTIMENT_FORMAT", "tsv"),
            ("SENTIMENT_TAIL_SIZE", "5 # últimos cinco"),
            ("SENTIMENT_REFRESH_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.source, Some(PathBuf::from("respostas.tsv")));
        assert_eq!(config.format, FeedFormat::Tsv);
        assert_eq!(config.tail_size, 5);
        assert_eq!(config.refresh_secs, 30);
        assert_eq!(config.top_words, DEFAULT_TOP_WORDS);
    }

    #[test]
    fn test_path_values_drop_trailing_comments() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("SENTIMENT_SOURCE", "respostas.tsv   # export do formulário"),
            ("SENTIMENT_LEXICON", "lexico.json#gírias"),
        ]))
        .unwrap();

        assert_eq!(config.source, Some(PathBuf::from("respostas.tsv")));
        assert_eq!(config.lexicon, Some(PathBuf::from("lexico.json")));

        let config =
            DashboardConfig::from_lookup(lookup_from(&[("SENTIMENT_SOURCE", "  # sem fonte")]))
                .unwrap();
        assert_eq!(config.source, None);
    }

    #[test]
    fn test_unparseable_value_is_config_error() {
        let result = DashboardConfig::from_lookup(lookup_from(&[("SENTIMENT_TAIL_SIZE", "dez")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_out_of_range_is_validation_error() {
        let result = DashboardConfig::from_lookup(lookup_from(&[("SENTIMENT_REFRESH_SECS", "0")]));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
