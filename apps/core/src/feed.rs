//! Comment Feed
//!
//! Loads raw comment rows from an exported response sheet and keeps the last
//! successful load for a fixed lifetime, like the dashboard's 60 second refresh.
//! Rows are validated here, once, before anything reaches the classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::sentiment::{drop_absent, Comment, RawComment};

/// Layout of a feed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// One comment per line
    Lines,
    /// Tab-separated sheet export with a header row
    Tsv,
    /// JSON array of strings, nulls or cell arrays
    Json,
}

impl FromStr for FeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" | "txt" => Ok(FeedFormat::Lines),
            "tsv" => Ok(FeedFormat::Tsv),
            "json" => Ok(FeedFormat::Json),
            other => Err(format!(
                "unknown feed format '{}' (expected lines, tsv or json)",
                other
            )),
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedFormat::Lines => "lines",
            FeedFormat::Tsv => "tsv",
            FeedFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Anything that can hand over the current rows of the comment feed.
pub trait CommentSource {
    /// Fetch every row, in arrival order
    fn fetch(&self) -> Result<Vec<RawComment>, AppError>;

    /// Human-readable origin, used in logs and views
    fn name(&self) -> String;
}

/// Feed backed by a file exported from the response sheet
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: FeedFormat,
    column: usize,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, format: FeedFormat, column: usize) -> Self {
        Self {
            path: path.into(),
            format,
            column,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CommentSource for FileSource {
    fn fetch(&self) -> Result<Vec<RawComment>, AppError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Source(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        let rows = match self.format {
            FeedFormat::Lines => Ok(parse_lines(&content)),
            FeedFormat::Tsv => parse_tsv(&content, self.column),
            FeedFormat::Json => parse_json(&content, self.column),
        }
        .map_err(|e| AppError::Source(format!("invalid feed {}: {}", self.path.display(), e)))?;

        debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    fn name(&self) -> String {
        format!("{} ({})", self.path.display(), self.format)
    }
}

/// In-memory feed, for direct input and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<RawComment>,
}

impl StaticSource {
    pub fn new(rows: Vec<RawComment>) -> Self {
        Self { rows }
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(|t| RawComment::Text(t.into())).collect())
    }
}

impl CommentSource for StaticSource {
    fn fetch(&self) -> Result<Vec<RawComment>, AppError> {
        Ok(self.rows.clone())
    }

    fn name(&self) -> String {
        "memory".to_string()
    }
}

/// Blank lines count as missing rows.
pub fn parse_lines(content: &str) -> Vec<RawComment> {
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                RawComment::Absent
            } else {
                RawComment::Text(line.to_string())
            }
        })
        .collect()
}

/// Skips the header row and takes cell `column` of every other row.
///
/// Quoted cells may span several lines; a short row or an empty cell is a
/// missing comment.
pub fn parse_tsv(content: &str, column: usize) -> Result<Vec<RawComment>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| AppError::Source(format!("bad tsv row: {}", e)))?;
            Ok(record
                .get(column)
                .filter(|cell| !cell.is_empty())
                .map_or(RawComment::Absent, |cell| RawComment::Text(cell.to_string())))
        })
        .collect()
}

/// Accepts `["texto", null, ["2025-06-01 10:00", "texto"]]`.
pub fn parse_json(content: &str, column: usize) -> Result<Vec<RawComment>, AppError> {
    let rows: Vec<Value> = serde_json::from_str(content)?;

    rows.into_iter()
        .map(|row| match row {
            Value::String(text) => Ok(RawComment::Text(text)),
            Value::Null => Ok(RawComment::Absent),
            Value::Array(cells) => Ok(match cells.into_iter().nth(column) {
                Some(Value::String(text)) => RawComment::Text(text),
                Some(Value::Null) | None => RawComment::Absent,
                Some(other) => RawComment::Text(other.to_string()),
            }),
            other => Err(AppError::Validation(format!(
                "unsupported row in comment feed: {}",
                other
            ))),
        })
        .collect()
}

/// Validated comments of one successful fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub comments: Vec<Comment>,
    /// Rows dropped as missing
    pub dropped: usize,
    pub fetched_at: DateTime<Utc>,
}

/// Caches the last successful fetch of a [`CommentSource`] for `ttl`.
///
/// Failed fetches are never cached, the next call retries.
pub struct CachedFeed<S> {
    source: S,
    ttl: Duration,
    cached: Option<(Instant, FeedSnapshot)>,
}

impl<S: CommentSource> CachedFeed<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cached: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// True when there is no snapshot or it outlived the TTL
    pub fn is_stale(&self) -> bool {
        match &self.cached {
            Some((loaded_at, _)) => loaded_at.elapsed() >= self.ttl,
            None => true,
        }
    }

    /// Drops the cached snapshot so the next load hits the source
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            info!("Comment cache cleared for {}", self.source.name());
        }
    }

    /// Returns the cached snapshot, reloading it first when stale
    pub fn load(&mut self) -> Result<&FeedSnapshot, AppError> {
        if self.is_stale() {
            let rows = self.source.fetch().inspect_err(|e| {
                warn!("Failed to load comments from {}: {}", self.source.name(), e);
            })?;

            let total = rows.len();
            let comments = drop_absent(rows);
            let dropped = total - comments.len();

            info!(
                "Loaded {} comments from {} ({} missing rows dropped)",
                comments.len(),
                self.source.name(),
                dropped
            );

            self.cached = Some((
                Instant::now(),
                FeedSnapshot {
                    comments,
                    dropped,
                    fetched_at: Utc::now(),
                },
            ));
        }

        self.cached
            .as_ref()
            .map(|(_, snapshot)| snapshot)
            .ok_or_else(|| AppError::Internal("comment cache empty after load".to_string()))
    }
}
