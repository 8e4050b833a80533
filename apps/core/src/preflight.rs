//! Preflight Check System
//!
//! Verifies configuration, lexicon and feed before the dashboard starts.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::config::DashboardConfig;
use crate::feed::{CommentSource, FileSource};
use crate::sentiment::{drop_absent, Lexicon};

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub summary: String,
}

impl PreflightReport {
    /// One line per check, for the terminal
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .checks
            .iter()
            .map(|c| {
                let mark = if c.passed { "✅" } else { "❌" };
                match &c.details {
                    Some(details) => format!("{} {}: {} ({})", mark, c.name, c.message, details),
                    None => format!("{} {}: {}", mark, c.name, c.message),
                }
            })
            .collect();
        lines.push(self.summary.clone());
        lines.join("\n")
    }
}

/// Runs every check against `config`
pub fn run_preflight_checks(config: &DashboardConfig) -> PreflightReport {
    info!("Running preflight checks");

    let checks = vec![
        check_config(config),
        check_lexicon(config),
        check_source(config),
    ];

    let failed = checks.iter().filter(|c| !c.passed).count();
    let all_passed = failed == 0;
    let summary = if all_passed {
        format!("All {} checks passed", checks.len())
    } else {
        format!("{} of {} checks failed", failed, checks.len())
    };

    if all_passed {
        info!("{}", summary);
    } else {
        warn!("{}", summary);
    }

    PreflightReport {
        all_passed,
        checks,
        summary,
    }
}

fn check_config(config: &DashboardConfig) -> CheckResult {
    match config.validate() {
        Ok(()) => CheckResult::pass("config", "Configuration is valid"),
        Err(e) => CheckResult::fail("config", "Configuration is invalid", Some(e.to_string())),
    }
}

fn check_lexicon(config: &DashboardConfig) -> CheckResult {
    let loaded = match &config.lexicon {
        Some(path) => Lexicon::load(path),
        None => Ok(Lexicon::builtin().clone()),
    };

    match loaded {
        Ok(lexicon) => CheckResult::pass(
            "lexicon",
            &format!(
                "Lexicon {} loaded ({} positive, {} negative markers)",
                lexicon.version(),
                lexicon.positive().len(),
                lexicon.negative().len()
            ),
        ),
        Err(e) => CheckResult::fail("lexicon", "Lexicon could not be loaded", Some(e.to_string())),
    }
}

fn check_source(config: &DashboardConfig) -> CheckResult {
    let Some(path) = &config.source else {
        return CheckResult::fail(
            "source",
            "No comment feed configured",
            Some("set SENTIMENT_SOURCE or pass --source".to_string()),
        );
    };

    let source = FileSource::new(path, config.format, config.comment_column);
    match source.fetch() {
        Ok(rows) => {
            let total = rows.len();
            let comments = drop_absent(rows).len();
            CheckResult::pass(
                "source",
                &format!(
                    "{} readable: {} comments, {} missing rows",
                    source.name(),
                    comments,
                    total - comments
                ),
            )
        }
        Err(e) => CheckResult::fail("source", "Comment feed unreadable", Some(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_source_fails() {
        let report = run_preflight_checks(&DashboardConfig::default());

        assert!(!report.all_passed);
        let source = report.checks.iter().find(|c| c.name == "source").unwrap();
        assert!(!source.passed);
        assert!(report.checks.iter().find(|c| c.name == "lexicon").unwrap().passed);
        assert_eq!(report.summary, "1 of 3 checks failed");
    }

    #[test]
    fn test_all_checks_pass() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Adorei\n\nPéssimo").unwrap();

        let config = DashboardConfig {
            source: Some(file.path().to_path_buf()),
            ..DashboardConfig::default()
        };

        let report = run_preflight_checks(&config);
        assert!(report.all_passed, "{}", report.render());
        let source = report.checks.iter().find(|c| c.name == "source").unwrap();
        assert!(source.message.contains("2 comments, 1 missing rows"));
    }

    #[test]
    fn test_bad_lexicon_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": "x", "positive": ["bom"], "negative": ["bom"]}}"#
        )
        .unwrap();

        let config = DashboardConfig {
            lexicon: Some(file.path().to_path_buf()),
            ..DashboardConfig::default()
        };

        let report = run_preflight_checks(&config);
        let lexicon = report.checks.iter().find(|c| c.name == "lexicon").unwrap();
        assert!(!lexicon.passed);
        assert!(lexicon.details.as_deref().unwrap_or("").contains("bom"));
    }
}
