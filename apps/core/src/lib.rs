//! Keyword-based sentiment dashboard for Portuguese event feedback.
//!
//! The `sentiment` module is the pure core (classifier, aggregator, word
//! frequencies). `feed`, `dashboard` and `preflight` adapt it to a comment
//! file and the terminal.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod preflight;
pub mod sentiment;

pub use error::AppError;

#[cfg(test)]
mod tests;
