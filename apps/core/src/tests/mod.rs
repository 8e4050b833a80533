//! Test Module
//!
//! Cross-module test suite.
//!
//! ## Test Categories
//! - `sentiment_tests`: classifier properties, custom lexicons, aggregation
//! - `feed_tests`: file formats, refresh cache, environment configuration
//! - `integration_tests`: comment file to rendered dashboard
