//! Error handling for typeahead.
//!
//! This module provides:
//! - [`Error`]: The main error enum for all typeahead operations
//! - [`Result`]: Result alias used throughout the crate
//!
//! Expected-but-uninteresting states (empty query, unknown list) are *not*
//! errors; they surface as `None` sentinels from the query API instead, since
//! they occur on essentially every keystroke of normal use.

use std::io;

use thiserror::Error;

/// Main error type for typeahead operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("pattern too long: {len} chars exceeds the {max}-bit match word")]
    PatternTooLong { len: usize, max: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
