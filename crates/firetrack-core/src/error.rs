//! Error types for firetrack
//!
//! This module defines the error types used throughout the firetrack library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! The CSV parser and the statistics aggregator never fail; errors only
//! arise at the edges (reading files, decoding project exports, validating
//! manual input).
//!
//! # Example
//!
//! ```
//! use firetrack_core::error::{FiretrackError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to FiretrackError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for firetrack operations
#[derive(Error, Debug)]
pub enum FiretrackError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// No project data file could be located
    #[error("No project data file found (set FIRETRACK_DATA_PATH or pass --data)")]
    NoDataFile,

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested project id is not in the collection
    #[error("Project not found: {0}")]
    ProjectNotFound(String),
}

/// Convenience type alias for Results in firetrack
///
/// # Example
///
/// ```
/// use firetrack_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, FiretrackError>;
