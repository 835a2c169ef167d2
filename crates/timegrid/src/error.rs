//! Error types for Timegrid operations.
//!
//! The layout pipeline itself never fails; it degrades to segments without
//! rectangles. [`TimeGridError`] covers the fallible edges around it:
//! configuration validation and loading input.

use std::io;

use thiserror::Error;

/// The main error type for Timegrid operations.
#[derive(Debug, Error)]
pub enum TimeGridError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),
}
