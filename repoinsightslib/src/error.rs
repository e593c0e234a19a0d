//! Error types for repoinsightslib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while collecting repository insights
#[derive(Error, Debug)]
pub enum InsightsError {
    /// A history query could not be executed or exited unsuccessfully
    #[error("git {command} failed: {message}")]
    Query { command: String, message: String },

    /// A history query produced more output than the configured buffer allows
    #[error("git {command} produced more than {limit} bytes of output")]
    OutputTooLarge { command: String, limit: usize },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Path is not inside a git work tree
    #[error("not a git repository (or no work tree): {0}")]
    NotARepository(PathBuf),

    /// A dependency manifest exists but could not be parsed
    #[error("failed to parse manifest '{path}': {message}")]
    Manifest { path: PathBuf, message: String },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
