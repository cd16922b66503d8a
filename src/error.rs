//! Error types for filebay
//!
//! Provides a unified error type for all operations, plus the
//! errno-to-text rendering used when a server reports a failure code.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using FilebayError
pub type Result<T> = std::result::Result<T, FilebayError>;

/// Unified error type for filebay operations
#[derive(Debug, Error)]
pub enum FilebayError {
    // -------------------------------------------------------------------------
    // Transport Errors (session-fatal)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Exchange Errors (command-level, recoverable)
    // -------------------------------------------------------------------------
    /// The server answered with something other than the expected
    /// success tag; `code` is the error code it reported.
    #[error("{op} '{target}': {reason}")]
    Remote {
        op: &'static str,
        target: String,
        code: u32,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Local Errors (recoverable)
    // -------------------------------------------------------------------------
    /// Local filesystem failure, distinct from transport I/O.
    #[error("{file}: {source}", file = .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid filename: {0}")]
    FileName(String),

    #[error("{0}: invalid command")]
    InvalidCommand(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FilebayError {
    /// Build a `Remote` error from a failure code, rendering the
    /// human-readable reason up front.
    pub fn remote(op: &'static str, target: impl Into<String>, code: u32) -> Self {
        FilebayError::Remote {
            op,
            target: target.into(),
            code,
            reason: describe_error_code(code),
        }
    }

    /// Whether this error must unwind the whole session.
    ///
    /// Transport and framing failures leave the stream unusable; every
    /// other error fails one command and the session continues.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FilebayError::Io(_) | FilebayError::Protocol(_))
    }
}

/// Render a numeric error code reported by the server as
/// human-readable text.
pub fn describe_error_code(code: u32) -> String {
    std::io::Error::from_raw_os_error(code as i32).to_string()
}
