//! Error types for Pressmark.
//!
//! Library crates use [`PressmarkError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Pressmark operations.
#[derive(Debug, thiserror::Error)]
pub enum PressmarkError {
    /// Configuration loading or registry construction error
    /// (duplicate collection, malformed TOML). Fatal at process start.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error during bookmark capture. Covers transport
    /// failures and non-success status codes alike; always fatal, never
    /// retried, and no file is written afterwards.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// A content file could not be parsed (malformed JSON record or
    /// front-matter).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error (collection directory missing or unwritable).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// One or more records violate their collection's schema. The message
    /// enumerates every violating file and field, not just the first.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PressmarkError>;

impl PressmarkError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PressmarkError::config("collection 'blog' registered twice");
        assert_eq!(
            err.to_string(),
            "config error: collection 'blog' registered twice"
        );

        let err = PressmarkError::Fetch("https://example.com: connection refused".into());
        assert!(err.to_string().contains("connection refused"));

        let err = PressmarkError::validation("bookmarks/x.json: missing field `url`");
        assert!(err.to_string().contains("missing field `url`"));
    }
}
