//! Unified error type for soxshell.
//!
//! Only failures that stop an invocation from producing an exit code end up
//! here. A tool that runs and exits non-zero is reported through the
//! operation's return value instead.

use std::path::PathBuf;
use std::time::Duration;

/// Unified error type covering all failure modes in soxshell.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tool binary could not be located.
    #[error("{tool} not found: {}", path.display())]
    ToolNotFound {
        /// Name of the tool (e.g. "sox").
        tool: String,
        /// The path that was checked.
        path: PathBuf,
    },

    /// An I/O operation failed, including spawning the process.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An external tool could not be driven to completion.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// Arguments or configuration failed validation. No process was started.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The invocation was cancelled and the child process killed.
    #[error("{tool} cancelled")]
    Cancelled {
        /// Name of the tool that was running.
        tool: String,
    },

    /// The invocation exceeded its timeout and the child process was killed.
    #[error("{tool} timed out after {timeout:?}")]
    TimedOut {
        /// Name of the tool that was running.
        tool: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::ToolNotFound`].
    pub fn tool_not_found(tool: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::ToolNotFound {
            tool: tool.into(),
            path: path.into(),
        }
    }

    /// Whether the invocation was stopped by cancellation or timeout rather
    /// than by a failure of its own.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::Cancelled { .. } | Error::TimedOut { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_display() {
        let err = Error::tool_not_found("sox", "/data/bin/sox");
        assert_eq!(err.to_string(), "sox not found: /data/bin/sox");
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn tool_display() {
        let err = Error::tool("sox", "stdout was not captured");
        assert_eq!(err.to_string(), "Tool error [sox]: stdout was not captured");
    }

    #[test]
    fn validation_display() {
        let err = Error::Validation("invalid fade type: x".into());
        assert_eq!(err.to_string(), "Validation error: invalid fade type: x");
        assert!(!err.is_interrupted());
    }

    #[test]
    fn interruption_variants() {
        let cancelled = Error::Cancelled { tool: "sox".into() };
        assert_eq!(cancelled.to_string(), "sox cancelled");
        assert!(cancelled.is_interrupted());

        let timed_out = Error::TimedOut {
            tool: "sox".into(),
            timeout: Duration::from_millis(100),
        };
        assert_eq!(timed_out.to_string(), "sox timed out after 100ms");
        assert!(timed_out.is_interrupted());
    }

    #[test]
    fn internal_display() {
        let err = Error::Internal("unexpected state".into());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
    }
}
