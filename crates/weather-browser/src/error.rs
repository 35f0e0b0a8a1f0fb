//! Error types for browser sessions.
//!
//! Launch and connection problems, navigation failures, missing elements and
//! expired waits are separate variants so callers can tell "the page never got
//! there" apart from "the page got there and showed the wrong thing".

use std::time::Duration;
use thiserror::Error;

/// The main error type for all browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// Usually Chrome/Chromium is not installed, the configured executable
    /// does not exist, or the process could not start.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The DevTools connection failed or a CDP command was rejected.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A local page path could not be expressed as a `file://` URL.
    #[error("cannot build a file URL for '{0}'")]
    InvalidUrl(String),

    /// No element matched the selector.
    #[error("no element matches selector '{selector}'")]
    ElementNotFound {
        /// The CSS selector that matched nothing
        selector: String,
    },

    /// A wait condition was not satisfied within the timeout.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed, or its result had
    /// an unexpected shape.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// File system errors (profile directories, local page paths).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowserError {
    /// Returns true for failures caused by the page state never materializing
    /// (missing element or expired wait), as opposed to infrastructure errors.
    #[must_use]
    pub fn is_page_state(&self) -> bool {
        matches!(
            self,
            BrowserError::ElementNotFound { .. } | BrowserError::WaitTimeout { .. }
        )
    }
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_state_classification() {
        let missing = BrowserError::ElementNotFound {
            selector: "#temp".into(),
        };
        let timeout = BrowserError::WaitTimeout {
            condition: "selector '#city'".into(),
            timeout: Duration::from_secs(10),
        };
        assert!(missing.is_page_state());
        assert!(timeout.is_page_state());
        assert!(!BrowserError::AlreadyClosed.is_page_state());
    }

    #[test]
    fn timeout_message_names_condition() {
        let err = BrowserError::WaitTimeout {
            condition: "javascript dialog".into(),
            timeout: Duration::from_secs(3),
        };
        assert_eq!(
            err.to_string(),
            "wait condition 'javascript dialog' timed out after 3s"
        );
    }
}
