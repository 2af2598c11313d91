//! Result and error types for Cafetera.

use thiserror::Error;

/// Result type for Cafetera operations
pub type CafeteraResult<T> = Result<T, CafeteraError>;

/// Errors that can occur while driving the coffee-cart application
#[derive(Debug, Error)]
pub enum CafeteraError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Target selector matched zero nodes
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Locator description (strategy + selector)
        locator: String,
    },

    /// A wait condition never became true within its budget
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// A previously resolved node no longer corresponds to a live DOM node
    #[error("Stale element reference: {detail}")]
    StaleElement {
        /// What was being accessed
        detail: String,
    },

    /// Script evaluation error
    #[error("Script evaluation failed: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// Text could not be parsed into a typed value
    #[error("Failed to parse {what} from {input:?}")]
    Parse {
        /// What was being parsed (price, quantity, ...)
        what: &'static str,
        /// The offending input
        input: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Test-level expectation mismatch, always fatal to the test case
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV fixture error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CafeteraError {
    /// True when the error means "the element is legitimately absent",
    /// which optional lookups translate into `None` rather than a failure.
    #[must_use]
    pub const fn is_absence(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. } | Self::Timeout { .. })
    }

    /// True for a stale node reference, the one condition retried by the
    /// centralized resolver.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::StaleElement { .. })
    }
}
