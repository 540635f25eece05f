//! Result and error types for storecheck.

use thiserror::Error;

/// Result type for storecheck operations
pub type ShopResult<T> = Result<T, ShopError>;

/// Errors that can occur while driving the shop
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration file could not be read or parsed
    #[error("Failed to load configuration: {message}")]
    ConfigLoad {
        /// Error message
        message: String,
    },

    /// Section or key absent from the configuration
    #[error("Configuration has no key '{key}' in section [{section}]")]
    MissingSectionOrKey {
        /// Section name
        section: String,
        /// Key name
        key: String,
    },

    /// Configuration value present but not of the requested type
    #[error("Configuration value [{section}].{key} is invalid: {message}")]
    InvalidValue {
        /// Section name
        section: String,
        /// Key name
        key: String,
        /// Error message
        message: String,
    },

    /// Test data document could not be read or parsed
    #[error("Failed to load test data: {message}")]
    DataLoad {
        /// Error message
        message: String,
    },

    /// Test data key absent
    #[error("Test data has no key '{key}'")]
    MissingDataKey {
        /// Key name
        key: String,
    },

    /// Test data value has the wrong shape
    #[error("Test data key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Key name
        key: String,
        /// Expected shape
        expected: &'static str,
        /// Shape actually stored
        found: String,
    },

    /// Header value rejected while building a request context
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader {
        /// Header name
        name: String,
        /// Error message
        message: String,
    },

    /// Network-level failure talking to the shop API
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// Response body lacks an expected field or is not valid JSON
    #[error("Failed to parse response ({field}): {message}")]
    ResponseParseError {
        /// Field or model being extracted
        field: String,
        /// Error message
        message: String,
    },

    /// Element never became present
    #[error("Element {locator} not found after {timeout_ms}ms")]
    ElementNotFound {
        /// Locator description
        locator: String,
        /// Wait budget in milliseconds
        timeout_ms: u64,
    },

    /// Element never became visible
    #[error("Element {locator} not visible after {timeout_ms}ms")]
    ElementNotVisible {
        /// Locator description
        locator: String,
        /// Wait budget in milliseconds
        timeout_ms: u64,
    },

    /// Element never became clickable (including never appearing)
    #[error("Element {locator} not clickable after {timeout_ms}ms ({reason})")]
    ElementNotClickable {
        /// Locator description
        locator: String,
        /// Wait budget in milliseconds
        timeout_ms: u64,
        /// Last observed state, for diagnostics only
        reason: String,
    },

    /// The product page "buy" control never became clickable
    #[error("Purchase control unavailable after {timeout_ms}ms")]
    PurchaseControlUnavailable {
        /// Wait budget in milliseconds
        timeout_ms: u64,
    },

    /// Browser driver command failed
    #[error("Browser driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Browser could not be started
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Scenario check failed
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
}

impl ShopError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a response parse error
    #[must_use]
    pub fn parse(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResponseParseError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Whether this error is one of the wait-timeout kinds
    #[must_use]
    pub const fn is_wait_timeout(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. }
                | Self::ElementNotVisible { .. }
                | Self::ElementNotClickable { .. }
                | Self::PurchaseControlUnavailable { .. }
        )
    }
}
