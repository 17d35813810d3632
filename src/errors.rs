use thiserror::Error;

/// Default phrase placed before the locator in not-found messages
pub const DEFAULT_PREFIX: &str = "Element";
/// Default phrase placed after the locator in not-found messages
pub const DEFAULT_SUFFIX: &str = "was not found by text|CSS|XPath";

pub type Result<T> = std::result::Result<T, LocateError>;

/// Errors raised by the locator engine and the helpers built on it
#[derive(Debug, Error)]
pub enum LocateError {
    /// Locator cannot be classified or safely embedded in a query (exit code 6)
    #[error("Cannot classify locator {locator}: {reason}")]
    ClassificationAmbiguous { locator: String, reason: String },

    /// Nothing matched the locator (exit code 2)
    #[error("{prefix} \"{locator}\" {suffix}")]
    ElementNotFound {
        locator: String,
        prefix: String,
        suffix: String,
    },

    /// A `within` scope was entered while another one is active (exit code 1)
    #[error("Already inside a within scope ({active}); leave it before entering {requested}")]
    ScopeAlreadyActive { active: String, requested: String },

    /// An assertion helper found the page in the wrong state (exit code 3)
    #[error("{0}")]
    AssertionFailed(String),

    /// Configuration could not be read (exit code 1)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error reported by the WebDriver backend (exit code 4)
    #[error(transparent)]
    Driver(#[from] anyhow::Error),
}

impl LocateError {
    /// Not-found error with the default prefix and suffix
    pub fn not_found(locator: impl Into<String>) -> Self {
        Self::not_found_with(locator, DEFAULT_PREFIX, DEFAULT_SUFFIX)
    }

    pub fn not_found_with(
        locator: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        LocateError::ElementNotFound {
            locator: locator.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn ambiguous(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        LocateError::ClassificationAmbiguous {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LocateError::ElementNotFound { .. } => 2,
            LocateError::AssertionFailed(_) => 3,
            LocateError::Driver(_) => 4,
            LocateError::ClassificationAmbiguous { .. } => 6,
            LocateError::ScopeAlreadyActive { .. } | LocateError::Config(_) => 1,
        }
    }
}
