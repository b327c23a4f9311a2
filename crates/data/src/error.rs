//! Errors raised at the data-provider boundary.

/// Failures while resolving data for the yield core.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A required resource could not be fetched from any endpoint.
    #[error("{resource} unavailable: {reason}")]
    DataUnavailable {
        /// What was requested, e.g. `position 42`.
        resource: String,
        /// Why every attempt failed.
        reason: String,
    },
    /// A field in a response could not be parsed.
    #[error("invalid {field} {value:?} in {resource}")]
    InvalidField {
        /// What was requested.
        resource: String,
        /// Offending field name.
        field: &'static str,
        /// Raw value received.
        value: String,
    },
    /// A configuration value could not be parsed.
    #[error("invalid configuration {key}={value:?}")]
    InvalidConfig {
        /// Environment key.
        key: &'static str,
        /// Raw value.
        value: String,
    },
    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl ProviderError {
    /// Stable name of the error kind, for user-facing output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "DataUnavailableError",
            Self::InvalidField { .. } => "InvalidFieldError",
            Self::InvalidConfig { .. } => "InvalidConfigError",
            Self::Client(_) => "ClientError",
        }
    }

    pub(crate) fn unavailable(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}
