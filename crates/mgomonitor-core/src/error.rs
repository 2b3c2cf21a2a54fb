//! Shared error type across mgomonitor crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid descriptor: {0}")]
    InvalidDesc(String),
    #[error("already registered: {0}")]
    AlreadyRegistered(String),
    #[error("inconsistent collector: {0}")]
    InconsistentCollector(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MonitorError {
    /// Stable short code, used in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            MonitorError::InvalidDesc(_) => "INVALID_DESC",
            MonitorError::AlreadyRegistered(_) => "ALREADY_REGISTERED",
            MonitorError::InconsistentCollector(_) => "INCONSISTENT_COLLECTOR",
            MonitorError::Encode(_) => "ENCODE",
            MonitorError::Config(_) => "CONFIG",
            MonitorError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            MonitorError::Internal(_) => "INTERNAL",
        }
    }
}
