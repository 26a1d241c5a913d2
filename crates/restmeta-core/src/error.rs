//! Shared error type across restmeta crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// No deployment registry in the current context.
    RegistryNotFound,
    /// Endpoint metadata could not be described.
    Introspection,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::RegistryNotFound => "REGISTRY_NOT_FOUND",
            ClientCode::Introspection => "INTROSPECTION",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetaError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("deployment registry not found")]
    RegistryNotFound,
    #[error("introspection failed: {0}")]
    Introspection(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetaError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetaError::RegistryNotFound => ClientCode::RegistryNotFound,
            MetaError::Introspection(_) => ClientCode::Introspection,
            MetaError::BadConfig(_) => ClientCode::BadConfig,
            MetaError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MetaError::Internal(_) => ClientCode::Internal,
        }
    }
}
