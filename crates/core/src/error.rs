//! Configuration domain error model.

use thiserror::Error;

/// Result type used across the configuration domain.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration-level error.
///
/// Keep this focused on deterministic failures of the configuration and
/// activation subsystem. Every failure propagates to the caller as a typed
/// error, never as a boolean return code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value failed validation (e.g. two active modules claiming the same
    /// controller key).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty module id).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A module setting had a malformed shape. Rejected at configuration
    /// build time, before anything is persisted.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// A module, shop or setting configuration was missing. Surfaced to the
    /// caller, not retried.
    #[error("not found: {0}")]
    NotFound(String),

    /// A storage write failed mid-operation. Shop commits are atomic, so no
    /// partial chain state is left behind; callers retry the whole operation.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl ConfigError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_setting(msg: impl Into<String>) -> Self {
        Self::InvalidSetting(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
