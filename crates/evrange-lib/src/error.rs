use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the EV range library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// The simulation operations themselves never fail; these variants cover the
/// fallible edges around them (configuration loading and validation).
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a configuration value fails validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when the consumption tier table is malformed.
    #[error("invalid consumption tiers: {message}")]
    InvalidTiers { message: String },

    /// Raised when an explicitly requested configuration file does not exist.
    #[error("configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Raised when a configuration file could not be parsed.
    #[error("failed to parse configuration at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for configuration")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON errors outside of file loading.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
