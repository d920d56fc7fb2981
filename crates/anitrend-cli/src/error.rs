//! Application-wide error types using thiserror.

use anitrend_common::AnitrendError;
use anitrend_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Error raised by a shared component.
    #[error(transparent)]
    Common(#[from] AnitrendError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the command line pipelines.
pub type CliResult<T> = Result<T, CliError>;
