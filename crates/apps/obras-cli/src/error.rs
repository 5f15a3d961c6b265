//! CLI error types.

use obras_ops::OpsError;
use obras_types::ErrorCode;
use thiserror::Error;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error enum wrapping all crate errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operations error.
    #[error("{0}")]
    Ops(#[from] OpsError),

    /// Store error.
    #[error("{0}")]
    Store(#[from] obras_store::StoreError),

    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// User-facing error with actionable message.
    #[error("{0}")]
    User(String),

    /// The load batch stopped early. `output` holds the rendered run report.
    #[error("Load aborted: {source}")]
    LoadAborted {
        /// Rendered report of the partial run.
        output: String,
        /// Failure that stopped the batch.
        #[source]
        source: OpsError,
    },
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a user-facing error.
    pub fn user(msg: impl Into<String>) -> Self {
        Self::User(msg.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors: 1
            Self::User(_) => 1,
            // Config errors: 3
            Self::Config(_) | Self::Toml(_) => 3,
            // Store errors: 6
            Self::Store(_) => 6,
            // Aborted loads: 7
            Self::LoadAborted { .. } => 7,
            // Operations errors: 8
            Self::Ops(_) => 8,
            // IO errors: 9
            Self::Io(_) => 9,
            // JSON/format errors: 10
            Self::Json(_) => 10,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Config(_) | Self::Toml(_) | Self::Json(_) => ErrorCode::InvalidConfig,

            // Delegated errors
            Self::Ops(e) => e.error_code(),
            Self::LoadAborted { source, .. } => source.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Io(_) => ErrorCode::InternalError,

            // User-facing errors are generic
            Self::User(_) => ErrorCode::InternalError,
        }
    }
}
