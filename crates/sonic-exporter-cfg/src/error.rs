//! Error types for exporter configuration commands.
//!
//! Validation failures are reported to the operator through the CLI layer;
//! everything else is an infrastructure fault that ends the invocation.

use thiserror::Error;

/// Result type alias for exporter configuration operations.
pub type ExporterCfgResult<T> = Result<T, ExporterCfgError>;

/// Errors that can occur while reading or writing exporter configuration.
#[derive(Debug, Error)]
pub enum ExporterCfgError {
    /// The requested VRF is not defined in the CONFIG_DB VRF table.
    #[error("VRF {vrf} does not exist")]
    VrfNotFound {
        /// The VRF name given by the operator.
        vrf: String,
    },

    /// Redis/database operation failed.
    #[error("Database operation failed: {operation}: {message}")]
    Database {
        /// The operation that failed (e.g., "hset", "keys", "connect").
        operation: String,
        /// Error message.
        message: String,
    },

    /// A stored field could not be interpreted.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// The SONiC database configuration file could not be used.
    #[error("Database config '{path}': {message}")]
    DbConfig {
        /// Path of the database config file.
        path: String,
        /// Error message.
        message: String,
    },
}

impl ExporterCfgError {
    /// Creates a VRF not found error.
    pub fn vrf_not_found(vrf: impl Into<String>) -> Self {
        Self::VrfNotFound { vrf: vrf.into() }
    }

    /// Creates a database error.
    pub fn database(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Database {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a database config error.
    pub fn db_config(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DbConfig {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true if the operator's input was rejected, as opposed to
    /// the store or its configuration failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, ExporterCfgError::VrfNotFound { .. })
    }
}
