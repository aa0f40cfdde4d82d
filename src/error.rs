//! Domain error types for the migrator.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Export file could not be read
    #[error("Failed to read export file {path}: {source}")]
    ExportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Export file could not be parsed
    #[error("Failed to parse export file: {0}")]
    ExportParse(#[from] serde_json::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience type alias for Results with MigrateError.
pub type MigrateResult<T> = Result<T, MigrateError>;
