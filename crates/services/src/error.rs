//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use drill_core::model::LedgerError;

/// Errors emitted by `DrillSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DrillError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors emitted while loading or validating `DrillSettings`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("tick period must be greater than zero")]
    ZeroTickPeriod,
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
