//! Error types for the manager's operations.
//!
//! Failures fall into three families that an operator must be able to tell
//! apart:
//!
//! - [`StoreError`] – "the dashboard config is broken" (missing, empty,
//!   malformed, unwritable).
//! - [`CatalogError`] – "the icon repository is unreachable" (or a download
//!   could not be stored).
//! - [`ValidationError`] – the request itself was malformed; nothing was
//!   touched.
//!
//! [`ManagerError`] wraps all three and exposes a stable [`ManagerError::kind`]
//! string for the HTTP surface.

use std::path::PathBuf;

use homer_core::ValidationError;
use thiserror::Error;

/// Failures reading or writing the configuration document.
///
/// Every variant names the resolved path and, where there is one, the
/// underlying cause.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("config file not found at {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file at {path} is empty: no non-whitespace content")]
    Empty { path: PathBuf },

    #[error("config file at {path} is not valid YAML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config file at {path} has an invalid structure: {reason}")]
    InvalidShape { path: PathBuf, reason: String },

    /// Any read failure other than "not found" (permissions, EISDIR, ...).
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failures of the remote icon repository or of storing a downloaded icon.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The manifest query failed: non-2xx status, transport error, or a body
    /// that is not a tree listing.
    #[error("icon repository query failed{}: {detail}", http_status(.status))]
    Upstream { status: Option<u16>, detail: String },

    /// Fetching one icon's bytes failed.
    #[error("icon download failed{}: {detail}", http_status(.status))]
    Download { status: Option<u16>, detail: String },

    /// The downloaded bytes could not be written to the assets directory.
    #[error("failed to store icon at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("icon name `{0}` is not a plain file name")]
    InvalidName(String),
}

impl CatalogError {
    /// HTTP status of the failed remote call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Upstream { status, .. } | CatalogError::Download { status, .. } => {
                *status
            }
            _ => None,
        }
    }
}

fn http_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Umbrella error for every manager operation.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A blocking worker panicked or was cancelled.
    #[error("operation did not complete: {0}")]
    Task(String),
}

impl ManagerError {
    /// Stable machine-readable category of this error.
    pub fn kind(&self) -> &'static str {
        match self {
            ManagerError::Validation(_) => "validation_error",
            ManagerError::Store(e) => match e {
                StoreError::NotFound { .. } => "not_found",
                StoreError::Empty { .. } => "empty",
                StoreError::Parse { .. } => "parse_error",
                StoreError::InvalidShape { .. } => "invalid_shape",
                StoreError::Read { .. } => "read_error",
                StoreError::Write { .. } | StoreError::Serialize { .. } => "write_error",
            },
            ManagerError::Catalog(e) => match e {
                CatalogError::Upstream { .. } => "upstream_error",
                CatalogError::Download { .. } => "download_error",
                CatalogError::Storage { .. } => "storage_error",
                CatalogError::InvalidName(_) => "validation_error",
            },
            ManagerError::Task(_) => "internal_error",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
