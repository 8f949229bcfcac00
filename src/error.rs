//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for switcher operations.
pub type Result<T> = std::result::Result<T, SwitcherError>;

/// Errors returned by catalog, system and dispatch operations.
#[derive(Debug, Error)]
pub enum SwitcherError {
    /// Filesystem or process I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file exists but is not a valid provider document.
    #[error("provider catalog {path} is corrupt (delete it to restore defaults): {source}")]
    CorruptStore {
        /// Path of the unreadable catalog.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },

    /// The interface enumeration command failed or its output was unusable.
    #[error("failed to query network interfaces: {0}")]
    SystemQuery(String),

    /// The selected provider name is not in the catalog.
    #[error("unknown DNS provider: {name:?}")]
    UnknownProvider {
        /// The name that was looked up.
        name: String,
    },
}

impl SwitcherError {
    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }
}
