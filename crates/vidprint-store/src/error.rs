//! Error types for fingerprint storage.

use std::path::PathBuf;
use thiserror::Error;

use vidprint_models::ColorModel;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or loading fingerprints.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no stored {model} fingerprint for '{video}' at {path}")]
    FingerprintMissing {
        video: String,
        model: ColorModel,
        path: PathBuf,
    },

    #[error("malformed fingerprint file {path}: {reason}")]
    FingerprintMalformed { path: PathBuf, reason: String },

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a malformed-fingerprint error.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FingerprintMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
