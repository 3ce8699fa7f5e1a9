//! Error types for the symbols crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymbolError {
    /// The archive could not be opened, is not a zip, or has no manifest entry.
    #[error("cannot read symbol manifest from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The manifest entry exists but is not a valid symbol manifest.
    #[error("malformed symbol manifest in {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SymbolError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: impl Into<zip::result::ZipError>) -> Self {
        Self::Read {
            path: path.into(),
            source: source.into(),
        }
    }

    /// True when the archive opened fine but carries no manifest entry.
    #[must_use]
    pub fn is_missing_manifest(&self) -> bool {
        matches!(
            self,
            Self::Read {
                source: zip::result::ZipError::FileNotFound,
                ..
            }
        )
    }
}
