//! Error types for discovery.
//!
//! Per-input failures are collected as [`DiscoveryWarning`]s; none of them
//! aborts a discovery run.

use std::path::{Path, PathBuf};

use alcatalog_symbols::SymbolError;
use thiserror::Error;

/// A source file could not be parsed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl ParseError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Syntax { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A workspace root does not exist.
    #[error("workspace root does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    /// A symbol archive is unreadable or has no manifest.
    #[error(transparent)]
    ManifestRead(SymbolError),

    /// A symbol manifest could not be deserialized.
    #[error(transparent)]
    ManifestFormat(SymbolError),

    #[error(transparent)]
    SourceParse(#[from] ParseError),

    /// A project descriptor could not be read.
    #[error("cannot read project descriptor {}: {source}", path.display())]
    ProjectRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A project descriptor is not valid JSON for a project.
    #[error("malformed project descriptor {}: {source}", path.display())]
    ProjectFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A worker task panicked or was cancelled.
    #[error("discovery task failed: {0}")]
    TaskFailed(String),
}

impl From<SymbolError> for DiscoveryError {
    fn from(err: SymbolError) -> Self {
        match err {
            SymbolError::Format { .. } => Self::ManifestFormat(err),
            other => Self::ManifestRead(other),
        }
    }
}

/// A skipped input, keyed by the offending path.
#[derive(Debug)]
pub struct DiscoveryWarning {
    pub path: PathBuf,
    pub error: DiscoveryError,
}

impl DiscoveryWarning {
    pub fn new(path: impl Into<PathBuf>, error: impl Into<DiscoveryError>) -> Self {
        Self {
            path: path.into(),
            error: error.into(),
        }
    }
}
