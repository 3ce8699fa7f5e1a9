//! Project descriptors (`app.json`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DiscoveryError;

/// A local project, read from its descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub supported_locales: Vec<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    /// The descriptor this project was read from.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Project {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DiscoveryError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DiscoveryError::ProjectRead {
            path: path.to_path_buf(),
            source,
        })?;
        let json = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);
        let mut project: Project =
            serde_json::from_slice(json).map_err(|source| DiscoveryError::ProjectFormat {
                path: path.to_path_buf(),
                source,
            })?;
        project.file_path = path.to_path_buf();
        Ok(project)
    }

    /// The directory holding the descriptor, which is the project's source root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }
}
