//! Discovery settings: filesystem conventions and the concurrency bound.

use serde::{Deserialize, Serialize};

/// Settings for a discovery run. Every field has a default, so a partial
/// JSON document (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryConfig {
    /// Name of the directories holding dependency symbol archives.
    pub dependency_dir: String,
    /// Extension of symbol archives, without the dot.
    pub archive_extension: String,
    /// File name of the project descriptor.
    pub project_file: String,
    /// Extension of declaration source files, without the dot.
    pub source_extension: String,
    /// Maximum number of archive reads (and, separately, file parses)
    /// in flight at once.
    pub max_concurrent: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            dependency_dir: ".alpackages".into(),
            archive_extension: "app".into(),
            project_file: "app.json".into(),
            source_extension: "al".into(),
            max_concurrent: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl DiscoveryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The concurrency bound, never below one.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.max_concurrent.max(1)
    }

    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }
}
