//! Local declaration loading.

use std::path::{Path, PathBuf};

use alcatalog_types::DeclaredObject;
use tracing::{debug, warn};

use crate::{DiscoveryWarning, ParseError, Project, SourceParser, WorkspaceScan};

/// A declared object read from a project's source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalObject {
    pub object: DeclaredObject,
    /// Name of the owning project.
    pub application: String,
    pub publisher: String,
    /// The source file declaring the object.
    pub file: PathBuf,
}

/// Parses one source file and tags its objects with the owning project.
pub fn load_file(
    project: &Project,
    file: &Path,
    parser: &dyn SourceParser,
) -> Result<Vec<LocalObject>, ParseError> {
    let objects = parser.parse(file)?;
    debug!(path = %file.display(), objects = objects.len(), "Source file parsed");
    Ok(objects
        .into_iter()
        .map(|object| LocalObject {
            object,
            application: project.name.clone(),
            publisher: project.publisher.clone(),
            file: file.to_path_buf(),
        })
        .collect())
}

/// Loads the source files `scan` assigned to `project`, sequentially.
/// Files under a project nested inside this one belong to the nested
/// project and are left out. Files that fail to parse are reported and
/// skipped.
pub fn load_project(
    project: &Project,
    scan: &WorkspaceScan,
    parser: &dyn SourceParser,
) -> (Vec<LocalObject>, Vec<DiscoveryWarning>) {
    let mut objects = Vec::new();
    let mut warnings = Vec::new();
    let owned = scan
        .sources
        .iter()
        .filter(|(owner, _)| owner.file_path == project.file_path);
    for (_, file) in owned {
        match load_file(project, file, parser) {
            Ok(loaded) => objects.extend(loaded),
            Err(e) => {
                warn!(path = %file.display(), "Skipping source file: {}", e);
                warnings.push(DiscoveryWarning::new(file.clone(), e));
            }
        }
    }
    (objects, warnings)
}
