//! Filesystem scanning: project descriptors, symbol archives and source files.
//!
//! Directory entries are visited in sorted order so every scan of an
//! unchanged tree yields the same sequence. Symbolic links to directories
//! are not followed. Unreadable directories are skipped.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{DiscoveryConfig, DiscoveryError, DiscoveryWarning, Project};

/// Everything a discovery run needs to read, found by one scan.
#[derive(Debug, Default)]
pub struct WorkspaceScan {
    /// Roots that exist.
    pub roots_found: usize,
    pub archives: Vec<PathBuf>,
    pub projects: Vec<Arc<Project>>,
    /// Source files paired with the project that owns them.
    pub sources: Vec<(Arc<Project>, PathBuf)>,
    pub warnings: Vec<DiscoveryWarning>,
}

pub struct PathScanner<'a> {
    config: &'a DiscoveryConfig,
}

impl<'a> PathScanner<'a> {
    pub fn new(config: &'a DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Scans all roots. Missing roots are reported as warnings, as are
    /// project descriptors that fail to load.
    pub fn scan<P: AsRef<Path>>(&self, roots: &[P]) -> WorkspaceScan {
        let (existing, warnings) = self.split_roots(roots);
        let mut scan = WorkspaceScan {
            roots_found: existing.len(),
            warnings,
            ..WorkspaceScan::default()
        };
        scan.archives = self.archive_files(&existing);

        for descriptor in self.project_files(&existing) {
            match Project::load(&descriptor) {
                Ok(project) => scan.projects.push(Arc::new(project)),
                Err(e) => {
                    warn!(path = %descriptor.display(), "Skipping project: {}", e);
                    scan.warnings.push(DiscoveryWarning::new(descriptor, e));
                }
            }
        }
        scan.sources = self.assign_sources(&scan.projects);
        scan
    }

    /// Separates existing roots from missing ones, which become warnings.
    pub fn split_roots<P: AsRef<Path>>(
        &self,
        roots: &[P],
    ) -> (Vec<PathBuf>, Vec<DiscoveryWarning>) {
        let mut existing = Vec::new();
        let mut warnings = Vec::new();
        for root in roots {
            let root = root.as_ref();
            if root.is_dir() {
                existing.push(root.to_path_buf());
            } else {
                warn!(path = %root.display(), "Workspace root does not exist");
                warnings.push(DiscoveryWarning::new(
                    root,
                    DiscoveryError::MissingInput(root.to_path_buf()),
                ));
            }
        }
        (existing, warnings)
    }

    /// Every project descriptor under the roots, the roots themselves included.
    pub fn project_files<P: AsRef<Path>>(&self, roots: &[P]) -> Vec<PathBuf> {
        let mut found = BTreeSet::new();
        for root in roots {
            for entry in entries(root.as_ref()) {
                if entry.file_type().is_file()
                    && file_name_is(entry.path(), &self.config.project_file)
                {
                    found.insert(entry.into_path());
                }
            }
        }
        found.into_iter().collect()
    }

    /// Every archive directly inside a dependency directory anywhere under
    /// the roots. Archives are unique by file name; the first one seen wins.
    pub fn archive_files<P: AsRef<Path>>(&self, roots: &[P]) -> Vec<PathBuf> {
        let mut seen: HashSet<OsString> = HashSet::new();
        let mut archives = Vec::new();
        for root in roots {
            for entry in entries(root.as_ref()) {
                let in_dependency_dir = entry
                    .path()
                    .parent()
                    .is_some_and(|dir| file_name_is(dir, &self.config.dependency_dir));
                if !entry.file_type().is_file()
                    || !in_dependency_dir
                    || !has_extension(entry.path(), &self.config.archive_extension)
                {
                    continue;
                }
                if seen.insert(entry.file_name().to_os_string()) {
                    archives.push(entry.into_path());
                } else {
                    debug!(path = %entry.path().display(), "Skipping duplicate archive");
                }
            }
        }
        archives
    }

    /// Source files below the immediate subdirectories of `project_root`.
    /// Files directly in the root are not collected.
    pub fn source_files(&self, project_root: &Path) -> Vec<PathBuf> {
        entries(project_root)
            .filter(|entry| entry.depth() >= 2 && entry.file_type().is_file())
            .filter(|entry| has_extension(entry.path(), &self.config.source_extension))
            .map(DirEntry::into_path)
            .collect()
    }

    /// Pairs each source file with its owning project. When projects nest,
    /// a file belongs to the innermost one.
    fn assign_sources(&self, projects: &[Arc<Project>]) -> Vec<(Arc<Project>, PathBuf)> {
        let mut owners: BTreeMap<PathBuf, Arc<Project>> = BTreeMap::new();
        for project in projects {
            for file in self.source_files(project.root()) {
                let replace = owners.get(&file).is_none_or(|current| {
                    project.root().components().count() > current.root().components().count()
                });
                if replace {
                    owners.insert(file, Arc::clone(project));
                }
            }
        }
        owners.into_iter().map(|(file, project)| (project, file)).collect()
    }
}

/// Everything below `root`, the root included, siblings sorted by name.
/// Symbolic links show up as entries but are not followed.
fn entries(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
}

fn file_name_is(path: &Path, name: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(name))
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
