//! Discovery runs: scan, read and parse in parallel, normalize, merge.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alcatalog_symbols::SymbolPackage;
use alcatalog_types::{CatalogItem, DeclaredObject, SymbolLocator};
use tokio::task::{JoinError, JoinSet};
use tracing::{info, warn};

use crate::normalize::{normalize_local, normalize_package};
use crate::{
    AlHeaderParser, DiscoveryConfig, DiscoveryError, DiscoveryWarning, LocalObject, PathScanner,
    Project, SourceParser, WorkspaceScan, load_file, merge, resolve,
};

/// The result of one discovery run: a best-effort catalog plus every
/// input that had to be skipped.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub items: Vec<CatalogItem>,
    pub warnings: Vec<DiscoveryWarning>,
    /// Workspace roots that exist.
    pub roots_found: usize,
    pub archives_read: usize,
    pub projects_found: usize,
}

impl DiscoveryReport {
    /// True when there was nothing to scan at all: no roots were given, or
    /// none of them exists.
    #[must_use]
    pub fn is_hard_failure(&self) -> bool {
        self.roots_found == 0
    }
}

/// Builds catalogs from workspace directories.
///
/// Each archive read and each source parse is an independent blocking
/// task. Dropping a `discover` future aborts the tasks not yet started.
pub struct Collector {
    config: DiscoveryConfig,
    parser: Arc<dyn SourceParser>,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default())
    }
}

impl Collector {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            parser: Arc::new(AlHeaderParser),
        }
    }

    /// Replaces the default header parser.
    pub fn with_parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    /// Builds the catalog for the given workspace roots.
    pub async fn discover<P: AsRef<Path>>(&self, roots: &[P]) -> DiscoveryReport {
        let roots: Vec<PathBuf> = roots.iter().map(|r| r.as_ref().to_path_buf()).collect();
        if roots.is_empty() {
            warn!("No workspace roots given");
            return DiscoveryReport::default();
        }

        let config = self.config.clone();
        let scan =
            tokio::task::spawn_blocking(move || PathScanner::new(&config).scan(&roots)).await;
        let WorkspaceScan {
            roots_found,
            archives,
            projects,
            sources,
            mut warnings,
        } = match scan {
            Ok(scan) => scan,
            Err(e) => {
                warn!("Workspace scan failed: {}", e);
                return DiscoveryReport {
                    warnings: vec![DiscoveryWarning::new(
                        PathBuf::new(),
                        DiscoveryError::TaskFailed(e.to_string()),
                    )],
                    ..DiscoveryReport::default()
                };
            }
        };

        let ((packages, archive_warnings), (locals, source_warnings)) =
            tokio::join!(self.read_archives(archives), self.load_sources(sources));
        warnings.extend(archive_warnings);
        warnings.extend(source_warnings);

        let compiled: Vec<CatalogItem> = packages.iter().flat_map(normalize_package).collect();
        let local = normalize_local(&locals);
        let items = merge(compiled, local);

        info!(
            items = items.len(),
            archives = packages.len(),
            projects = projects.len(),
            warnings = warnings.len(),
            "Discovery complete"
        );
        DiscoveryReport {
            items,
            warnings,
            roots_found,
            archives_read: packages.len(),
            projects_found: projects.len(),
        }
    }

    /// Reads every dependency archive under the roots, without local sources.
    pub async fn discover_symbols<P: AsRef<Path>>(
        &self,
        roots: &[P],
    ) -> (Vec<SymbolPackage>, Vec<DiscoveryWarning>) {
        let roots: Vec<PathBuf> = roots.iter().map(|r| r.as_ref().to_path_buf()).collect();
        let config = self.config.clone();
        let found = tokio::task::spawn_blocking(move || {
            let scanner = PathScanner::new(&config);
            let (existing, warnings) = scanner.split_roots(&roots);
            (scanner.archive_files(&existing), warnings)
        })
        .await;

        match found {
            Ok((archives, mut warnings)) => {
                let (packages, archive_warnings) = self.read_archives(archives).await;
                warnings.extend(archive_warnings);
                (packages, warnings)
            }
            Err(e) => (
                Vec::new(),
                vec![DiscoveryWarning::new(
                    PathBuf::new(),
                    DiscoveryError::TaskFailed(e.to_string()),
                )],
            ),
        }
    }

    /// Fetches the full definition a catalog item's locator points to.
    pub fn resolve(
        &self,
        locator: &SymbolLocator,
    ) -> Result<Option<DeclaredObject>, DiscoveryError> {
        resolve(locator, self.parser.as_ref(), &self.config)
    }

    async fn read_archives(
        &self,
        archives: Vec<PathBuf>,
    ) -> (Vec<SymbolPackage>, Vec<DiscoveryWarning>) {
        let results = run_bounded(archives.clone(), self.config.concurrency(), |path: PathBuf| {
            SymbolPackage::read(&path)
        })
        .await;

        let mut packages = Vec::new();
        let mut warnings = Vec::new();
        for (path, result) in archives.into_iter().zip(results) {
            match result {
                Ok(Ok(package)) => packages.push(package),
                Ok(Err(e)) => {
                    warn!(path = %path.display(), "Skipping symbol archive: {}", e);
                    warnings.push(DiscoveryWarning::new(path, e));
                }
                Err(e) => warnings.push(task_failed(path, e)),
            }
        }
        (packages, warnings)
    }

    async fn load_sources(
        &self,
        sources: Vec<(Arc<Project>, PathBuf)>,
    ) -> (Vec<LocalObject>, Vec<DiscoveryWarning>) {
        let files: Vec<PathBuf> = sources.iter().map(|(_, file)| file.clone()).collect();
        let parser = Arc::clone(&self.parser);
        let results = run_bounded(
            sources,
            self.config.concurrency(),
            move |(project, file): (Arc<Project>, PathBuf)| {
                load_file(&project, &file, parser.as_ref())
            },
        )
        .await;

        let mut objects = Vec::new();
        let mut warnings = Vec::new();
        for (file, result) in files.into_iter().zip(results) {
            match result {
                Ok(Ok(loaded)) => objects.extend(loaded),
                Ok(Err(e)) => {
                    warn!(path = %file.display(), "Skipping source file: {}", e);
                    warnings.push(DiscoveryWarning::new(file, e));
                }
                Err(e) => warnings.push(task_failed(file, e)),
            }
        }
        (objects, warnings)
    }
}

fn task_failed(path: PathBuf, err: JoinError) -> DiscoveryWarning {
    warn!(path = %path.display(), "Discovery task failed: {}", err);
    DiscoveryWarning::new(path, DiscoveryError::TaskFailed(err.to_string()))
}

/// Runs `work` over `inputs` as blocking tasks, at most `limit` at a time.
/// Results come back in input order.
async fn run_bounded<T, R, F>(inputs: Vec<T>, limit: usize, work: F) -> Vec<Result<R, JoinError>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let mut slots: Vec<Option<Result<R, JoinError>>> = (0..inputs.len()).map(|_| None).collect();
    let mut task_index = HashMap::new();
    let mut join_set: JoinSet<(usize, R)> = JoinSet::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let work = Arc::clone(&work);
        let handle = join_set.spawn_blocking(move || (index, work(input)));
        task_index.insert(handle.id(), index);

        if join_set.len() >= limit {
            consume_next(&mut join_set, &task_index, &mut slots).await;
        }
    }

    while !join_set.is_empty() {
        consume_next(&mut join_set, &task_index, &mut slots).await;
    }

    slots.into_iter().flatten().collect()
}

async fn consume_next<R: Send + 'static>(
    join_set: &mut JoinSet<(usize, R)>,
    task_index: &HashMap<tokio::task::Id, usize>,
    slots: &mut [Option<Result<R, JoinError>>],
) {
    match join_set.join_next().await {
        Some(Ok((index, result))) => slots[index] = Some(Ok(result)),
        Some(Err(e)) => {
            if let Some(&index) = task_index.get(&e.id()) {
                slots[index] = Some(Err(e));
            }
        }
        None => {}
    }
}
