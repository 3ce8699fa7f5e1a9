//! Workspace discovery for the AL object catalog.
//!
//! A discovery run turns a set of workspace directories into one catalog:
//!
//! 1. Scan the roots for project descriptors (`app.json`), dependency
//!    archives (`.alpackages/*.app`) and source files (`*.al`).
//! 2. Read the archives and parse the source files, in parallel.
//! 3. Normalize both into catalog items, one per object plus one per
//!    event-publisher method.
//! 4. Merge, letting local items replace archive items with the same
//!    `(kind, id)`.
//!
//! Inputs that cannot be read are skipped and reported as warnings; a run
//! never fails as a whole.

mod collector;
mod config;
mod error;
mod loader;
mod merge;
mod normalize;
mod parser;
mod project;
mod resolve;
mod scanner;

pub use collector::{Collector, DiscoveryReport};
pub use config::DiscoveryConfig;
pub use error::{DiscoveryError, DiscoveryWarning, ParseError};
pub use loader::{LocalObject, load_file, load_project};
pub use merge::merge;
pub use normalize::{ItemOrigin, normalize_local, normalize_object, normalize_package};
pub use parser::{AlHeaderParser, SourceParser};
pub use project::Project;
pub use resolve::resolve;
pub use scanner::{PathScanner, WorkspaceScan};
