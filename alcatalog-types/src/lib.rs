//! Core type definitions for the AL object catalog.
//!
//! This crate defines the source-agnostic types shared by the archive
//! reader and the discovery engine:
//! - Object kinds and their capability table
//! - Declared objects with their methods, attributes and parameters
//! - Catalog items and the locators that point back to their definitions
//!
//! Nothing here touches the filesystem. Reading archives lives in
//! `alcatalog-symbols`, scanning and merging in `alcatalog-discovery`.

mod catalog;
mod kind;
mod object;

pub use catalog::{CatalogItem, NOT_AN_EVENT, SymbolLocator};
pub use kind::{Capabilities, ObjectKind};
pub use object::{AttributeTag, DeclaredObject, MethodDecl, ParameterDecl};

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown object kind: {0}")]
    UnknownKind(String),
}
