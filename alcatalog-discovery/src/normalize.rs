//! Normalization of declared objects into catalog items.

use std::path::Path;

use alcatalog_symbols::SymbolPackage;
use alcatalog_types::{CatalogItem, DeclaredObject, NOT_AN_EVENT, SymbolLocator};

use crate::LocalObject;

/// Display metadata shared by every object from one source.
#[derive(Debug, Clone, Copy)]
pub struct ItemOrigin<'a> {
    pub application: &'a str,
    pub publisher: &'a str,
    pub version: Option<&'a str>,
    /// Shown to the user; empty for archive objects.
    pub source_path: &'a str,
    /// Where the locator points: the archive or the source file.
    pub locator_path: &'a Path,
}

/// One base item for the object, then one item per event-publisher method.
pub fn normalize_object(object: &DeclaredObject, origin: ItemOrigin<'_>) -> Vec<CatalogItem> {
    let base = CatalogItem {
        kind: object.kind,
        id: object.id,
        name: object.name.clone(),
        application: origin.application.to_string(),
        publisher: origin.publisher.to_string(),
        version: origin.version.map(str::to_string),
        source_path: origin.source_path.to_string(),
        is_event: false,
        event_name: NOT_AN_EVENT.to_string(),
        event_parameters: Vec::new(),
        locator: SymbolLocator::new(object.kind, object.id, origin.locator_path),
    };
    let events: Vec<_> = object.event_publishers().map(|m| base.as_event(m)).collect();

    let mut items = Vec::with_capacity(events.len() + 1);
    items.push(base);
    items.extend(events);
    items
}

/// Catalog items for every object in a symbol package.
pub fn normalize_package(package: &SymbolPackage) -> Vec<CatalogItem> {
    let origin = ItemOrigin {
        application: &package.name,
        publisher: &package.publisher,
        version: Some(package.version.as_str()),
        source_path: "",
        locator_path: &package.path,
    };
    package
        .iter_objects()
        .flat_map(|object| normalize_object(object, origin))
        .collect()
}

/// Catalog items for objects loaded from local source files.
pub fn normalize_local(objects: &[LocalObject]) -> Vec<CatalogItem> {
    objects
        .iter()
        .flat_map(|local| {
            let source_path = local.file.to_string_lossy();
            normalize_object(
                &local.object,
                ItemOrigin {
                    application: &local.application,
                    publisher: &local.publisher,
                    version: None,
                    source_path: &source_path,
                    locator_path: &local.file,
                },
            )
        })
        .collect()
}
