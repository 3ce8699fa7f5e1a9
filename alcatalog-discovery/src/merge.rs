//! Reconciling archive items with local items.

use std::collections::HashSet;

use alcatalog_types::{CatalogItem, ObjectKind};

/// Drops every compiled item whose `(kind, id)` also appears among the
/// local items, then appends the local items.
///
/// Application, publisher and name play no part: a local object reusing
/// the id of a compiled object of the same kind replaces it, renamed or
/// not. Event items share their object's identity, so they go with it.
pub fn merge(compiled: Vec<CatalogItem>, local: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let overridden: HashSet<(ObjectKind, i64)> = local.iter().map(CatalogItem::identity).collect();

    let mut merged: Vec<CatalogItem> = compiled
        .into_iter()
        .filter(|item| !overridden.contains(&item.identity()))
        .collect();
    merged.extend(local);
    merged
}
