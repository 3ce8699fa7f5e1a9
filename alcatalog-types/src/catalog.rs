//! Catalog rows and the locators that point back to full definitions.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{MethodDecl, ObjectKind, ParameterDecl};

/// Event name carried by catalog items that do not represent an event.
pub const NOT_AN_EVENT: &str = "not_an_event";

/// Where the full definition of a declared object can be fetched from.
///
/// `path` is either a symbol archive or a source file; the extension tells
/// the two apart at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolLocator {
    /// The object id.
    pub index: i64,
    pub path: PathBuf,
    pub kind: ObjectKind,
}

impl SymbolLocator {
    pub fn new(kind: ObjectKind, index: i64, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            path: path.into(),
            kind,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One row of the catalog: a declared object, or one of its events.
///
/// Capability flags are not stored; they are derived from `kind` on every
/// access and when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub kind: ObjectKind,
    pub id: i64,
    pub name: String,
    pub application: String,
    pub publisher: String,
    /// Application version. Absent for items read from local sources.
    pub version: Option<String>,
    /// Source file path, or empty for items read from a symbol archive.
    pub source_path: String,
    pub is_event: bool,
    pub event_name: String,
    pub event_parameters: Vec<ParameterDecl>,
    pub locator: SymbolLocator,
}

impl CatalogItem {
    /// The `(kind, id)` pair that decides which items are duplicates.
    #[must_use]
    pub fn identity(&self) -> (ObjectKind, i64) {
        (self.kind, self.id)
    }

    #[must_use]
    pub fn can_execute(&self) -> bool {
        self.kind.capabilities().can_execute
    }

    #[must_use]
    pub fn can_design(&self) -> bool {
        self.kind.capabilities().can_design
    }

    #[must_use]
    pub fn can_create_page(&self) -> bool {
        self.kind.capabilities().can_create_page
    }

    /// Clones this item as the event source for `method`.
    #[must_use]
    pub fn as_event(&self, method: &MethodDecl) -> Self {
        Self {
            is_event: true,
            event_name: method.name.clone(),
            event_parameters: method.parameters.clone(),
            ..self.clone()
        }
    }
}

impl Serialize for CatalogItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("CatalogItem", 15)?;
        row.serialize_field("type", self.kind.as_str())?;
        row.serialize_field("kind", &self.kind)?;
        row.serialize_field("id", &self.id)?;
        row.serialize_field("name", &self.name)?;
        row.serialize_field("application", &self.application)?;
        row.serialize_field("publisher", &self.publisher)?;
        row.serialize_field("version", &self.version)?;
        row.serialize_field("fsPath", &self.source_path)?;
        row.serialize_field("canExecute", &self.can_execute())?;
        row.serialize_field("canDesign", &self.can_design())?;
        row.serialize_field("canCreatePage", &self.can_create_page())?;
        row.serialize_field("isEvent", &self.is_event)?;
        row.serialize_field("eventName", &self.event_name)?;
        row.serialize_field("eventParameters", &self.event_parameters)?;
        row.serialize_field("locator", &self.locator)?;
        row.end()
    }
}
