//! Object kinds and the capability table derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The closed set of declared object categories.
///
/// Declaration order is significant: it is the order in which a symbol
/// package's collections are flattened into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Table,
    Page,
    Report,
    Codeunit,
    Query,
    XmlPort,
    Profile,
    PageExtension,
    PageCustomization,
    TableExtension,
    ControlAddIn,
    EnumType,
    DotNetPackage,
}

/// What a design tool may do with an object of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities {
    pub can_execute: bool,
    pub can_design: bool,
    pub can_create_page: bool,
}

impl Capabilities {
    const NONE: Self = Self::new(false, false, false);

    const fn new(can_execute: bool, can_design: bool, can_create_page: bool) -> Self {
        Self {
            can_execute,
            can_design,
            can_create_page,
        }
    }
}

impl ObjectKind {
    /// Every kind, in declaration order.
    pub const ALL: [ObjectKind; 13] = [
        ObjectKind::Table,
        ObjectKind::Page,
        ObjectKind::Report,
        ObjectKind::Codeunit,
        ObjectKind::Query,
        ObjectKind::XmlPort,
        ObjectKind::Profile,
        ObjectKind::PageExtension,
        ObjectKind::PageCustomization,
        ObjectKind::TableExtension,
        ObjectKind::ControlAddIn,
        ObjectKind::EnumType,
        ObjectKind::DotNetPackage,
    ];

    /// The capability table. This is the only place capabilities are defined.
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            ObjectKind::Table => Capabilities::new(true, true, true),
            ObjectKind::Page => Capabilities::new(true, true, false),
            ObjectKind::TableExtension => Capabilities::new(true, false, true),
            ObjectKind::Report | ObjectKind::PageExtension | ObjectKind::PageCustomization => {
                Capabilities::new(true, false, false)
            }
            ObjectKind::Codeunit
            | ObjectKind::Query
            | ObjectKind::XmlPort
            | ObjectKind::Profile
            | ObjectKind::ControlAddIn
            | ObjectKind::EnumType
            | ObjectKind::DotNetPackage => Capabilities::NONE,
        }
    }

    /// Variant name, as shown to users and written to JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Table => "Table",
            ObjectKind::Page => "Page",
            ObjectKind::Report => "Report",
            ObjectKind::Codeunit => "Codeunit",
            ObjectKind::Query => "Query",
            ObjectKind::XmlPort => "XmlPort",
            ObjectKind::Profile => "Profile",
            ObjectKind::PageExtension => "PageExtension",
            ObjectKind::PageCustomization => "PageCustomization",
            ObjectKind::TableExtension => "TableExtension",
            ObjectKind::ControlAddIn => "ControlAddIn",
            ObjectKind::EnumType => "EnumType",
            ObjectKind::DotNetPackage => "DotNetPackage",
        }
    }

    /// Name of the symbol manifest collection holding objects of this kind.
    #[must_use]
    pub const fn collection_name(self) -> &'static str {
        match self {
            ObjectKind::Table => "Tables",
            ObjectKind::Page => "Pages",
            ObjectKind::Report => "Reports",
            ObjectKind::Codeunit => "Codeunits",
            ObjectKind::Query => "Queries",
            ObjectKind::XmlPort => "XmlPorts",
            ObjectKind::Profile => "Profiles",
            ObjectKind::PageExtension => "PageExtensions",
            ObjectKind::PageCustomization => "PageCustomizations",
            ObjectKind::TableExtension => "TableExtensions",
            ObjectKind::ControlAddIn => "ControlAddIns",
            ObjectKind::EnumType => "EnumTypes",
            ObjectKind::DotNetPackage => "DotNetPackages",
        }
    }

    /// Keyword that opens a declaration of this kind in source files.
    #[must_use]
    pub const fn source_keyword(self) -> &'static str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::Page => "page",
            ObjectKind::Report => "report",
            ObjectKind::Codeunit => "codeunit",
            ObjectKind::Query => "query",
            ObjectKind::XmlPort => "xmlport",
            ObjectKind::Profile => "profile",
            ObjectKind::PageExtension => "pageextension",
            ObjectKind::PageCustomization => "pagecustomization",
            ObjectKind::TableExtension => "tableextension",
            ObjectKind::ControlAddIn => "controladdin",
            ObjectKind::EnumType => "enum",
            ObjectKind::DotNetPackage => "dotnet",
        }
    }

    /// Looks up a kind by its source keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_source_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.source_keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}
