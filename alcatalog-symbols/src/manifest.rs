//! Wire format of `SymbolReference.json`.
//!
//! The manifest groups objects into one named collection per kind and does
//! not carry a kind on the objects themselves. These structs mirror that
//! layout; `SymbolPackage` converts them into kind-tagged `DeclaredObject`s.
//! Fields the catalog has no use for (properties, fields, controls) are
//! ignored on read.

use alcatalog_types::{AttributeTag, DeclaredObject, MethodDecl, ObjectKind, ParameterDecl};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SymbolManifest {
    #[serde(default, alias = "appId")]
    pub app_id: Uuid,
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde(default, alias = "publisher")]
    pub publisher: String,
    #[serde(default, alias = "version")]
    pub version: String,
    #[serde(default, alias = "tables", skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<RawObject>,
    #[serde(default, alias = "pages", skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<RawObject>,
    #[serde(default, alias = "reports", skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<RawObject>,
    #[serde(default, alias = "codeunits", skip_serializing_if = "Vec::is_empty")]
    pub codeunits: Vec<RawObject>,
    #[serde(default, alias = "queries", skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<RawObject>,
    #[serde(default, alias = "xmlPorts", skip_serializing_if = "Vec::is_empty")]
    pub xml_ports: Vec<RawObject>,
    #[serde(default, alias = "profiles", skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<RawObject>,
    #[serde(default, alias = "pageExtensions", skip_serializing_if = "Vec::is_empty")]
    pub page_extensions: Vec<RawObject>,
    #[serde(default, alias = "pageCustomizations", skip_serializing_if = "Vec::is_empty")]
    pub page_customizations: Vec<RawObject>,
    #[serde(default, alias = "tableExtensions", skip_serializing_if = "Vec::is_empty")]
    pub table_extensions: Vec<RawObject>,
    #[serde(default, alias = "controlAddIns", skip_serializing_if = "Vec::is_empty")]
    pub control_add_ins: Vec<RawObject>,
    #[serde(default, alias = "enumTypes", skip_serializing_if = "Vec::is_empty")]
    pub enum_types: Vec<RawObject>,
    #[serde(default, alias = "dotNetPackages", skip_serializing_if = "Vec::is_empty")]
    pub dot_net_packages: Vec<RawObject>,
}

impl SymbolManifest {
    /// The collection that holds objects of `kind`.
    pub fn collection_mut(&mut self, kind: ObjectKind) -> &mut Vec<RawObject> {
        match kind {
            ObjectKind::Table => &mut self.tables,
            ObjectKind::Page => &mut self.pages,
            ObjectKind::Report => &mut self.reports,
            ObjectKind::Codeunit => &mut self.codeunits,
            ObjectKind::Query => &mut self.queries,
            ObjectKind::XmlPort => &mut self.xml_ports,
            ObjectKind::Profile => &mut self.profiles,
            ObjectKind::PageExtension => &mut self.page_extensions,
            ObjectKind::PageCustomization => &mut self.page_customizations,
            ObjectKind::TableExtension => &mut self.table_extensions,
            ObjectKind::ControlAddIn => &mut self.control_add_ins,
            ObjectKind::EnumType => &mut self.enum_types,
            ObjectKind::DotNetPackage => &mut self.dot_net_packages,
        }
    }

    /// Drains the collection for `kind`, tagging each object with it.
    pub fn take_objects(&mut self, kind: ObjectKind) -> Vec<DeclaredObject> {
        std::mem::take(self.collection_mut(kind))
            .into_iter()
            .map(|raw| raw.into_declared(kind))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawObject {
    #[serde(default, alias = "id")]
    pub id: i64,
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde(default, alias = "methods", skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<RawMethod>,
}

impl RawObject {
    fn into_declared(self, kind: ObjectKind) -> DeclaredObject {
        DeclaredObject {
            kind,
            id: self.id,
            name: self.name,
            methods: self.methods.into_iter().map(MethodDecl::from).collect(),
        }
    }
}

impl From<&DeclaredObject> for RawObject {
    fn from(object: &DeclaredObject) -> Self {
        Self {
            id: object.id,
            name: object.name.clone(),
            methods: object.methods.iter().map(RawMethod::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawMethod {
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde(default, alias = "attributes", skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<RawAttribute>,
    #[serde(default, alias = "parameters", skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RawParameter>,
}

impl From<RawMethod> for MethodDecl {
    fn from(raw: RawMethod) -> Self {
        MethodDecl {
            name: raw.name,
            attributes: raw.attributes.into_iter().map(AttributeTag::from).collect(),
            parameters: raw.parameters.into_iter().map(ParameterDecl::from).collect(),
        }
    }
}

impl From<&MethodDecl> for RawMethod {
    fn from(method: &MethodDecl) -> Self {
        Self {
            name: method.name.clone(),
            attributes: method.attributes.iter().map(RawAttribute::from).collect(),
            parameters: method.parameters.iter().map(RawParameter::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawAttribute {
    #[serde(default, alias = "name")]
    pub name: String,
    /// Arguments are objects of the form `{"Value": "false"}`.
    #[serde(default, alias = "arguments", skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Value>,
}

impl From<RawAttribute> for AttributeTag {
    fn from(raw: RawAttribute) -> Self {
        AttributeTag {
            name: raw.name,
            arguments: raw.arguments.iter().map(argument_text).collect(),
        }
    }
}

impl From<&AttributeTag> for RawAttribute {
    fn from(tag: &AttributeTag) -> Self {
        Self {
            name: tag.name.clone(),
            arguments: tag
                .arguments
                .iter()
                .map(|a| serde_json::json!({ "Value": a }))
                .collect(),
        }
    }
}

fn argument_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("Value") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawParameter {
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde(default, alias = "isVar")]
    pub is_var: bool,
    #[serde(default, alias = "typeDefinition")]
    pub type_definition: RawTypeDefinition,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawTypeDefinition {
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde(default, alias = "subtype", skip_serializing_if = "Option::is_none")]
    pub subtype: Option<RawSubtype>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawSubtype {
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde(default, alias = "id")]
    pub id: i64,
}

impl From<RawParameter> for ParameterDecl {
    fn from(raw: RawParameter) -> Self {
        let type_name = match raw.type_definition.subtype {
            Some(sub) if !sub.name.is_empty() => {
                format!("{} \"{}\"", raw.type_definition.name, sub.name)
            }
            _ => raw.type_definition.name,
        };
        ParameterDecl {
            name: raw.name,
            type_name,
            is_var: raw.is_var,
        }
    }
}

impl From<&ParameterDecl> for RawParameter {
    fn from(param: &ParameterDecl) -> Self {
        let type_definition = match param.type_name.split_once(' ') {
            Some((name, subtype)) => RawTypeDefinition {
                name: name.to_string(),
                subtype: Some(RawSubtype {
                    name: subtype.trim().trim_matches('"').to_string(),
                    id: 0,
                }),
            },
            None => RawTypeDefinition {
                name: param.type_name.clone(),
                subtype: None,
            },
        };
        Self {
            name: param.name.clone(),
            is_var: param.is_var,
            type_definition,
        }
    }
}
