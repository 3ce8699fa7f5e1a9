//! Declared objects as read from a symbol manifest or a source file.

use serde::{Deserialize, Serialize};

use crate::ObjectKind;

/// One declared entity: a table, page, codeunit, and so on.
///
/// Identity is `(kind, id)` within the owning application or project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredObject {
    pub kind: ObjectKind,
    /// Object number. Kinds without numbers (profiles, control add-ins) use 0.
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl DeclaredObject {
    pub fn new(kind: ObjectKind, id: i64, name: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            name: name.into(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// The `(kind, id)` pair used for equality across sources.
    #[must_use]
    pub fn identity(&self) -> (ObjectKind, i64) {
        (self.kind, self.id)
    }

    /// Methods that publish events, in declaration order.
    pub fn event_publishers(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| m.is_event_publisher())
    }
}

/// A procedure declared on an object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeTag>,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeTag) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// True if any attribute marks this method as an event source
    /// (`IntegrationEvent`, `BusinessEvent`, `InternalEvent`, ...).
    #[must_use]
    pub fn is_event_publisher(&self) -> bool {
        self.attributes.iter().any(AttributeTag::is_event)
    }
}

/// An attribute such as `[IntegrationEvent(false, false)]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeTag {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl AttributeTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_event(&self) -> bool {
        self.name.to_lowercase().contains("event")
    }
}

/// A single procedure parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDecl {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub is_var: bool,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_var: false,
        }
    }

    #[must_use]
    pub fn by_var(mut self) -> Self {
        self.is_var = true;
        self
    }
}
