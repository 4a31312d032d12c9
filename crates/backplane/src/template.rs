//! Synthesized templates
//!
//! A [`Template`] is the serialized form of a stack: the full resource
//! graph plus its published outputs, rendered once per synthesis and
//! handed to the provisioning engine for reconciliation. Both maps
//! preserve insertion order so repeated synthesis is byte-identical.

use crate::error::Result;
use crate::resource::{RemovalPolicy, Resource};

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Template format version understood by the engine.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A deferred reference into the resource graph.
///
/// Like the identity token in policy text, these are opaque placeholders
/// the engine resolves during reconciliation; the crate never resolves
/// them locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// The engine-assigned identifier of a declared resource.
    Ref(String),
    /// A named attribute of a declared resource.
    GetAtt(String, String),
}

impl Token {
    /// A reference to the resource declared under `logical_id`.
    #[must_use]
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Self::Ref(logical_id.into())
    }

    /// The `attribute` of the resource declared under `logical_id`.
    #[must_use]
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt(logical_id.into(), attribute.into())
    }

    /// The region the stack is deployed into, as an engine pseudo
    /// parameter.
    #[must_use]
    pub fn region() -> Self {
        Self::Ref("AWS::Region".to_owned())
    }

    /// Renders the token as a JSON value in the engine's intrinsic shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Ref(id) => serde_json::json!({ "Ref": id }),
            Self::GetAtt(id, attribute) => serde_json::json!({ "Fn::GetAtt": [id, attribute] }),
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ref(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", id)?;
                map.end()
            }
            Self::GetAtt(id, attribute) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[id.as_str(), attribute.as_str()])?;
                map.end()
            }
        }
    }
}

/// The value published by a stack output: either a literal known at
/// synthesis time or a deferred reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputValue {
    /// A value known when the template is synthesized.
    Literal(String),
    /// A value assigned by the engine during reconciliation.
    Token(Token),
}

impl From<&str> for OutputValue {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_owned())
    }
}

impl From<String> for OutputValue {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Token> for OutputValue {
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

/// A named value published for downstream clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    /// Optional human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The published value.
    pub value: OutputValue,
}

impl Output {
    /// Creates an output with no description.
    #[must_use]
    pub fn new(value: impl Into<OutputValue>) -> Self {
        Self { description: None, value: value.into() }
    }
}

/// A resource declaration plus its entry-level disposition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceEntry {
    /// The typed declaration.
    #[serde(flatten)]
    pub resource: Resource,
    /// What the engine does with the live resource when the declaration
    /// is removed.
    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<RemovalPolicy>,
}

impl ResourceEntry {
    /// Wraps a declaration with no explicit deletion policy.
    #[must_use]
    pub fn new(resource: impl Into<Resource>) -> Self {
        Self { resource: resource.into(), deletion_policy: None }
    }
}

/// The serialized form of a stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    /// Template format version.
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    /// Optional stack description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared resources by logical id.
    pub resources: IndexMap<String, ResourceEntry>,
    /// Published outputs by name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub outputs: IndexMap<String, Output>,
}

impl Template {
    /// Renders the template as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders the template as compact JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
