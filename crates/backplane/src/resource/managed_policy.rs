//! Reusable permission documents attached to roles.

use crate::policy::PolicyDocument;
use crate::template::Token;

use serde::Serialize;

/// A permission document the engine attaches to one or more roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagedPolicy {
    /// Optional human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The permission document itself.
    pub policy_document: PolicyDocument,
    /// Roles the document is attached to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Token>,
}

impl ManagedPolicy {
    /// Creates a policy from a document, attached to nothing.
    #[must_use]
    pub fn new(policy_document: PolicyDocument) -> Self {
        Self {
            description: None,
            policy_document,
            roles: Vec::new(),
        }
    }

    /// Sets the policy description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches the policy to a role.
    #[must_use]
    pub fn attached_to(mut self, role: Token) -> Self {
        self.roles.push(role);
        self
    }
}
