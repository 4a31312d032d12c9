//! Permission documents
//!
//! This module models the policy language consumed by the provisioning
//! engine: a versioned list of allow/deny statements, each scoping a set
//! of actions to resource patterns, optionally restricted by condition
//! predicates and bound to a principal.
//!
//! The crate only *constructs* these documents. Evaluation happens inside
//! the engine's access layer at request time; deferred tokens embedded in
//! resource patterns (see [`storage::IDENTITY_SUB`]) are resolved there,
//! never locally.
//!
//! # Example
//! ```
//! use backplane::policy::{Condition, PolicyDocument, Statement, actions};
//!
//! let document = PolicyDocument::new([
//!     Statement::allow([actions::GET_OBJECT], ["arn:aws:s3:::demo-bucket/public/*"]),
//!     Statement::allow([actions::LIST_BUCKET], ["arn:aws:s3:::demo-bucket"])
//!         .with_condition(Condition::new().string_like("s3:prefix", ["public/", "public/*"])),
//! ]);
//! assert_eq!(document.statement.len(), 2);
//! ```

pub mod storage;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Policy language version understood by the engine.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Action names emitted by this crate.
pub mod actions {
    /// Read a single object.
    pub const GET_OBJECT: &str = "s3:GetObject";
    /// Write a single object.
    pub const PUT_OBJECT: &str = "s3:PutObject";
    /// Delete a single object.
    pub const DELETE_OBJECT: &str = "s3:DeleteObject";
    /// Enumerate the keys of a bucket.
    pub const LIST_BUCKET: &str = "s3:ListBucket";
    /// Assume a role through an identity-federation token.
    pub const ASSUME_ROLE_WITH_WEB_IDENTITY: &str = "sts:AssumeRoleWithWebIdentity";
}

/// Whether a statement grants or denies its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// The statement grants the listed actions.
    Allow,
    /// The statement denies the listed actions.
    Deny,
}

/// The principal a statement applies to.
///
/// Statements inside identity-attached documents omit the principal (it
/// is implied by the attachment); bucket resource policies and role trust
/// documents name one explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Principal {
    /// A literal principal pattern, `"*"` for any principal.
    Literal(String),
    /// An identity-federation service principal.
    Federated {
        /// The federation service, e.g. `cognito-identity.amazonaws.com`.
        #[serde(rename = "Federated")]
        federated: String,
    },
}

impl Principal {
    /// The wildcard principal matching any requester.
    #[must_use]
    pub fn any() -> Self {
        Self::Literal("*".to_owned())
    }

    /// An identity-federation service principal.
    #[must_use]
    pub fn federated(service: impl Into<String>) -> Self {
        Self::Federated { federated: service.into() }
    }
}

/// A condition block: operator, then condition key, then value.
///
/// Both maps preserve insertion order so that synthesized templates are
/// byte-stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition(IndexMap<String, IndexMap<String, Value>>);

impl Condition {
    /// Creates an empty condition block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `StringLike` predicate over a list of patterns.
    #[must_use]
    pub fn string_like<I, S>(self, key: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        self.with("StringLike", key, Value::from(patterns))
    }

    /// Adds a `StringEquals` predicate.
    #[must_use]
    pub fn string_equals(self, key: &str, value: Value) -> Self {
        self.with("StringEquals", key, value)
    }

    /// Adds a `ForAnyValue:StringLike` predicate over a list of patterns.
    #[must_use]
    pub fn for_any_value_string_like<I, S>(self, key: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        self.with("ForAnyValue:StringLike", key, Value::from(patterns))
    }

    /// Adds a predicate under an arbitrary operator.
    #[must_use]
    pub fn with(mut self, operator: &str, key: &str, value: Value) -> Self {
        self.0.entry(operator.to_owned()).or_default().insert(key.to_owned(), value);
        self
    }

    /// Returns the value recorded under `operator` and `key`, if any.
    #[must_use]
    pub fn get(&self, operator: &str, key: &str) -> Option<&Value> {
        self.0.get(operator)?.get(key)
    }

    /// Returns true if no predicate has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single permission statement.
///
/// Serializes to the engine's statement shape (`Effect`, `Principal`,
/// `Action`, `Resource`, `Condition`). Construction is pure and cannot
/// fail; malformed content is the engine's to reject at deploy time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    /// Grant or deny.
    pub effect: Effect,
    /// Explicit principal, for resource and trust policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    /// Granted or denied action names.
    pub action: Vec<String>,
    /// Resource ARN patterns. Empty for trust policies, where the
    /// resource is the role itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<String>,
    /// Further restriction on when the statement applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Statement {
    /// Creates an `Allow` statement over the given actions and resources.
    #[must_use]
    pub fn allow<A, R, S, T>(actions: A, resources: R) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            effect: Effect::Allow,
            principal: None,
            action: actions.into_iter().map(Into::into).collect(),
            resource: resources.into_iter().map(Into::into).collect(),
            condition: None,
        }
    }

    /// Attaches a condition block to the statement.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Binds the statement to an explicit principal.
    #[must_use]
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }
}

/// A versioned list of permission statements.
///
/// Statement order is irrelevant to the evaluator (statements form an
/// unordered allow-set); it is nevertheless preserved so that repeated
/// synthesis produces identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Policy language version.
    pub version: String,
    /// The statements of the document.
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    /// Creates a document from a list of statements.
    #[must_use]
    pub fn new(statements: impl IntoIterator<Item = Statement>) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: statements.into_iter().collect(),
        }
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new([])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn statement_serializes_to_engine_shape() {
        let statement = Statement::allow([actions::GET_OBJECT], ["arn:aws:s3:::b/public/*"])
            .with_principal(Principal::any());

        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(
            value,
            json!({
                "Effect": "Allow",
                "Principal": "*",
                "Action": ["s3:GetObject"],
                "Resource": ["arn:aws:s3:::b/public/*"],
            })
        );
    }

    #[test]
    fn condition_serializes_operator_then_key() {
        let statement = Statement::allow([actions::LIST_BUCKET], ["arn:aws:s3:::b"])
            .with_condition(Condition::new().string_like("s3:prefix", ["public/", "public/*"]));

        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(
            value["Condition"],
            json!({"StringLike": {"s3:prefix": ["public/", "public/*"]}})
        );
    }

    #[test]
    fn federated_principal_shape() {
        let value = serde_json::to_value(Principal::federated("cognito-identity.amazonaws.com")).unwrap();
        assert_eq!(value, json!({"Federated": "cognito-identity.amazonaws.com"}));
    }

    #[test]
    fn document_roundtrips() {
        let document = PolicyDocument::new([Statement::allow([actions::GET_OBJECT], ["arn:aws:s3:::b/public/*"])]);
        let text = serde_json::to_string(&document).unwrap();
        let parsed: PolicyDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, document);
        assert_eq!(parsed.version, POLICY_VERSION);
    }
}
