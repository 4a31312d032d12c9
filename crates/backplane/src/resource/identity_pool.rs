//! Federated identity pool declarations.
//!
//! An identity pool exchanges user-directory sign-ins (or anonymous
//! guests) for temporary role credentials. Each pool is backed by two
//! assumable roles, one per identity category; their trust documents and
//! the pool-to-role mapping are synthesized alongside the pool itself by
//! [`StackBuilder::add_identity_pool`](crate::stack::StackBuilder::add_identity_pool).

use crate::policy::storage::IdentityRole;
use crate::policy::{Condition, PolicyDocument, Principal, Statement, actions};
use crate::template::Token;

use serde::Serialize;

/// The identity-federation service principal trusted by pool roles.
pub const FEDERATION_SERVICE: &str = "cognito-identity.amazonaws.com";

/// A federated identity pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentityPool {
    /// The pool name.
    pub identity_pool_name: String,
    /// Whether guests may obtain unauthenticated credentials.
    pub allow_unauthenticated_identities: bool,
    /// User-directory sign-in providers backing the pool.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cognito_identity_providers: Vec<IdentityProvider>,
}

impl IdentityPool {
    /// Creates a pool with no providers and guests disallowed.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity_pool_name: name.into(),
            allow_unauthenticated_identities: false,
            cognito_identity_providers: Vec::new(),
        }
    }

    /// Allows or forbids unauthenticated guest identities.
    #[must_use]
    pub fn allow_unauthenticated(mut self, allow: bool) -> Self {
        self.allow_unauthenticated_identities = allow;
        self
    }

    /// Adds a user-directory provider.
    #[must_use]
    pub fn with_user_pool_provider(mut self, user_pool: Token, client: Token) -> Self {
        self.cognito_identity_providers.push(IdentityProvider {
            provider_name: user_pool,
            client_id: client,
        });
        self
    }
}

/// A user-directory sign-in provider entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentityProvider {
    /// The backing user directory.
    pub provider_name: Token,
    /// The application client within the directory.
    pub client_id: Token,
}

/// An assumable identity role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Role {
    /// The trust document: who may assume this role, and when.
    pub assume_role_policy_document: PolicyDocument,
    /// Optional human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Role {
    /// Creates a role with the given trust document.
    #[must_use]
    pub fn new(assume_role_policy_document: PolicyDocument) -> Self {
        Self { assume_role_policy_document, description: None }
    }

    /// Sets the role description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Builds the trust document for one of an identity pool's roles.
///
/// The document trusts the federation service to assume the role via a
/// web-identity token, but only for identities of the given pool (the
/// `aud` claim, referenced through the pool's deferred token) and of the
/// given category (the `amr` claim).
#[must_use]
pub fn assume_role_document(identity_pool: &Token, role: IdentityRole) -> PolicyDocument {
    let statement = Statement::allow([actions::ASSUME_ROLE_WITH_WEB_IDENTITY], Vec::<String>::new())
        .with_principal(Principal::federated(FEDERATION_SERVICE))
        .with_condition(
            Condition::new()
                .string_equals(&format!("{FEDERATION_SERVICE}:aud"), identity_pool.to_value())
                .for_any_value_string_like(&format!("{FEDERATION_SERVICE}:amr"), [role.as_str()]),
        );
    PolicyDocument::new([statement])
}

/// The identity pool to role mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleAttachment {
    /// The pool whose identities assume the mapped roles.
    pub identity_pool_id: Token,
    /// The role for each identity category.
    pub roles: RoleMapping,
}

/// Role references by identity category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub struct RoleMapping {
    /// Role assumed by guest identities.
    pub unauthenticated: Token,
    /// Role assumed by signed-in identities.
    pub authenticated: Token,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn trust_document_scopes_pool_and_category() {
        let pool = Token::reference("IdentityPool");
        let document = assume_role_document(&pool, IdentityRole::Authenticated);

        let [statement] = &document.statement[..] else {
            panic!("expected a single trust statement");
        };
        assert_eq!(statement.action, vec![actions::ASSUME_ROLE_WITH_WEB_IDENTITY.to_owned()]);
        assert!(statement.resource.is_empty());

        let condition = statement.condition.as_ref().unwrap();
        assert_eq!(
            condition.get("StringEquals", "cognito-identity.amazonaws.com:aud"),
            Some(&json!({"Ref": "IdentityPool"}))
        );
        assert_eq!(
            condition.get("ForAnyValue:StringLike", "cognito-identity.amazonaws.com:amr"),
            Some(&json!(["authenticated"]))
        );
    }
}
