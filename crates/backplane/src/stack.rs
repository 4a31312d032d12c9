//! Stack assembly and synthesis
//!
//! [`StackBuilder`] collects resource declarations and outputs under
//! unique logical ids; [`Stack::synth`] renders them into a [`Template`]
//! for the provisioning engine. Synthesis is a one-shot, synchronous
//! graph construction: no I/O, no retained state, re-derived from
//! scratch on every call.
//!
//! # Example
//! ```
//! use backplane::naming::BucketName;
//! use backplane::resource::Bucket;
//! use backplane::stack::StackBuilder;
//!
//! let mut builder = StackBuilder::new("media-backend");
//! let name = BucketName::new("media-assets").unwrap();
//! builder.add_bucket("AssetBucket", Bucket::new(&name)).unwrap();
//! builder.add_output("BucketName", name.as_str()).unwrap();
//! let template = builder.build().synth();
//! assert!(template.resources.contains_key("AssetBucket"));
//! ```

use crate::error::{Error, Result};
use crate::naming::Region;
use crate::policy::storage::IdentityRole;
use crate::resource::{
    Bucket, BucketPolicy, IdentityPool, ManagedPolicy, Resource, Role, RoleAttachment, RoleMapping, UserPool,
    UserPoolClient, UserPoolGroup, assume_role_document,
};
use crate::template::{Output, OutputValue, ResourceEntry, Template, TEMPLATE_FORMAT_VERSION, Token};

use indexmap::IndexMap;
use tracing::debug;

/// Collects declarations into a [`Stack`].
///
/// Logical ids and output names must be unique; collisions are rejected
/// at registration rather than left for the engine to report at deploy
/// time.
#[derive(Debug)]
pub struct StackBuilder {
    name: String,
    description: Option<String>,
    region: Option<Region>,
    resources: IndexMap<String, ResourceEntry>,
    outputs: IndexMap<String, Output>,
}

impl StackBuilder {
    /// Creates an empty builder for a named stack.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            region: None,
            resources: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Sets the stack description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Records the region the stack is deployed into.
    pub fn set_region(&mut self, region: Region) {
        self.region = Some(region);
    }

    /// Registers a resource under a logical id.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateLogicalId`] if the id is already taken.
    pub fn add_resource(&mut self, logical_id: &str, resource: impl Into<Resource>) -> Result<Token> {
        self.add_entry(logical_id, ResourceEntry::new(resource))
    }

    fn add_entry(&mut self, logical_id: &str, entry: ResourceEntry) -> Result<Token> {
        if self.resources.contains_key(logical_id) {
            return Err(Error::DuplicateLogicalId(logical_id.to_owned()));
        }
        self.resources.insert(logical_id.to_owned(), entry);
        Ok(Token::reference(logical_id))
    }

    /// Registers a user directory.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateLogicalId`] if the id is already taken.
    pub fn add_user_pool(&mut self, logical_id: &str, pool: UserPool) -> Result<Token> {
        self.add_resource(logical_id, pool)
    }

    /// Registers a user directory group.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateLogicalId`] if the id is already taken.
    pub fn add_user_pool_group(&mut self, logical_id: &str, group: UserPoolGroup) -> Result<Token> {
        self.add_resource(logical_id, group)
    }

    /// Registers a user directory client.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateLogicalId`] if the id is already taken.
    pub fn add_user_pool_client(&mut self, logical_id: &str, client: UserPoolClient) -> Result<Token> {
        self.add_resource(logical_id, client)
    }

    /// Registers an identity pool along with its two assumable roles and
    /// the pool-to-role mapping.
    ///
    /// The roles' trust documents scope assumption to identities of this
    /// pool and of the matching category. The returned handle exposes
    /// the role references that permission documents attach to.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateLogicalId`] if any derived id is taken.
    pub fn add_identity_pool(&mut self, logical_id: &str, pool: IdentityPool) -> Result<IdentityPoolRef> {
        let pool_token = self.add_resource(logical_id, pool)?;

        let unauthenticated_role_id = format!("{logical_id}UnauthenticatedRole");
        let authenticated_role_id = format!("{logical_id}AuthenticatedRole");
        for (role_id, role) in [
            (&unauthenticated_role_id, IdentityRole::Unauthenticated),
            (&authenticated_role_id, IdentityRole::Authenticated),
        ] {
            self.add_resource(
                role_id,
                Role::new(assume_role_document(&pool_token, role))
                    .with_description(format!("{} identities of {logical_id}", role.as_str())),
            )?;
        }

        self.add_resource(
            &format!("{logical_id}RoleAttachment"),
            RoleAttachment {
                identity_pool_id: pool_token,
                roles: RoleMapping {
                    unauthenticated: Token::get_att(&unauthenticated_role_id, "Arn"),
                    authenticated: Token::get_att(&authenticated_role_id, "Arn"),
                },
            },
        )?;

        Ok(IdentityPoolRef {
            logical_id: logical_id.to_owned(),
            unauthenticated_role_id,
            authenticated_role_id,
        })
    }

    /// Registers a bucket.
    ///
    /// The bucket's removal policy becomes the entry-level deletion
    /// policy, and any accumulated resource-policy statements become a
    /// separate bucket-policy resource under `{logical_id}Policy`.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateLogicalId`] if a derived id is taken.
    pub fn add_bucket(&mut self, logical_id: &str, mut bucket: Bucket) -> Result<Token> {
        let deletion_policy = bucket.removal_policy.take();
        let statements = std::mem::take(&mut bucket.resource_policy);

        let token = self.add_entry(
            logical_id,
            ResourceEntry {
                resource: Resource::Bucket(bucket),
                deletion_policy,
            },
        )?;

        if !statements.is_empty() {
            self.add_resource(
                &format!("{logical_id}Policy"),
                BucketPolicy {
                    bucket: token.clone(),
                    policy_document: crate::policy::PolicyDocument::new(statements),
                },
            )?;
        }

        Ok(token)
    }

    /// Registers a managed policy.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateLogicalId`] if the id is already taken.
    pub fn add_managed_policy(&mut self, logical_id: &str, policy: ManagedPolicy) -> Result<Token> {
        self.add_resource(logical_id, policy)
    }

    /// Publishes a named output for downstream clients.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateOutput`] if the name is already taken.
    pub fn add_output(&mut self, name: &str, value: impl Into<OutputValue>) -> Result<()> {
        if self.outputs.contains_key(name) {
            return Err(Error::DuplicateOutput(name.to_owned()));
        }
        self.outputs.insert(name.to_owned(), Output::new(value));
        Ok(())
    }

    /// Finalizes the builder into an immutable stack.
    #[must_use]
    pub fn build(self) -> Stack {
        debug!(
            stack = %self.name,
            resources = self.resources.len(),
            outputs = self.outputs.len(),
            "stack assembled"
        );
        Stack {
            name: self.name,
            description: self.description,
            region: self.region,
            resources: self.resources,
            outputs: self.outputs,
        }
    }
}

/// Handle to a registered identity pool and its two roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPoolRef {
    logical_id: String,
    unauthenticated_role_id: String,
    authenticated_role_id: String,
}

impl IdentityPoolRef {
    /// Reference to the pool itself.
    #[must_use]
    pub fn pool(&self) -> Token {
        Token::reference(&self.logical_id)
    }

    /// Reference to the role assumed by the given identity category.
    #[must_use]
    pub fn role(&self, role: IdentityRole) -> Token {
        match role {
            IdentityRole::Unauthenticated => Token::reference(&self.unauthenticated_role_id),
            IdentityRole::Authenticated => Token::reference(&self.authenticated_role_id),
        }
    }
}

/// An assembled, immutable stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    name: String,
    description: Option<String>,
    region: Option<Region>,
    resources: IndexMap<String, ResourceEntry>,
    outputs: IndexMap<String, Output>,
}

impl Stack {
    /// The stack name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The region the stack deploys into, if recorded.
    #[must_use]
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Renders the declared graph into a template.
    ///
    /// Pure data construction over the assembled declarations; calling it
    /// twice yields identical templates.
    #[must_use]
    pub fn synth(&self) -> Template {
        debug!(stack = %self.name, "synthesizing template");
        Template {
            format_version: TEMPLATE_FORMAT_VERSION.to_owned(),
            description: self.description.clone(),
            resources: self.resources.clone(),
            outputs: self.outputs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::naming::BucketName;

    #[test]
    fn duplicate_logical_id_is_rejected() {
        let mut builder = StackBuilder::new("test");
        let name = BucketName::new("demo-bucket").unwrap();
        builder.add_bucket("AssetBucket", Bucket::new(&name)).unwrap();

        let err = builder.add_bucket("AssetBucket", Bucket::new(&name)).unwrap_err();
        assert!(matches!(err, Error::DuplicateLogicalId(id) if id == "AssetBucket"));
    }

    #[test]
    fn duplicate_output_is_rejected() {
        let mut builder = StackBuilder::new("test");
        builder.add_output("BucketName", "demo-bucket").unwrap();

        let err = builder.add_output("BucketName", "demo-bucket").unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput(name) if name == "BucketName"));
    }

    #[test]
    fn identity_pool_expands_to_roles_and_attachment() {
        let mut builder = StackBuilder::new("test");
        let pool = builder
            .add_identity_pool("IdentityPool", IdentityPool::new("app-identities"))
            .unwrap();

        let template = builder.build().synth();
        for id in [
            "IdentityPool",
            "IdentityPoolUnauthenticatedRole",
            "IdentityPoolAuthenticatedRole",
            "IdentityPoolRoleAttachment",
        ] {
            assert!(template.resources.contains_key(id), "missing {id}");
        }
        assert_eq!(pool.role(IdentityRole::Authenticated), Token::reference("IdentityPoolAuthenticatedRole"));
    }
}
