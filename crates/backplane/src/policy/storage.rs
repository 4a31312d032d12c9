//! Scoped storage access
//!
//! A bucket is conceptually partitioned into three path tiers:
//!
//! - `public/`: world-readable, writable by any signed-in identity
//! - `protected/{identity}/`: readable by any signed-in identity,
//!   writable only by its owner
//! - `private/{identity}/`: readable and writable only by its owner
//!
//! [`StorageAccessPolicy`] derives, from a bucket name alone, the two
//! permission documents attached to the unauthenticated and authenticated
//! identity roles. `{identity}` is the requesting principal's own
//! identity claim, carried as the opaque [`IDENTITY_SUB`] token and
//! substituted by the enforcement layer at access time.
//!
//! Generation is pure: the same bucket name always yields structurally
//! identical documents, and nothing here can fail.

use crate::arn;
use crate::naming::BucketName;
use crate::policy::{Condition, PolicyDocument, Statement, actions};

/// Deferred-binding token for the requesting principal's own identity.
///
/// Left unexpanded in every generated document; the enforcement layer
/// resolves it per request. This crate never evaluates it.
pub const IDENTITY_SUB: &str = "${cognito-identity.amazonaws.com:sub}";

/// The visibility tier of a path prefix within a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessTier {
    /// World-readable objects under `public/`.
    Public,
    /// Owner-writable, anyone-readable objects under `protected/`.
    Protected,
    /// Owner-exclusive objects under `private/`.
    Private,
}

impl AccessTier {
    /// The tier's path prefix, with trailing slash.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Public => "public/",
            Self::Protected => "protected/",
            Self::Private => "private/",
        }
    }

    /// Key pattern matching every object in the tier, any owner.
    #[must_use]
    pub fn any_object(self) -> String {
        format!("{}*", self.prefix())
    }

    /// Key pattern matching the caller's own segment of the tier.
    #[must_use]
    pub fn own_objects(self) -> String {
        format!("{}{IDENTITY_SUB}/*", self.prefix())
    }
}

/// The category of request principal a document is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityRole {
    /// A guest request with no identity claim.
    Unauthenticated,
    /// A signed-in request carrying an identity claim.
    Authenticated,
}

impl IdentityRole {
    /// The role name as it appears in federation claims.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
        }
    }
}

/// The pair of permission documents scoping a bucket's path tiers to the
/// two identity roles.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageAccessPolicy {
    unauthenticated: PolicyDocument,
    authenticated: PolicyDocument,
}

impl StorageAccessPolicy {
    /// Derives both documents for the given bucket.
    ///
    /// Unauthenticated identities may read `public/` and `protected/`
    /// objects and enumerate those prefixes. Authenticated identities may
    /// additionally write `public/` objects, write their own `protected/`
    /// and `private/` segments, and enumerate their own `private/`
    /// segment. Protected objects stay readable across identities while
    /// writes are scoped to the owner.
    #[must_use]
    pub fn for_bucket(bucket: &BucketName) -> Self {
        let bucket_arn = arn::bucket_arn(bucket.as_str());
        let objects = |pattern: &str| arn::object_arn(bucket.as_str(), pattern);

        let read = [actions::GET_OBJECT];
        let read_write = [actions::PUT_OBJECT, actions::GET_OBJECT, actions::DELETE_OBJECT];

        let unauthenticated = PolicyDocument::new([
            Statement::allow(read, [objects(&AccessTier::Public.any_object())]),
            Statement::allow(read, [objects(&AccessTier::Protected.any_object())]),
            Statement::allow([actions::LIST_BUCKET], [bucket_arn.clone()]).with_condition(
                Condition::new().string_like("s3:prefix", Self::list_prefixes(IdentityRole::Unauthenticated)),
            ),
        ]);

        let authenticated = PolicyDocument::new([
            Statement::allow(read_write, [objects(&AccessTier::Public.any_object())]),
            Statement::allow(read_write, [objects(&AccessTier::Protected.own_objects())]),
            Statement::allow(read_write, [objects(&AccessTier::Private.own_objects())]),
            Statement::allow(read, [objects(&AccessTier::Protected.any_object())]),
            Statement::allow([actions::LIST_BUCKET], [bucket_arn]).with_condition(
                Condition::new().string_like("s3:prefix", Self::list_prefixes(IdentityRole::Authenticated)),
            ),
        ]);

        Self { unauthenticated, authenticated }
    }

    /// The exact prefix set a role may enumerate at the bucket root.
    ///
    /// Both roles may list `public/` and `protected/`; the authenticated
    /// role may additionally list its own `private/` segment.
    #[must_use]
    pub fn list_prefixes(role: IdentityRole) -> Vec<String> {
        let mut prefixes = vec![
            AccessTier::Public.prefix().to_owned(),
            AccessTier::Public.any_object(),
            AccessTier::Protected.prefix().to_owned(),
            AccessTier::Protected.any_object(),
        ];
        if role == IdentityRole::Authenticated {
            prefixes.push(format!("{}{IDENTITY_SUB}/", AccessTier::Private.prefix()));
            prefixes.push(AccessTier::Private.own_objects());
        }
        prefixes
    }

    /// The document attached to the given role.
    #[must_use]
    pub fn document(&self, role: IdentityRole) -> &PolicyDocument {
        match role {
            IdentityRole::Unauthenticated => &self.unauthenticated,
            IdentityRole::Authenticated => &self.authenticated,
        }
    }

    /// The unauthenticated-role document.
    #[must_use]
    pub fn unauthenticated(&self) -> &PolicyDocument {
        &self.unauthenticated
    }

    /// The authenticated-role document.
    #[must_use]
    pub fn authenticated(&self) -> &PolicyDocument {
        &self.authenticated
    }

    /// Consumes the policy, returning `(unauthenticated, authenticated)`.
    #[must_use]
    pub fn into_documents(self) -> (PolicyDocument, PolicyDocument) {
        (self.unauthenticated, self.authenticated)
    }
}
