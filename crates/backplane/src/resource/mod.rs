//! Typed resource declarations
//!
//! Every type here is an immutable configuration record. The crate does
//! not provision anything: declarations are serialized into the template
//! verbatim and reconciled against live infrastructure by the engine.
//! Each serializes as `{ "Type": ..., "Properties": ... }` under its
//! engine type name.

mod bucket;
mod identity_pool;
mod managed_policy;
mod user_pool;

pub use self::bucket::{Bucket, BucketPolicy, CorsConfiguration, CorsRule, HttpMethod, RemovalPolicy};
pub use self::identity_pool::{IdentityPool, IdentityProvider, Role, RoleAttachment, RoleMapping, assume_role_document};
pub use self::managed_policy::ManagedPolicy;
pub use self::user_pool::{
    AccountRecovery, AutoVerify, StandardAttribute, StandardAttributes, UserPool, UserPoolClient, UserPoolGroup,
    UserVerification, VerificationEmailStyle,
};

use serde::Serialize;

/// A declared resource: its engine type name and its typed properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum Resource {
    /// A user directory.
    #[serde(rename = "AWS::Cognito::UserPool")]
    UserPool(UserPool),
    /// A named group within a user directory.
    #[serde(rename = "AWS::Cognito::UserPoolGroup")]
    UserPoolGroup(UserPoolGroup),
    /// An application client of a user directory.
    #[serde(rename = "AWS::Cognito::UserPoolClient")]
    UserPoolClient(UserPoolClient),
    /// A federated identity pool.
    #[serde(rename = "AWS::Cognito::IdentityPool")]
    IdentityPool(IdentityPool),
    /// The identity pool to role mapping.
    #[serde(rename = "AWS::Cognito::IdentityPoolRoleAttachment")]
    RoleAttachment(RoleAttachment),
    /// An assumable identity role.
    #[serde(rename = "AWS::IAM::Role")]
    Role(Role),
    /// A reusable permission document attached to roles.
    #[serde(rename = "AWS::IAM::ManagedPolicy")]
    ManagedPolicy(ManagedPolicy),
    /// An object-storage bucket.
    #[serde(rename = "AWS::S3::Bucket")]
    Bucket(Bucket),
    /// A permission document attached to a bucket.
    #[serde(rename = "AWS::S3::BucketPolicy")]
    BucketPolicy(BucketPolicy),
}

macro_rules! impl_from_resource {
    ($($variant:ident => $ty:ty,)+) => {
        $(
            impl From<$ty> for Resource {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_resource! {
    UserPool => UserPool,
    UserPoolGroup => UserPoolGroup,
    UserPoolClient => UserPoolClient,
    IdentityPool => IdentityPool,
    RoleAttachment => RoleAttachment,
    Role => Role,
    ManagedPolicy => ManagedPolicy,
    Bucket => Bucket,
    BucketPolicy => BucketPolicy,
}
