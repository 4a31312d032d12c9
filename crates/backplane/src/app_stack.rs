//! The application backend stack
//!
//! Declares the full backend an asset-storage client application needs:
//! a user directory with self sign-up, a federated identity pool allowing
//! guest access, a CORS-enabled asset bucket partitioned into the three
//! access tiers, the per-role storage permission documents, and the
//! outputs downstream clients read at startup.

use crate::error::Result;
use crate::naming::{BucketName, Region};
use crate::policy::storage::{AccessTier, IdentityRole, StorageAccessPolicy};
use crate::policy::{Principal, Statement, actions};
use crate::resource::{
    AccountRecovery, AutoVerify, Bucket, CorsRule, IdentityPool, ManagedPolicy, RemovalPolicy, StandardAttribute,
    StandardAttributes, UserPool, UserPoolClient, UserPoolGroup, UserVerification, VerificationEmailStyle,
};
use crate::stack::{Stack, StackBuilder};
use crate::template::{OutputValue, Token};
use crate::arn;

/// Configuration of the application backend stack.
#[derive(Debug, Clone)]
pub struct AppStackConfig {
    /// The stack name.
    pub stack_name: String,
    /// Name of the asset bucket.
    pub bucket_name: BucketName,
    /// The single browser origin allowed to call the bucket.
    pub allowed_origin: String,
    /// Deployment region recorded in the outputs. When absent, the
    /// region output is published as an engine pseudo parameter.
    pub region: Option<Region>,
}

impl AppStackConfig {
    /// Creates a configuration with the default stack name and origin.
    #[must_use]
    pub fn new(bucket_name: BucketName) -> Self {
        Self {
            stack_name: "app-backend".to_owned(),
            bucket_name,
            allowed_origin: "http://localhost:3000".to_owned(),
            region: None,
        }
    }
}

/// Declares the application backend stack.
///
/// # Errors
/// Returns an error if any derived logical id or output name collides,
/// which cannot happen for a well-formed configuration.
pub fn app_backend_stack(config: &AppStackConfig) -> Result<Stack> {
    let mut builder = StackBuilder::new(config.stack_name.clone());
    builder.set_description(format!("Identity and scoped-storage backend for {}", config.bucket_name));
    if let Some(region) = &config.region {
        builder.set_region(region.clone());
    }

    let user_pool = builder.add_user_pool("UserPool", app_user_pool())?;
    builder.add_user_pool_group(
        "AdminGroup",
        UserPoolGroup::new(user_pool.clone(), "Admin").with_description("Administrator users of the application"),
    )?;
    let client = builder.add_user_pool_client("UserPoolClient", UserPoolClient::new(user_pool.clone()))?;

    let identity_pool = builder.add_identity_pool(
        "IdentityPool",
        IdentityPool::new(format!("{}-identities", config.stack_name))
            .allow_unauthenticated(true)
            .with_user_pool_provider(user_pool.clone(), client.clone()),
    )?;

    builder.add_bucket("AssetBucket", asset_bucket(config))?;

    let access = StorageAccessPolicy::for_bucket(&config.bucket_name);
    builder.add_managed_policy(
        "UnauthenticatedStoragePolicy",
        ManagedPolicy::new(access.unauthenticated().clone())
            .with_description("Scoped storage access for unauthenticated identities")
            .attached_to(identity_pool.role(IdentityRole::Unauthenticated)),
    )?;
    builder.add_managed_policy(
        "AuthenticatedStoragePolicy",
        ManagedPolicy::new(access.authenticated().clone())
            .with_description("Scoped storage access for authenticated identities")
            .attached_to(identity_pool.role(IdentityRole::Authenticated)),
    )?;

    let region_output: OutputValue = match &config.region {
        Some(region) => region.as_str().into(),
        None => Token::region().into(),
    };
    builder.add_output("BucketName", config.bucket_name.as_str())?;
    builder.add_output("BucketRegion", region_output)?;
    builder.add_output("UserPoolId", user_pool)?;
    builder.add_output("UserPoolClientId", client)?;
    builder.add_output("IdentityPoolId", identity_pool.pool())?;

    Ok(builder.build())
}

fn app_user_pool() -> UserPool {
    UserPool {
        self_sign_up_enabled: true,
        account_recovery: AccountRecovery::PhoneAndEmail,
        user_verification: UserVerification {
            email_style: VerificationEmailStyle::Code,
        },
        auto_verify: AutoVerify { email: true, phone: false },
        standard_attributes: Some(StandardAttributes {
            email: Some(StandardAttribute { required: true, mutable: true }),
            phone_number: None,
        }),
    }
}

fn asset_bucket(config: &AppStackConfig) -> Bucket {
    let mut bucket = Bucket::new(&config.bucket_name)
        .with_removal_policy(RemovalPolicy::Destroy)
        .with_auto_delete_objects(true)
        .with_cors_rule(CorsRule::browser_defaults(config.allowed_origin.clone()));

    // Anyone, signed in or not, may fetch public objects directly.
    bucket.add_to_resource_policy(
        Statement::allow(
            [actions::GET_OBJECT],
            [arn::object_arn(config.bucket_name.as_str(), &AccessTier::Public.any_object())],
        )
        .with_principal(Principal::any()),
    );
    bucket
}
