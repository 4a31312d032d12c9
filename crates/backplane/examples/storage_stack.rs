//! Manual stack assembly example
//!
//! Declares a minimal identity + scoped-storage backend by hand, without
//! going through the prebuilt application stack, and prints the
//! synthesized template.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example storage_stack
//! ```

use backplane::naming::BucketName;
use backplane::policy::storage::{IdentityRole, StorageAccessPolicy};
use backplane::resource::{Bucket, CorsRule, IdentityPool, ManagedPolicy, RemovalPolicy};
use backplane::stack::StackBuilder;

fn main() -> backplane::Result<()> {
    let bucket_name = BucketName::new("example-assets").unwrap();

    let mut builder = StackBuilder::new("storage-example");
    builder.set_description("Example scoped-storage backend");

    let identity_pool = builder.add_identity_pool(
        "IdentityPool",
        IdentityPool::new("storage-example-identities").allow_unauthenticated(true),
    )?;

    builder.add_bucket(
        "AssetBucket",
        Bucket::new(&bucket_name)
            .with_removal_policy(RemovalPolicy::Destroy)
            .with_cors_rule(CorsRule::browser_defaults("http://localhost:3000")),
    )?;

    let access = StorageAccessPolicy::for_bucket(&bucket_name);
    builder.add_managed_policy(
        "UnauthenticatedStoragePolicy",
        ManagedPolicy::new(access.unauthenticated().clone())
            .attached_to(identity_pool.role(IdentityRole::Unauthenticated)),
    )?;
    builder.add_managed_policy(
        "AuthenticatedStoragePolicy",
        ManagedPolicy::new(access.authenticated().clone())
            .attached_to(identity_pool.role(IdentityRole::Authenticated)),
    )?;

    builder.add_output("BucketName", bucket_name.as_str())?;

    let template = builder.build().synth();
    println!("{}", template.to_json_pretty()?);
    Ok(())
}
