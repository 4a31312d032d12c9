//! Declarative identity and scoped-storage stack definitions
//!
//! `backplane` declares the cloud backend of an asset-storage
//! application (a user directory, a federated identity pool, and an
//! object bucket with tiered access policies) as plain data, and
//! synthesizes the declared graph into a JSON template for an external
//! provisioning engine. The crate performs no runtime work itself: it
//! provisions nothing, evaluates no policy, and resolves no deferred
//! token. Everything it produces is reconciled against live
//! infrastructure by the engine.
//!
//! # The access model
//!
//! The one non-trivial piece of logic is the scoped storage-access
//! policy in [`policy::storage`]: a bucket is partitioned into
//! `public/`, `protected/{identity}/` and `private/{identity}/` tiers,
//! and two permission documents are derived from the bucket name: one
//! for unauthenticated guests (read and list over the shared tiers), one
//! for authenticated identities (writes scoped to the caller's own
//! segments, reads open across `protected/`). The caller's identity
//! stays a deferred token ([`policy::storage::IDENTITY_SUB`]) that the
//! enforcement layer substitutes per request.
//!
//! # Example
//!
//! ```
//! use backplane::naming::BucketName;
//! use backplane::policy::storage::{IdentityRole, StorageAccessPolicy};
//! use backplane::{AppStackConfig, app_backend_stack};
//!
//! // Derive the per-role permission documents for a bucket.
//! let bucket = BucketName::new("demo-bucket").unwrap();
//! let access = StorageAccessPolicy::for_bucket(&bucket);
//! assert_eq!(access.document(IdentityRole::Unauthenticated).statement.len(), 3);
//!
//! // Or declare the whole application backend and synthesize it.
//! let stack = app_backend_stack(&AppStackConfig::new(bucket)).unwrap();
//! let template = stack.synth();
//! assert!(template.outputs.contains_key("IdentityPoolId"));
//! ```
//!
//! # Modules
//!
//! - [`policy`]: permission documents and the scoped storage-access model
//! - [`resource`]: typed resource declarations
//! - [`stack`]: stack assembly and synthesis
//! - [`template`]: the synthesized template and deferred references
//! - [`naming`]: validated bucket and region names
//! - [`arn`]: resource ARN formatting

mod app_stack;
mod error;

pub mod arn;
pub mod naming;
pub mod policy;
pub mod resource;
pub mod stack;
pub mod template;

pub use self::app_stack::{AppStackConfig, app_backend_stack};
pub use self::error::{Error, Result};
pub use self::naming::{BucketName, BucketNameError, Region, RegionError};
pub use self::policy::storage::{IDENTITY_SUB, IdentityRole, StorageAccessPolicy};
pub use self::policy::{PolicyDocument, Statement};
pub use self::stack::{Stack, StackBuilder};
pub use self::template::{Template, Token};
