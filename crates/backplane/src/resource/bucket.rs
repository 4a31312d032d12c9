//! Object-storage bucket declarations.

use crate::naming::BucketName;
use crate::policy::{PolicyDocument, Statement};
use crate::template::Token;

use serde::Serialize;

/// An object-storage bucket.
///
/// The removal policy and accumulated resource-policy statements are not
/// bucket properties; the stack builder lifts them into the entry-level
/// deletion policy and a separate [`BucketPolicy`] resource at assembly
/// time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bucket {
    /// The bucket name.
    pub bucket_name: String,
    /// Whether the engine empties the bucket before deleting it.
    pub auto_delete_objects: bool,
    /// Browser cross-origin access rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_configuration: Option<CorsConfiguration>,
    /// Disposition of the live bucket when the declaration is removed.
    #[serde(skip)]
    pub removal_policy: Option<RemovalPolicy>,
    /// Statements destined for the bucket's own permission document.
    #[serde(skip)]
    pub resource_policy: Vec<Statement>,
}

impl Bucket {
    /// Creates a bucket declaration with no CORS rules and the engine's
    /// default (retain) disposition.
    #[must_use]
    pub fn new(name: &BucketName) -> Self {
        Self {
            bucket_name: name.as_str().to_owned(),
            auto_delete_objects: false,
            cors_configuration: None,
            removal_policy: None,
            resource_policy: Vec::new(),
        }
    }

    /// Adds a cross-origin access rule.
    #[must_use]
    pub fn with_cors_rule(mut self, rule: CorsRule) -> Self {
        self.cors_configuration
            .get_or_insert_with(CorsConfiguration::default)
            .cors_rules
            .push(rule);
        self
    }

    /// Sets the disposition of the live bucket on removal.
    #[must_use]
    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = Some(policy);
        self
    }

    /// Requests that the engine empty the bucket before deletion.
    #[must_use]
    pub fn with_auto_delete_objects(mut self, auto_delete: bool) -> Self {
        self.auto_delete_objects = auto_delete;
        self
    }

    /// Appends a statement to the bucket's own permission document.
    pub fn add_to_resource_policy(&mut self, statement: Statement) {
        self.resource_policy.push(statement);
    }
}

/// Browser cross-origin access configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CorsConfiguration {
    /// The configured rules.
    pub cors_rules: Vec<CorsRule>,
}

/// A single cross-origin access rule: a fixed allow-list, not computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CorsRule {
    /// Permitted request methods.
    pub allowed_methods: Vec<HttpMethod>,
    /// Permitted origins.
    pub allowed_origins: Vec<String>,
    /// Permitted request headers, `*` for all.
    pub allowed_headers: Vec<String>,
}

impl CorsRule {
    /// A rule permitting the four browser upload/download methods from a
    /// single origin, with all headers.
    #[must_use]
    pub fn browser_defaults(origin: impl Into<String>) -> Self {
        Self {
            allowed_methods: vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete],
            allowed_origins: vec![origin.into()],
            allowed_headers: vec!["*".to_owned()],
        }
    }
}

/// HTTP methods a CORS rule may permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
    /// HTTP HEAD.
    Head,
}

/// Disposition of a live resource when its declaration is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemovalPolicy {
    /// Delete the live resource with the declaration.
    #[serde(rename = "Delete")]
    Destroy,
    /// Keep the live resource after the declaration is gone.
    Retain,
}

/// A permission document attached to a bucket rather than a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketPolicy {
    /// The bucket the document is attached to.
    pub bucket: Token,
    /// The permission document itself.
    pub policy_document: PolicyDocument,
}
