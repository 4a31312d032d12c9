//! User directory declarations.

use crate::template::Token;

use serde::Serialize;

/// A user directory holding sign-up and sign-in configuration.
///
/// All fields are plain configuration data with defaults; set what the
/// application needs and leave the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPool {
    /// Whether users may register themselves.
    ///
    /// Default: `false` (administrator-created accounts only)
    pub self_sign_up_enabled: bool,

    /// Which verified contact methods may recover an account.
    ///
    /// Default: [`AccountRecovery::EmailOnly`]
    pub account_recovery: AccountRecovery,

    /// How ownership of contact attributes is verified at sign-up.
    pub user_verification: UserVerification,

    /// Which contact attributes are verified automatically.
    pub auto_verify: AutoVerify,

    /// Constraints on the standard profile attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_attributes: Option<StandardAttributes>,
}

/// Account recovery channel selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRecovery {
    /// Recover through a verified email address only.
    #[default]
    EmailOnly,
    /// Recover through a verified phone number only.
    PhoneOnly,
    /// Prefer a verified phone number, fall back to email.
    PhoneAndEmail,
}

/// Sign-up verification configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserVerification {
    /// Style of the verification email.
    pub email_style: VerificationEmailStyle,
}

/// Style of the verification email sent at sign-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationEmailStyle {
    /// A numeric code the user types back.
    #[default]
    Code,
    /// A clickable confirmation link.
    Link,
}

/// Attributes verified automatically after sign-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoVerify {
    /// Verify the email address automatically.
    pub email: bool,
    /// Verify the phone number automatically.
    pub phone: bool,
}

/// Constraints on the standard profile attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StandardAttributes {
    /// Constraints on the email attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<StandardAttribute>,
    /// Constraints on the phone number attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<StandardAttribute>,
}

/// Constraints on a single standard attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StandardAttribute {
    /// The attribute must be supplied at sign-up.
    pub required: bool,
    /// The attribute may be changed after sign-up.
    pub mutable: bool,
}

/// A named group within a user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolGroup {
    /// The owning user directory.
    pub user_pool_id: Token,
    /// The group name.
    pub group_name: String,
    /// Optional human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UserPoolGroup {
    /// Creates a group in the given user directory.
    #[must_use]
    pub fn new(user_pool_id: Token, group_name: impl Into<String>) -> Self {
        Self {
            user_pool_id,
            group_name: group_name.into(),
            description: None,
        }
    }

    /// Sets the group description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An application client of a user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolClient {
    /// The user directory the client signs in against.
    pub user_pool_id: Token,
}

impl UserPoolClient {
    /// Creates a client for the given user directory.
    #[must_use]
    pub fn new(user_pool_id: Token) -> Self {
        Self { user_pool_id }
    }
}
