//! Resource naming
//!
//! Validated newtypes for the two externally constrained names this crate
//! handles: storage bucket names and deployment region identifiers. The
//! provisioning engine re-validates both authoritatively at deploy time;
//! validating here surfaces typos before a template is ever synthesized.

use std::fmt;
use std::str::FromStr;

/// A validated storage bucket name.
///
/// Bucket names are 3 to 63 characters of lowercase letters, digits,
/// hyphens and dots, and must start and end with a letter or digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

/// Error type for invalid bucket names.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid bucket name format")]
pub struct BucketNameError {
    _priv: (),
}

impl BucketName {
    /// Creates a new `BucketName` from a string, validating the format.
    ///
    /// # Errors
    /// Returns `BucketNameError` if the name doesn't satisfy the bucket
    /// naming rules.
    ///
    /// # Examples
    /// ```
    /// # use backplane::naming::BucketName;
    /// let name = BucketName::new("demo-bucket").unwrap();
    /// assert_eq!(name.as_str(), "demo-bucket");
    ///
    /// assert!(BucketName::new("Demo-Bucket").is_err());
    /// assert!(BucketName::new("ab").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, BucketNameError> {
        if is_valid_bucket_name(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(BucketNameError { _priv: () })
        }
    }

    /// Creates a new `BucketName` without validation.
    ///
    /// The caller must ensure the string is a valid bucket name, e.g.
    /// when it comes from a source that has already been validated.
    #[must_use]
    pub fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    /// Returns the bucket name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `BucketName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for BucketName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BucketName {
    type Err = BucketNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Validates a storage bucket name.
///
/// # Examples
/// ```
/// # use backplane::naming::is_valid_bucket_name;
/// assert!(is_valid_bucket_name("demo-bucket"));
/// assert!(is_valid_bucket_name("media.assets-01"));
/// assert!(!is_valid_bucket_name(""));
/// assert!(!is_valid_bucket_name("Demo"));
/// assert!(!is_valid_bucket_name("-leading-hyphen"));
/// assert!(!is_valid_bucket_name("double..dot"));
/// ```
#[must_use]
pub fn is_valid_bucket_name(s: &str) -> bool {
    let bytes = s.as_bytes();

    if !(3..=63).contains(&bytes.len()) {
        return false;
    }

    // Must start and end with a letter or digit
    if !bytes[0].is_ascii_lowercase() && !bytes[0].is_ascii_digit() {
        return false;
    }
    if !bytes[bytes.len() - 1].is_ascii_lowercase() && !bytes[bytes.len() - 1].is_ascii_digit() {
        return false;
    }

    for &b in bytes {
        if !b.is_ascii_lowercase() && !b.is_ascii_digit() && b != b'-' && b != b'.' {
            return false;
        }
    }

    // Dots delimit labels; empty labels are not allowed
    if s.contains("..") || s.contains(".-") || s.contains("-.") {
        return false;
    }

    true
}

/// A validated deployment region identifier.
///
/// Regions typically follow the pattern `{geo}-{location}-{number}`
/// (e.g. `us-east-1`), with special cases like `us-gov-west-1`; single
/// words such as `local` are accepted for non-cloud engines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region(String);

/// Error type for invalid region strings.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid region format")]
pub struct RegionError {
    _priv: (),
}

impl Region {
    /// Creates a new `Region` from a string, validating the format.
    ///
    /// # Errors
    /// Returns `RegionError` if the region string doesn't match expected
    /// patterns.
    ///
    /// # Examples
    /// ```
    /// # use backplane::naming::Region;
    /// let region = Region::new("us-east-1").unwrap();
    /// assert_eq!(region.as_str(), "us-east-1");
    ///
    /// assert!(Region::new("invalid region").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, RegionError> {
        if is_valid_region(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(RegionError { _priv: () })
        }
    }

    /// Returns the region as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Region {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Region {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Validates a region identifier.
///
/// # Examples
/// ```
/// # use backplane::naming::is_valid_region;
/// assert!(is_valid_region("us-east-1"));
/// assert!(is_valid_region("local"));
/// assert!(!is_valid_region(""));
/// assert!(!is_valid_region("Us-East-1"));
/// ```
#[must_use]
pub fn is_valid_region(s: &str) -> bool {
    let bytes = s.as_bytes();

    let Some(&first) = bytes.first() else { return false };
    if !first.is_ascii_lowercase() {
        return false;
    }

    for &b in bytes {
        if !b.is_ascii_lowercase() && !b.is_ascii_digit() && b != b'-' {
            return false;
        }
    }

    // Must not start or end with a hyphen, nor repeat them
    if s.starts_with('-') || s.ends_with('-') || s.contains("--") {
        return false;
    }

    true
}
