//! ARN formatting for storage resources
//!
//! Resource patterns in permission statements reference buckets and
//! objects by ARN. Object patterns may contain wildcards and deferred
//! tokens; both are passed through verbatim for the enforcement layer to
//! resolve.

/// Returns the ARN of a storage bucket.
///
/// # Examples
/// ```
/// # use backplane::arn::bucket_arn;
/// assert_eq!(bucket_arn("demo-bucket"), "arn:aws:s3:::demo-bucket");
/// ```
#[must_use]
pub fn bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}")
}

/// Returns the ARN pattern matching objects under `pattern` in `bucket`.
///
/// # Examples
/// ```
/// # use backplane::arn::object_arn;
/// assert_eq!(object_arn("demo-bucket", "public/*"), "arn:aws:s3:::demo-bucket/public/*");
/// ```
#[must_use]
pub fn object_arn(bucket: &str, pattern: &str) -> String {
    format!("arn:aws:s3:::{bucket}/{pattern}")
}
