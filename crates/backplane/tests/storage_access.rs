//! Integration tests for the scoped storage-access model.

use backplane::policy::PolicyDocument;
use backplane::policy::storage::{IDENTITY_SUB, IdentityRole, StorageAccessPolicy};
use backplane::{BucketName, arn};

use std::collections::{BTreeMap, BTreeSet};

const BUCKET_NAMES: &[&str] = &["demo-bucket", "media.assets-01", "abc"];

fn policy_for(name: &str) -> StorageAccessPolicy {
    StorageAccessPolicy::for_bucket(&BucketName::new(name).unwrap())
}

/// Union of granted actions per resource pattern.
fn actions_by_resource(document: &PolicyDocument) -> BTreeMap<String, BTreeSet<String>> {
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for statement in &document.statement {
        for resource in &statement.resource {
            map.entry(resource.clone()).or_default().extend(statement.action.iter().cloned());
        }
    }
    map
}

/// The prefix set of the document's bucket-enumeration condition.
fn list_condition_prefixes(document: &PolicyDocument) -> BTreeSet<String> {
    document
        .statement
        .iter()
        .filter(|statement| statement.action.iter().any(|action| action == "s3:ListBucket"))
        .filter_map(|statement| statement.condition.as_ref())
        .filter_map(|condition| condition.get("StringLike", "s3:prefix"))
        .flat_map(|value| {
            value
                .as_array()
                .expect("prefix condition must be an array")
                .iter()
                .map(|prefix| prefix.as_str().expect("prefix must be a string").to_owned())
        })
        .collect()
}

#[test]
fn unauthenticated_actions_are_a_subset_per_resource() {
    for name in BUCKET_NAMES {
        let policy = policy_for(name);
        let unauthenticated = actions_by_resource(policy.unauthenticated());
        let authenticated = actions_by_resource(policy.authenticated());

        for (resource, actions) in &unauthenticated {
            let granted = authenticated
                .get(resource)
                .unwrap_or_else(|| panic!("{name}: authenticated document misses resource {resource}"));
            assert!(
                actions.is_subset(granted),
                "{name}: unauthenticated grants {actions:?} on {resource}, authenticated only {granted:?}"
            );
        }
    }
}

#[test]
fn private_paths_always_carry_the_self_token() {
    for name in BUCKET_NAMES {
        let policy = policy_for(name);
        for role in [IdentityRole::Unauthenticated, IdentityRole::Authenticated] {
            for statement in &policy.document(role).statement {
                for resource in &statement.resource {
                    if resource.contains("private/") {
                        assert!(resource.contains(IDENTITY_SUB), "unscoped private resource: {resource}");
                    }
                }
                if let Some(condition) = &statement.condition {
                    for prefix in condition
                        .get("StringLike", "s3:prefix")
                        .and_then(|value| value.as_array())
                        .into_iter()
                        .flatten()
                    {
                        let prefix = prefix.as_str().unwrap();
                        if prefix.contains("private/") {
                            assert!(prefix.contains(IDENTITY_SUB), "unscoped private prefix: {prefix}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn unauthenticated_list_prefixes_are_exact() {
    let expected: BTreeSet<String> = ["public/", "public/*", "protected/", "protected/*"]
        .iter()
        .map(ToString::to_string)
        .collect();

    for name in BUCKET_NAMES {
        let policy = policy_for(name);
        assert_eq!(list_condition_prefixes(policy.unauthenticated()), expected);
    }
}

#[test]
fn authenticated_list_prefixes_add_only_the_private_self_segment() {
    for name in BUCKET_NAMES {
        let policy = policy_for(name);
        let mut expected = list_condition_prefixes(policy.unauthenticated());
        expected.insert(format!("private/{IDENTITY_SUB}/"));
        expected.insert(format!("private/{IDENTITY_SUB}/*"));
        assert_eq!(list_condition_prefixes(policy.authenticated()), expected);
    }
}

#[test]
fn regeneration_is_idempotent() {
    for name in BUCKET_NAMES {
        let first = policy_for(name);
        let second = policy_for(name);
        assert_eq!(first, second);

        // Order-independent comparison: the evaluator treats statements
        // as an unordered allow-set.
        for role in [IdentityRole::Unauthenticated, IdentityRole::Authenticated] {
            let as_set = |policy: &StorageAccessPolicy| -> BTreeSet<String> {
                policy
                    .document(role)
                    .statement
                    .iter()
                    .map(|statement| serde_json::to_string(statement).unwrap())
                    .collect()
            };
            assert_eq!(as_set(&first), as_set(&second));
        }
    }
}

#[test]
fn demo_bucket_end_to_end_scenario() {
    let policy = policy_for("demo-bucket");
    let read_write: BTreeSet<String> = ["s3:PutObject", "s3:GetObject", "s3:DeleteObject"]
        .iter()
        .map(ToString::to_string)
        .collect();

    let own_protected = arn::object_arn("demo-bucket", &format!("protected/{IDENTITY_SUB}/*"));
    let grants_own_protected = policy.authenticated().statement.iter().any(|statement| {
        statement.resource == vec![own_protected.clone()]
            && statement.action.iter().cloned().collect::<BTreeSet<_>>() == read_write
    });
    assert!(grants_own_protected, "missing read/write grant on the caller's protected segment");

    // No statement may grant object access to another identity's private
    // segment: every private resource is parameterized by the caller's
    // own identity token.
    for statement in &policy.authenticated().statement {
        for resource in &statement.resource {
            if resource.contains("demo-bucket/private/") {
                assert!(resource.ends_with(&format!("private/{IDENTITY_SUB}/*")), "foreign private grant: {resource}");
            }
        }
    }
}

#[test]
fn documents_serialize_to_the_engine_shape() {
    let policy = policy_for("demo-bucket");
    let value = serde_json::to_value(policy.unauthenticated()).unwrap();

    assert_eq!(value["Version"], "2012-10-17");
    let statements = value["Statement"].as_array().unwrap();
    assert_eq!(statements.len(), 3);
    for statement in statements {
        assert_eq!(statement["Effect"], "Allow");
        assert!(statement["Action"].is_array());
        assert!(statement["Resource"].is_array());
        // Identity-attached documents never name a principal.
        assert!(statement.get("Principal").is_none());
    }
}
