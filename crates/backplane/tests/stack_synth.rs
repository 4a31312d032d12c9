//! Integration tests for stack assembly and template synthesis.

use backplane::naming::{BucketName, Region};
use backplane::{AppStackConfig, app_backend_stack};

use serde_json::Value;

fn demo_config() -> AppStackConfig {
    AppStackConfig::new(BucketName::new("demo-bucket").unwrap())
}

fn synth_value(config: &AppStackConfig) -> Value {
    let stack = app_backend_stack(config).unwrap();
    serde_json::to_value(stack.synth()).unwrap()
}

#[test]
fn app_stack_publishes_the_five_client_outputs() {
    let value = synth_value(&demo_config());
    let outputs = value["Outputs"].as_object().unwrap();

    for name in ["BucketName", "BucketRegion", "UserPoolId", "UserPoolClientId", "IdentityPoolId"] {
        assert!(outputs.contains_key(name), "missing output {name}");
    }
    assert_eq!(outputs["BucketName"]["Value"], "demo-bucket");
    assert_eq!(outputs["UserPoolId"]["Value"], serde_json::json!({"Ref": "UserPool"}));
    assert_eq!(outputs["IdentityPoolId"]["Value"], serde_json::json!({"Ref": "IdentityPool"}));
}

#[test]
fn bucket_region_output_follows_the_configuration() {
    let value = synth_value(&demo_config());
    assert_eq!(value["Outputs"]["BucketRegion"]["Value"], serde_json::json!({"Ref": "AWS::Region"}));

    let mut config = demo_config();
    config.region = Some(Region::new("us-east-1").unwrap());
    let value = synth_value(&config);
    assert_eq!(value["Outputs"]["BucketRegion"]["Value"], "us-east-1");
}

#[test]
fn asset_bucket_declares_cors_and_teardown() {
    let value = synth_value(&demo_config());
    let bucket = &value["Resources"]["AssetBucket"];

    assert_eq!(bucket["Type"], "AWS::S3::Bucket");
    assert_eq!(bucket["DeletionPolicy"], "Delete");
    assert_eq!(bucket["Properties"]["AutoDeleteObjects"], true);

    let rule = &bucket["Properties"]["CorsConfiguration"]["CorsRules"][0];
    assert_eq!(rule["AllowedMethods"], serde_json::json!(["GET", "POST", "PUT", "DELETE"]));
    assert_eq!(rule["AllowedOrigins"], serde_json::json!(["http://localhost:3000"]));
    assert_eq!(rule["AllowedHeaders"], serde_json::json!(["*"]));
}

#[test]
fn public_objects_are_world_readable_through_the_bucket_policy() {
    let value = synth_value(&demo_config());
    let policy = &value["Resources"]["AssetBucketPolicy"];

    assert_eq!(policy["Type"], "AWS::S3::BucketPolicy");
    assert_eq!(policy["Properties"]["Bucket"], serde_json::json!({"Ref": "AssetBucket"}));

    let statement = &policy["Properties"]["PolicyDocument"]["Statement"][0];
    assert_eq!(statement["Principal"], "*");
    assert_eq!(statement["Action"], serde_json::json!(["s3:GetObject"]));
    assert_eq!(statement["Resource"], serde_json::json!(["arn:aws:s3:::demo-bucket/public/*"]));
}

#[test]
fn storage_policies_attach_to_the_matching_roles() {
    let value = synth_value(&demo_config());

    let unauthenticated = &value["Resources"]["UnauthenticatedStoragePolicy"];
    assert_eq!(unauthenticated["Type"], "AWS::IAM::ManagedPolicy");
    assert_eq!(
        unauthenticated["Properties"]["Roles"],
        serde_json::json!([{"Ref": "IdentityPoolUnauthenticatedRole"}])
    );

    let authenticated = &value["Resources"]["AuthenticatedStoragePolicy"];
    assert_eq!(
        authenticated["Properties"]["Roles"],
        serde_json::json!([{"Ref": "IdentityPoolAuthenticatedRole"}])
    );

    // The attached documents are the scoped-access documents.
    let statements = unauthenticated["Properties"]["PolicyDocument"]["Statement"].as_array().unwrap();
    assert_eq!(statements.len(), 3);
    let statements = authenticated["Properties"]["PolicyDocument"]["Statement"].as_array().unwrap();
    assert_eq!(statements.len(), 5);
}

#[test]
fn identity_pool_roles_are_scoped_by_trust_conditions() {
    let value = synth_value(&demo_config());

    for (role_id, category) in [
        ("IdentityPoolUnauthenticatedRole", "unauthenticated"),
        ("IdentityPoolAuthenticatedRole", "authenticated"),
    ] {
        let role = &value["Resources"][role_id];
        assert_eq!(role["Type"], "AWS::IAM::Role");

        let statement = &role["Properties"]["AssumeRolePolicyDocument"]["Statement"][0];
        assert_eq!(statement["Action"], serde_json::json!(["sts:AssumeRoleWithWebIdentity"]));
        assert_eq!(statement["Principal"], serde_json::json!({"Federated": "cognito-identity.amazonaws.com"}));
        assert_eq!(
            statement["Condition"]["StringEquals"]["cognito-identity.amazonaws.com:aud"],
            serde_json::json!({"Ref": "IdentityPool"})
        );
        assert_eq!(
            statement["Condition"]["ForAnyValue:StringLike"]["cognito-identity.amazonaws.com:amr"],
            serde_json::json!([category])
        );
    }

    let attachment = &value["Resources"]["IdentityPoolRoleAttachment"];
    assert_eq!(
        attachment["Properties"]["Roles"]["authenticated"],
        serde_json::json!({"Fn::GetAtt": ["IdentityPoolAuthenticatedRole", "Arn"]})
    );
}

#[test]
fn user_pool_carries_the_sign_up_configuration() {
    let value = synth_value(&demo_config());
    let pool = &value["Resources"]["UserPool"]["Properties"];

    assert_eq!(pool["SelfSignUpEnabled"], true);
    assert_eq!(pool["AccountRecovery"], "PHONE_AND_EMAIL");
    assert_eq!(pool["UserVerification"]["EmailStyle"], "CODE");
    assert_eq!(pool["AutoVerify"]["Email"], true);
    assert_eq!(pool["StandardAttributes"]["Email"], serde_json::json!({"Required": true, "Mutable": true}));

    let group = &value["Resources"]["AdminGroup"];
    assert_eq!(group["Type"], "AWS::Cognito::UserPoolGroup");
    assert_eq!(group["Properties"]["GroupName"], "Admin");
}

#[test]
fn synthesis_is_deterministic() {
    let stack = app_backend_stack(&demo_config()).unwrap();
    let first = stack.synth().to_json().unwrap();
    let second = stack.synth().to_json().unwrap();
    assert_eq!(first, second);

    // A freshly assembled stack renders the same bytes too.
    let again = app_backend_stack(&demo_config()).unwrap().synth().to_json().unwrap();
    assert_eq!(first, again);
}
