//! Registry behaviour seen from the administrative and deployment sides.

use kc_adapter::{AdapterConfigService, AdapterError};
use kc_model::{AttributeDocument, ModelValue, Operation};
use serde_json::json;

use crate::common::{
    credential_op, demo_service, deployment_op, exported, init_tracing, realm_op,
};

/// Tests the documented realm + deployment + credential scenario.
#[test]
fn test_demo_scenario_export() -> anyhow::Result<()> {
    let service = demo_service()?;

    assert_eq!(
        exported(&service, "app1")?,
        json!({
            "realm": "demo",
            "auth-server-url": "http://x",
            "ssl-required": "external",
            "resource": "app1-client",
            "credentials": {"secret": "s3cr3t"}
        })
    );
    Ok(())
}

/// Tests that the exported key order is realm, realm layer, deployment layer.
#[test]
fn test_export_key_order() -> anyhow::Result<()> {
    let service = demo_service()?;

    assert_eq!(
        service.get_json("app1")?,
        concat!(
            r#"{"realm":"demo","auth-server-url":"http://x","ssl-required":"external","#,
            r#""resource":"app1-client","credentials":{"secret":"s3cr3t"}}"#
        )
    );
    Ok(())
}

/// Tests that mutating a document after adding it does not reach the store.
#[test]
fn test_added_documents_are_copied() -> anyhow::Result<()> {
    init_tracing();
    let service = AdapterConfigService::new();
    let mut realm = AttributeDocument::new().with("ssl-required", "external");
    let mut deployment = AttributeDocument::new().with("realm", "demo");

    service.add_realm(&realm_op("demo"), &realm)?;
    service.add_secure_deployment(&deployment_op("app1"), &deployment)?;

    realm.set("ssl-required", "none");
    deployment.set("realm", "other");

    let json = exported(&service, "app1")?;
    assert_eq!(json["ssl-required"], "external");
    assert_eq!(json["realm"], "demo");
    Ok(())
}

/// Tests that deployment attributes win over realm attributes.
#[test]
fn test_deployment_overrides_realm() -> anyhow::Result<()> {
    init_tracing();
    let service = AdapterConfigService::new();
    service.add_realm(&realm_op("r"), &AttributeDocument::new().with("a", 1_i64))?;
    service.add_secure_deployment(
        &deployment_op("d"),
        &AttributeDocument::new().with("realm", "r").with("a", 2_i64),
    )?;

    assert_eq!(exported(&service, "d")?["a"], 2);
    Ok(())
}

/// Tests export of a deployment whose realm was never defined.
#[test]
fn test_undefined_realm_degrades_gracefully() -> anyhow::Result<()> {
    init_tracing();
    let service = AdapterConfigService::new();
    service.add_secure_deployment(
        &deployment_op("app1"),
        &AttributeDocument::new()
            .with("realm", "later")
            .with("resource", "app1-client"),
    )?;

    assert_eq!(
        exported(&service, "app1")?,
        json!({"realm": "later", "resource": "app1-client"})
    );

    // Defining the realm afterwards is picked up by the next export.
    service.add_realm(
        &realm_op("later"),
        &AttributeDocument::new().with("auth-server-url", "http://x"),
    )?;
    assert_eq!(exported(&service, "app1")?["auth-server-url"], "http://x");
    Ok(())
}

/// Tests add, export, remove and re-export of a credential.
#[test]
fn test_credential_lifecycle() -> anyhow::Result<()> {
    let service = demo_service()?;
    let op = credential_op("app1", "secret");

    service.update_credential(&op, "value", ModelValue::from("rotated"))?;
    assert_eq!(exported(&service, "app1")?["credentials"]["secret"], "rotated");

    service.remove_credential(&op)?;
    let json = exported(&service, "app1")?;
    assert!(json["credentials"].get("secret").is_none());
    Ok(())
}

/// Tests credential removal on a deployment that never had credentials.
#[test]
fn test_remove_credential_without_credentials_fails() -> anyhow::Result<()> {
    init_tracing();
    let service = AdapterConfigService::new();
    service.add_secure_deployment(
        &deployment_op("app1"),
        &AttributeDocument::new().with("realm", "demo"),
    )?;
    let before = service.get_json("app1")?;

    let err = service
        .remove_credential(&credential_op("app1", "secret"))
        .expect_err("no credentials sub-document");

    assert!(matches!(err, AdapterError::MissingSubdocument { .. }));
    assert_eq!(service.get_json("app1")?, before);
    Ok(())
}

/// Tests that removing unknown entities is a no-op.
#[test]
fn test_removal_is_idempotent() -> anyhow::Result<()> {
    let service = demo_service()?;
    service.add_server_deployment("auth", "/auth");
    let before = service.get_json("app1")?;

    service.remove_realm(&realm_op("ghost"))?;
    service.remove_secure_deployment(&deployment_op("ghost.war"))?;
    service.remove_server_deployment("ghost.war");

    assert_eq!(service.get_json("app1")?, before);
    assert_eq!(service.realm_names(), ["demo"]);
    assert_eq!(service.secure_deployment_names(), ["app1"]);
    assert!(service.is_keycloak_server_deployment("auth"));
    Ok(())
}

/// Tests web-context membership across add and remove.
#[test]
fn test_web_context_membership() {
    init_tracing();
    let service = AdapterConfigService::new();

    service.add_server_deployment("auth", "/auth");
    assert!(service.is_web_context_used("/auth"));
    assert!(service.is_keycloak_server_deployment("auth"));
    assert_eq!(service.get_web_context("auth").as_deref(), Some("/auth"));

    service.remove_server_deployment("auth");
    assert!(!service.is_web_context_used("/auth"));
    assert!(!service.is_keycloak_server_deployment("auth"));
    assert_eq!(service.get_web_context("auth"), None);
}

/// Tests that auth-server deployments and secure deployments are separate.
#[test]
fn test_server_deployments_are_not_secure_deployments() -> anyhow::Result<()> {
    let service = demo_service()?;
    service.add_server_deployment("auth-server.war", "auth");

    assert!(!service.is_secure_deployment("auth-server.war"));
    assert!(!service.is_keycloak_server_deployment("app1"));
    Ok(())
}

/// Tests that a second add redefines instead of failing.
#[test]
fn test_second_add_redefines() -> anyhow::Result<()> {
    let service = demo_service()?;

    service.add_realm(
        &realm_op("demo"),
        &AttributeDocument::new().with("realm-public-key", "MIIB"),
    )?;

    let json = exported(&service, "app1")?;
    assert_eq!(json["realm-public-key"], "MIIB");
    assert!(json.get("ssl-required").is_none());
    Ok(())
}

/// Tests removing a deployment and the queries that depend on it.
#[test]
fn test_removed_deployment_disappears() -> anyhow::Result<()> {
    let service = demo_service()?;

    service.remove_secure_deployment(&deployment_op("app1"))?;

    assert!(!service.is_secure_deployment("app1"));
    assert_eq!(service.get_realm_name("app1"), None);
    assert!(service.get_json("app1").is_err());
    Ok(())
}

/// Tests that an operation with an unrelated address is rejected.
#[test]
fn test_operation_without_entity_segment_fails() -> anyhow::Result<()> {
    let service = demo_service()?;
    let op = Operation::new("write-attribute", "/subsystem=keycloak".parse()?);

    let err = service
        .update_secure_deployment(&op, "resource", ModelValue::from("x"))
        .expect_err("no secure-deployment segment");

    assert!(err.is_not_found());
    assert!(err.to_string().contains("/subsystem=keycloak"));
    assert_eq!(exported(&service, "app1")?["resource"], "app1-client");
    Ok(())
}

/// Tests that an explicit credentials attribute is replaced by the deployment layer.
#[test]
fn test_deployment_credentials_replace_realm_credentials() -> anyhow::Result<()> {
    let service = demo_service()?;
    service.update_realm(
        &realm_op("demo"),
        "credentials",
        ModelValue::Object(AttributeDocument::new().with("jwt", "realm-key")),
    )?;

    assert_eq!(
        exported(&service, "app1")?["credentials"],
        json!({"secret": "s3cr3t"})
    );
    Ok(())
}

/// Tests that adding a credential value keeps the scalar as a string.
#[test]
fn test_credential_value_is_stringified() -> anyhow::Result<()> {
    let service = demo_service()?;
    service.add_credential(
        &credential_op("app1", "pin"),
        &AttributeDocument::new().with("value", 1234_i64),
    )?;

    assert_eq!(exported(&service, "app1")?["credentials"]["pin"], "1234");
    Ok(())
}
