//! Common test utilities and fixtures.

use kc_adapter::AdapterConfigService;
use kc_model::AttributeDocument;
use serde_json::Value;

pub use kc_integration_tests::{
    credential_op, credential_value, deployment_op, init_tracing, realm_op,
};

/// Registry holding realm `demo`, deployment `app1` and its `secret` credential.
pub fn demo_service() -> anyhow::Result<AdapterConfigService> {
    init_tracing();
    let service = AdapterConfigService::new();

    service.add_realm(
        &realm_op("demo"),
        &AttributeDocument::new()
            .with("auth-server-url", "http://x")
            .with("ssl-required", "external"),
    )?;
    service.add_secure_deployment(
        &deployment_op("app1"),
        &AttributeDocument::new()
            .with("realm", "demo")
            .with("resource", "app1-client"),
    )?;
    service.add_credential(&credential_op("app1", "secret"), &credential_value("s3cr3t"))?;

    Ok(service)
}

/// Exports a deployment and parses the JSON.
pub fn exported(service: &AdapterConfigService, deployment: &str) -> anyhow::Result<Value> {
    Ok(serde_json::from_str(&service.get_json(deployment)?)?)
}
