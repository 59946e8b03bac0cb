//! Fixtures shared by the adapter subsystem integration tests.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

use kc_core::LoggingConfig;
use kc_model::{AttributeDocument, Operation, OperationAddress};

/// Address of the adapter subsystem root.
#[must_use]
pub fn subsystem() -> OperationAddress {
    OperationAddress::root().append("subsystem", "keycloak")
}

/// `add` operation for a realm.
#[must_use]
pub fn realm_op(realm: &str) -> Operation {
    Operation::new("add", subsystem().append("realm", realm))
}

/// `add` operation for a secure deployment.
#[must_use]
pub fn deployment_op(deployment: &str) -> Operation {
    Operation::new("add", subsystem().append("secure-deployment", deployment))
}

/// `add` operation for a credential of a secure deployment.
#[must_use]
pub fn credential_op(deployment: &str, credential: &str) -> Operation {
    Operation::new(
        "add",
        subsystem()
            .append("secure-deployment", deployment)
            .append("credential", credential),
    )
}

/// Payload of a credential `add` operation.
#[must_use]
pub fn credential_value(value: &str) -> AttributeDocument {
    AttributeDocument::new().with("value", value)
}

/// Installs a tracing subscriber for test output.
pub fn init_tracing() {
    let _ = kc_core::telemetry::init(&LoggingConfig::with_filter("kc_adapter=debug"));
}
