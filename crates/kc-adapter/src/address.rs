//! Identity resolution from operation addresses.
//!
//! Administrative operations carry the name of the entity they target in
//! their address path. This module is the only place that reads it; the
//! stores only ever see resolved names.

use kc_model::Operation;

use crate::error::{AdapterError, AdapterResult};

/// Segment type of the subsystem root.
pub const SUBSYSTEM_TAG: &str = "subsystem";

/// Name of the adapter subsystem.
pub const SUBSYSTEM_NAME: &str = "keycloak";

/// Segment type naming a realm.
pub const REALM_TAG: &str = "realm";

/// Segment type naming a secure deployment.
pub const SECURE_DEPLOYMENT_TAG: &str = "secure-deployment";

/// Segment type naming a credential.
pub const CREDENTIAL_TAG: &str = "credential";

/// Returns the value of the first segment of `segment_type` in the
/// operation's address.
///
/// ## Errors
///
/// Returns `AdapterError::AddressResolution` if no segment matches.
pub fn value_from_op_address<'a>(
    segment_type: &str,
    operation: &'a Operation,
) -> AdapterResult<&'a str> {
    operation
        .address
        .find(segment_type)
        .ok_or_else(|| AdapterError::AddressResolution {
            segment_type: segment_type.to_string(),
            address: operation.address.clone(),
        })
}

/// Resolves the realm name.
///
/// ## Errors
///
/// Returns `AdapterError::AddressResolution` if the address has no realm segment.
pub fn realm_name_from_op(operation: &Operation) -> AdapterResult<&str> {
    value_from_op_address(REALM_TAG, operation)
}

/// Resolves the secure deployment name.
///
/// ## Errors
///
/// Returns `AdapterError::AddressResolution` if the address has no
/// secure-deployment segment.
pub fn deployment_name_from_op(operation: &Operation) -> AdapterResult<&str> {
    value_from_op_address(SECURE_DEPLOYMENT_TAG, operation)
}

/// Resolves the credential name.
///
/// ## Errors
///
/// Returns `AdapterError::AddressResolution` if the address has no credential segment.
pub fn credential_name_from_op(operation: &Operation) -> AdapterResult<&str> {
    value_from_op_address(CREDENTIAL_TAG, operation)
}
