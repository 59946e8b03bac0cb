//! Credential sub-document handling.
//!
//! Credentials live inside their deployment's document under the
//! `credentials` attribute, as a nested document of name to value.

use kc_model::{AttributeDocument, ModelValue};

use crate::error::{AdapterError, AdapterResult};

/// Attribute under which a deployment keeps its credentials.
pub const CREDENTIALS_ATTRIBUTE: &str = "credentials";

/// Payload attribute that carries a new credential's value.
pub const VALUE_ATTRIBUTE: &str = "value";

/// Reads the scalar credential value out of an `add` payload.
pub(crate) fn credential_value(payload: &AttributeDocument) -> Option<String> {
    payload.get(VALUE_ATTRIBUTE).and_then(ModelValue::as_string)
}

/// Sets a credential, creating the sub-document on first use.
///
/// Fails without writing if `credentials` holds something other than a
/// document.
pub(crate) fn put(
    deployment: &mut AttributeDocument,
    credential: &str,
    value: ModelValue,
    context: &dyn Fn() -> String,
) -> AdapterResult<()> {
    match deployment.get_mut(CREDENTIALS_ATTRIBUTE) {
        Some(ModelValue::Object(credentials)) => {
            credentials.set(credential, value);
            Ok(())
        }
        None | Some(ModelValue::Undefined) => {
            deployment.set(
                CREDENTIALS_ATTRIBUTE,
                AttributeDocument::new().with(credential, value),
            );
            Ok(())
        }
        Some(_) => Err(AdapterError::invalid_attribute(
            CREDENTIALS_ATTRIBUTE,
            context(),
        )),
    }
}

/// Returns the existing credentials sub-document.
///
/// Errors are `MissingSubdocument` when no credential has been defined yet,
/// and `InvalidAttribute` when `credentials` is not a document.
pub(crate) fn existing_mut<'a>(
    deployment: &'a mut AttributeDocument,
    deployment_name: &str,
    context: &dyn Fn() -> String,
) -> AdapterResult<&'a mut AttributeDocument> {
    match deployment.get_mut(CREDENTIALS_ATTRIBUTE) {
        Some(ModelValue::Object(credentials)) => Ok(credentials),
        None | Some(ModelValue::Undefined) => Err(AdapterError::MissingSubdocument {
            deployment: deployment_name.to_string(),
            operation: context(),
        }),
        Some(_) => Err(AdapterError::invalid_attribute(
            CREDENTIALS_ATTRIBUTE,
            context(),
        )),
    }
}
