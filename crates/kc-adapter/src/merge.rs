//! Composition of the exported adapter configuration.
//!
//! The document handed to a deployment is built in two passes over a
//! fresh document that starts with the `realm` name: realm attributes
//! first, then the deployment's own attributes, so that a deployment
//! attribute of the same name wins. Only defined values are copied, and
//! only top-level keys are merged; a nested `credentials` document is
//! replaced wholesale by whichever layer defines it last.

use kc_model::AttributeDocument;

use crate::address::REALM_TAG;

/// Builds the merged configuration for one deployment.
///
/// `realm` is `None` when the deployment references a realm that has not
/// been defined; the result then carries only the realm name and the
/// deployment layer.
#[must_use]
pub fn merge(
    realm_name: &str,
    realm: Option<&AttributeDocument>,
    deployment: &AttributeDocument,
) -> AttributeDocument {
    let mut json = AttributeDocument::new().with(REALM_TAG, realm_name);

    if let Some(realm) = realm {
        overlay(&mut json, realm);
    }
    overlay(&mut json, deployment);
    json
}

/// Copies every defined attribute of `values` into `target`.
fn overlay(target: &mut AttributeDocument, values: &AttributeDocument) {
    for (name, value) in values.defined() {
        target.set(name, value.clone());
    }
}
