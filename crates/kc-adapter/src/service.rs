//! The adapter configuration registry.
//!
//! [`AdapterConfigService`] keeps track of the adapter part of the
//! management model so it can hand each secure deployment its merged
//! configuration at deploy time. Hosts create one instance when the
//! extension starts and share it (typically behind an `Arc`) with both the
//! administrative operation handlers and the deployment processors.

use kc_model::{AttributeDocument, ModelValue, Operation};
use tracing::{debug, warn};

use crate::address::{
    REALM_TAG, SECURE_DEPLOYMENT_TAG, credential_name_from_op, deployment_name_from_op,
    realm_name_from_op,
};
use crate::credentials;
use crate::error::{AdapterError, AdapterResult};
use crate::merge;
use crate::store::DocumentStore;
use crate::web_context::WebContextRegistry;

/// Registry of realms, secure deployments and auth-server web contexts.
#[derive(Debug)]
pub struct AdapterConfigService {
    realms: DocumentStore,
    secure_deployments: DocumentStore,
    web_contexts: WebContextRegistry,
}

impl Default for AdapterConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterConfigService {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            realms: DocumentStore::new(REALM_TAG),
            secure_deployments: DocumentStore::new(SECURE_DEPLOYMENT_TAG),
            web_contexts: WebContextRegistry::new(),
        }
    }

    // === Auth-server deployments ===

    /// Registers an auth-server deployment and its web context.
    pub fn add_server_deployment(&self, deployment_name: &str, web_context: &str) {
        let previous = self.web_contexts.add(deployment_name, web_context);
        debug!(
            deployment = deployment_name,
            web_context,
            replaced = previous.is_some(),
            "auth-server deployment added"
        );
    }

    /// Gets the web context of an auth-server deployment.
    #[must_use]
    pub fn get_web_context(&self, deployment_name: &str) -> Option<String> {
        self.web_contexts.get(deployment_name)
    }

    /// Forgets an auth-server deployment. Unknown names are ignored.
    pub fn remove_server_deployment(&self, deployment_name: &str) {
        if self.web_contexts.remove(deployment_name).is_some() {
            debug!(deployment = deployment_name, "auth-server deployment removed");
        }
    }

    /// Checks whether an auth-server deployment already uses `web_context`.
    #[must_use]
    pub fn is_web_context_used(&self, web_context: &str) -> bool {
        self.web_contexts.contains_value(web_context)
    }

    /// Checks whether `deployment_name` is an auth-server deployment.
    #[must_use]
    pub fn is_keycloak_server_deployment(&self, deployment_name: &str) -> bool {
        self.web_contexts.contains_key(deployment_name)
    }

    // === Realms ===

    /// Stores a copy of `model` as the realm named in the operation address.
    ///
    /// Adding a realm that already exists replaces it.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::AddressResolution` if the address names no realm.
    pub fn add_realm(&self, operation: &Operation, model: &AttributeDocument) -> AdapterResult<()> {
        let realm = realm_name_from_op(operation).inspect_err(|e| log_failure(operation, e))?;
        let replaced = self.realms.add(realm, model);
        debug!(realm, replaced, "realm added");
        Ok(())
    }

    /// Sets one attribute of an existing realm.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::AddressResolution` if the address names no
    /// realm, or `AdapterError::MissingEntity` if the realm was never added.
    pub fn update_realm(
        &self,
        operation: &Operation,
        attr_name: &str,
        resolved_value: ModelValue,
    ) -> AdapterResult<()> {
        realm_name_from_op(operation)
            .and_then(|realm| {
                self.realms.update(realm, attr_name, resolved_value)?;
                debug!(realm, attribute = attr_name, "realm updated");
                Ok(())
            })
            .inspect_err(|e| log_failure(operation, e))
    }

    /// Removes the realm named in the operation address, if present.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::AddressResolution` if the address names no realm.
    pub fn remove_realm(&self, operation: &Operation) -> AdapterResult<()> {
        let realm = realm_name_from_op(operation).inspect_err(|e| log_failure(operation, e))?;
        if self.realms.remove(realm) {
            debug!(realm, "realm removed");
        }
        Ok(())
    }

    // === Secure deployments ===

    /// Stores a copy of `model` as the secure deployment named in the
    /// operation address.
    ///
    /// The referenced realm does not have to exist yet. Adding a deployment
    /// that already exists replaces it.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::AddressResolution` if the address names no deployment.
    pub fn add_secure_deployment(
        &self,
        operation: &Operation,
        model: &AttributeDocument,
    ) -> AdapterResult<()> {
        let deployment =
            deployment_name_from_op(operation).inspect_err(|e| log_failure(operation, e))?;
        let replaced = self.secure_deployments.add(deployment, model);
        debug!(deployment, replaced, "secure deployment added");
        Ok(())
    }

    /// Sets one attribute of an existing secure deployment.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::AddressResolution` if the address names no
    /// deployment, or `AdapterError::MissingEntity` if it was never added.
    pub fn update_secure_deployment(
        &self,
        operation: &Operation,
        attr_name: &str,
        resolved_value: ModelValue,
    ) -> AdapterResult<()> {
        deployment_name_from_op(operation)
            .and_then(|deployment| {
                self.secure_deployments
                    .update(deployment, attr_name, resolved_value)?;
                debug!(deployment, attribute = attr_name, "secure deployment updated");
                Ok(())
            })
            .inspect_err(|e| log_failure(operation, e))
    }

    /// Removes the secure deployment named in the operation address, if present.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::AddressResolution` if the address names no deployment.
    pub fn remove_secure_deployment(&self, operation: &Operation) -> AdapterResult<()> {
        let deployment =
            deployment_name_from_op(operation).inspect_err(|e| log_failure(operation, e))?;
        if self.secure_deployments.remove(deployment) {
            debug!(deployment, "secure deployment removed");
        }
        Ok(())
    }

    // === Credentials ===

    /// Adds a credential to the deployment named in the operation address.
    ///
    /// The credential's value is read from the `value` attribute of `model`.
    /// The deployment's `credentials` sub-document is created on first use.
    ///
    /// ## Errors
    ///
    /// - `AdapterError::AddressResolution` if the address names no
    ///   deployment or credential
    /// - `AdapterError::MissingEntity` if the deployment was never added
    /// - `AdapterError::InvalidAttribute` if `model` has no scalar `value`
    pub fn add_credential(
        &self,
        operation: &Operation,
        model: &AttributeDocument,
    ) -> AdapterResult<()> {
        self.try_add_credential(operation, model)
            .inspect_err(|e| log_failure(operation, e))
    }

    fn try_add_credential(
        &self,
        operation: &Operation,
        model: &AttributeDocument,
    ) -> AdapterResult<()> {
        let deployment = deployment_name_from_op(operation)?;
        let credential = credential_name_from_op(operation)?;
        let value = credentials::credential_value(model).ok_or_else(|| {
            AdapterError::invalid_attribute(credentials::VALUE_ATTRIBUTE, operation)
        })?;

        self.secure_deployments.modify(deployment, |document| {
            credentials::put(document, credential, ModelValue::String(value), &|| {
                operation.to_string()
            })
        })?;
        debug!(deployment, credential, "credential added");
        Ok(())
    }

    /// Replaces the value of a credential.
    ///
    /// `attr_name` is accepted for symmetry with the other update
    /// operations; the credential named in the address is what gets written.
    ///
    /// ## Errors
    ///
    /// - `AdapterError::AddressResolution` if the address names no
    ///   deployment or credential
    /// - `AdapterError::MissingEntity` if the deployment was never added
    /// - `AdapterError::MissingSubdocument` if the deployment has no credentials yet
    pub fn update_credential(
        &self,
        operation: &Operation,
        attr_name: &str,
        resolved_value: ModelValue,
    ) -> AdapterResult<()> {
        self.try_update_credential(operation, attr_name, resolved_value)
            .inspect_err(|e| log_failure(operation, e))
    }

    fn try_update_credential(
        &self,
        operation: &Operation,
        attr_name: &str,
        resolved_value: ModelValue,
    ) -> AdapterResult<()> {
        let deployment = deployment_name_from_op(operation)?;
        let credential = credential_name_from_op(operation)?;

        self.secure_deployments.modify(deployment, |document| {
            let credentials =
                credentials::existing_mut(document, deployment, &|| operation.to_string())?;
            credentials.set(credential, resolved_value);
            Ok(())
        })?;
        debug!(deployment, credential, attribute = attr_name, "credential updated");
        Ok(())
    }

    /// Removes a credential from the deployment named in the operation address.
    ///
    /// ## Errors
    ///
    /// - `AdapterError::AddressResolution` if the address names no
    ///   deployment or credential
    /// - `AdapterError::MissingEntity` if the deployment was never added
    /// - `AdapterError::MissingSubdocument` if the deployment has no credentials yet
    pub fn remove_credential(&self, operation: &Operation) -> AdapterResult<()> {
        self.try_remove_credential(operation)
            .inspect_err(|e| log_failure(operation, e))
    }

    fn try_remove_credential(&self, operation: &Operation) -> AdapterResult<()> {
        let deployment = deployment_name_from_op(operation)?;
        let credential = credential_name_from_op(operation)?;

        let removed = self.secure_deployments.modify(deployment, |document| {
            let credentials =
                credentials::existing_mut(document, deployment, &|| operation.to_string())?;
            Ok(credentials.remove(credential).is_some())
        })?;
        debug!(deployment, credential, removed, "credential removed");
        Ok(())
    }

    // === Deploy-time queries ===

    /// Checks whether `deployment_name` is a keycloak-secured deployment.
    #[must_use]
    pub fn is_secure_deployment(&self, deployment_name: &str) -> bool {
        self.secure_deployments.contains(deployment_name)
    }

    /// Returns the realm a secure deployment references.
    ///
    /// `None` if the deployment is unknown or has no realm attribute.
    #[must_use]
    pub fn get_realm_name(&self, deployment_name: &str) -> Option<String> {
        self.secure_deployments
            .get(deployment_name)?
            .get(REALM_TAG)
            .and_then(ModelValue::as_string)
    }

    /// Builds the merged configuration document for a secure deployment.
    ///
    /// Both stores stay read-locked for the whole merge, so the result
    /// reflects one consistent state even while administrative operations
    /// run concurrently.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::MissingEntity` if the deployment is unknown and
    /// `AdapterError::InvalidAttribute` if it references no realm.
    pub fn export(&self, deployment_name: &str) -> AdapterResult<AttributeDocument> {
        let deployments = self.secure_deployments.read();
        let realms = self.realms.read();

        let deployment = deployments
            .get(deployment_name)
            .ok_or_else(|| AdapterError::missing_entity(SECURE_DEPLOYMENT_TAG, deployment_name))?;
        let realm_name = deployment
            .get(REALM_TAG)
            .and_then(ModelValue::as_string)
            .ok_or_else(|| {
                AdapterError::invalid_attribute(
                    REALM_TAG,
                    format!("secure deployment '{deployment_name}'"),
                )
            })?;

        let realm = realms.get(&realm_name);
        if realm.is_none() {
            debug!(
                deployment = deployment_name,
                realm = %realm_name,
                "exporting without realm defaults, realm is not defined"
            );
        }
        Ok(merge::merge(&realm_name, realm, deployment))
    }

    /// Renders the merged configuration of a secure deployment as compact JSON.
    ///
    /// ## Errors
    ///
    /// Same as [`AdapterConfigService::export`], plus
    /// `AdapterError::Serialization` if rendering fails.
    pub fn get_json(&self, deployment_name: &str) -> AdapterResult<String> {
        let json = self.export(deployment_name)?.to_json_string()?;
        Ok(json)
    }

    /// Lists defined realm names, sorted.
    #[must_use]
    pub fn realm_names(&self) -> Vec<String> {
        self.realms.names()
    }

    /// Lists secure deployment names, sorted.
    #[must_use]
    pub fn secure_deployment_names(&self) -> Vec<String> {
        self.secure_deployments.names()
    }
}

fn log_failure(operation: &Operation, error: &AdapterError) {
    warn!(operation = %operation, error = %error, "adapter operation failed");
}
