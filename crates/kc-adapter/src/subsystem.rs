//! Subsystem definitions and registry bootstrap.
//!
//! A [`SubsystemDefinition`] describes the adapter subsystem as a TOML
//! document. [`AdapterConfigService::bootstrap`] replays it through the
//! regular operation path, the same way a host replays its management
//! model when the extension starts.

use std::path::Path;

use indexmap::IndexMap;
use kc_core::LoggingConfig;
use kc_model::{AttributeDocument, ModelValue, Operation, OperationAddress};
use serde::Deserialize;
use tracing::{debug, info};

use crate::address::{
    CREDENTIAL_TAG, REALM_TAG, SECURE_DEPLOYMENT_TAG, SUBSYSTEM_NAME, SUBSYSTEM_TAG,
};
use crate::credentials::VALUE_ATTRIBUTE;
use crate::error::AdapterResult;
use crate::service::AdapterConfigService;

/// Operation name used for replayed definitions.
const ADD_OPERATION: &str = "add";

/// Default web context of an auth-server deployment.
fn default_web_context() -> String {
    "auth".to_string()
}

/// Adapter subsystem definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SubsystemDefinition {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Realms by name.
    #[serde(default)]
    pub realm: IndexMap<String, AttributeDocument>,

    /// Secure deployments by deployment name.
    #[serde(default)]
    pub secure_deployment: IndexMap<String, SecureDeploymentDefinition>,

    /// Auth-server deployments by deployment name.
    #[serde(default)]
    pub auth_server: IndexMap<String, AuthServerDefinition>,
}

/// A secure deployment: its attributes plus its credentials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecureDeploymentDefinition {
    /// Credentials by name.
    #[serde(default)]
    pub credential: IndexMap<String, ModelValue>,

    /// Every other attribute of the deployment.
    #[serde(flatten)]
    pub attributes: AttributeDocument,
}

/// An auth-server deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuthServerDefinition {
    /// Web context the server is reachable under.
    #[serde(default = "default_web_context")]
    pub web_context: String,
}

impl SubsystemDefinition {
    /// Parses a definition from TOML.
    ///
    /// ## Errors
    ///
    /// Returns `kc_core::Error::Parse` if the document is malformed.
    pub fn from_toml_str(content: &str) -> kc_core::Result<Self> {
        toml::from_str(content)
            .map_err(|e| kc_core::Error::parse(format!("invalid subsystem definition: {e}")))
    }

    /// Loads a definition from a TOML file.
    ///
    /// ## Errors
    ///
    /// Returns `kc_core::Error::Io` if the file cannot be read and
    /// `kc_core::Error::Parse` if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> kc_core::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl SubsystemDefinition {
    /// Checks the definition before anything is replayed.
    ///
    /// Every secure deployment must reference a realm by name and every
    /// auth-server must have a non-empty web context.
    ///
    /// ## Errors
    ///
    /// Returns `kc_core::Error::Config` naming the first offending entry.
    pub fn validate(&self) -> kc_core::Result<()> {
        for (name, deployment) in &self.secure_deployment {
            if deployment
                .attributes
                .get(REALM_TAG)
                .and_then(ModelValue::as_string)
                .is_none()
            {
                return Err(kc_core::Error::config(format!(
                    "secure deployment '{name}' does not reference a realm"
                )));
            }
        }

        if let Some((name, _)) = self
            .auth_server
            .iter()
            .find(|(_, server)| server.web_context.trim().is_empty())
        {
            return Err(kc_core::Error::config(format!(
                "auth-server '{name}' has an empty web-context"
            )));
        }
        Ok(())
    }
}

fn subsystem_address() -> OperationAddress {
    OperationAddress::root().append(SUBSYSTEM_TAG, SUBSYSTEM_NAME)
}

impl AdapterConfigService {
    /// Extension start: installs logging from the `[logging]` table, then
    /// creates a registry populated from the definition.
    ///
    /// A subscriber that is already installed is left in place.
    ///
    /// ## Errors
    ///
    /// See [`AdapterConfigService::bootstrap`].
    pub fn start(definition: &SubsystemDefinition) -> AdapterResult<Self> {
        let installed = kc_core::telemetry::init(&definition.logging);
        debug!(
            filter = %definition.logging.filter,
            installed,
            "adapter subsystem logging configured"
        );
        Self::from_definition(definition)
    }

    /// Creates a registry populated from a definition.
    ///
    /// ## Errors
    ///
    /// See [`AdapterConfigService::bootstrap`].
    pub fn from_definition(definition: &SubsystemDefinition) -> AdapterResult<Self> {
        let service = Self::new();
        service.bootstrap(definition)?;
        Ok(service)
    }

    /// Replays a definition as `add` operations.
    ///
    /// Realms go first, then each deployment followed by its credentials,
    /// then auth-server deployments.
    ///
    /// ## Errors
    ///
    /// Returns `AdapterError::Core` if [`SubsystemDefinition::validate`]
    /// rejects the definition, in which case nothing is replayed. Otherwise
    /// returns the first error raised by a replayed operation, e.g.
    /// `AdapterError::InvalidAttribute` for a credential without a scalar value.
    pub fn bootstrap(&self, definition: &SubsystemDefinition) -> AdapterResult<()> {
        definition.validate()?;

        for (name, realm) in &definition.realm {
            let op = Operation::new(ADD_OPERATION, subsystem_address().append(REALM_TAG, name));
            self.add_realm(&op, realm)?;
        }

        for (name, deployment) in &definition.secure_deployment {
            let address = subsystem_address().append(SECURE_DEPLOYMENT_TAG, name);
            let op = Operation::new(ADD_OPERATION, address.clone());
            self.add_secure_deployment(&op, &deployment.attributes)?;

            for (credential, value) in &deployment.credential {
                let op = Operation::new(
                    ADD_OPERATION,
                    address.clone().append(CREDENTIAL_TAG, credential),
                )
                .with_payload(AttributeDocument::new().with(VALUE_ATTRIBUTE, value.clone()));
                self.add_credential(&op, &op.payload)?;
            }
        }

        for (name, server) in &definition.auth_server {
            self.add_server_deployment(name, &server.web_context);
        }

        info!(
            realms = definition.realm.len(),
            secure_deployments = definition.secure_deployment.len(),
            auth_servers = definition.auth_server.len(),
            "adapter subsystem bootstrapped"
        );
        Ok(())
    }
}
