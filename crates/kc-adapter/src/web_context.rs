//! Auth-server deployment bookkeeping.
//!
//! Tracks which deployments are the adapter's own auth-server
//! deployments and the web context each is served under.

use dashmap::DashMap;

/// Map of auth-server deployment name to web context.
#[derive(Debug, Default)]
pub struct WebContextRegistry {
    contexts: DashMap<String, String>,
}

impl WebContextRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a deployment's web context, returning the previous one.
    pub fn add(&self, deployment_name: &str, web_context: &str) -> Option<String> {
        self.contexts
            .insert(deployment_name.to_string(), web_context.to_string())
    }

    /// Gets a deployment's web context.
    #[must_use]
    pub fn get(&self, deployment_name: &str) -> Option<String> {
        self.contexts
            .get(deployment_name)
            .map(|entry| entry.value().clone())
    }

    /// Forgets a deployment. Unknown names are ignored.
    pub fn remove(&self, deployment_name: &str) -> Option<String> {
        self.contexts
            .remove(deployment_name)
            .map(|(_, web_context)| web_context)
    }

    /// Checks whether any deployment is served under `web_context`.
    #[must_use]
    pub fn contains_value(&self, web_context: &str) -> bool {
        self.contexts
            .iter()
            .any(|entry| entry.value() == web_context)
    }

    /// Checks whether `deployment_name` is a registered auth-server deployment.
    #[must_use]
    pub fn contains_key(&self, deployment_name: &str) -> bool {
        self.contexts.contains_key(deployment_name)
    }

    /// Number of registered deployments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Returns whether no deployment is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
