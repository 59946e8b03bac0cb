//! # kc-adapter
//!
//! Runtime configuration registry for the Keycloak adapter subsystem.
//!
//! The registry accumulates realm and secure-deployment definitions as
//! administrative operations arrive, in any order, and assembles the
//! adapter configuration JSON for a deployment on demand.
//!
//! ## Components
//!
//! - [`address`] - derives entity names from operation addresses
//! - [`DocumentStore`] - lock-guarded realm and deployment stores
//! - [`credentials`] - the `credentials` sub-document of a deployment
//! - [`WebContextRegistry`] - auth-server deployments and their web contexts
//! - [`merge`] - realm defaults overridden by deployment values
//! - [`AdapterConfigService`] - the registry instance tying these together
//! - [`SubsystemDefinition`] - TOML bootstrap of a registry
//!
//! ## Example
//!
//! ```
//! use kc_adapter::AdapterConfigService;
//! use kc_model::{AttributeDocument, Operation};
//!
//! let service = AdapterConfigService::new();
//! let op = Operation::new("add", "/subsystem=keycloak/realm=demo".parse()?);
//! service.add_realm(&op, &AttributeDocument::new().with("auth-server-url", "http://x"))?;
//!
//! let op = Operation::new("add", "/subsystem=keycloak/secure-deployment=app.war".parse()?);
//! service.add_secure_deployment(&op, &AttributeDocument::new().with("realm", "demo"))?;
//!
//! assert_eq!(
//!     service.get_json("app.war")?,
//!     r#"{"realm":"demo","auth-server-url":"http://x"}"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod address;
pub mod credentials;
pub mod error;
pub mod merge;
pub mod service;
pub mod store;
pub mod subsystem;
pub mod web_context;

pub use error::{AdapterError, AdapterResult};
pub use service::AdapterConfigService;
pub use store::DocumentStore;
pub use subsystem::{AuthServerDefinition, SecureDeploymentDefinition, SubsystemDefinition};
pub use web_context::WebContextRegistry;
