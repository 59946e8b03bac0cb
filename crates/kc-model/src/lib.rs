//! # kc-model
//!
//! Attribute documents and administrative operations for the Keycloak
//! adapter subsystem.
//!
//! - [`AttributeDocument`] / [`ModelValue`] - ordered attribute maps with
//!   definable values, used for realm, deployment and credential data
//! - [`Operation`] / [`OperationAddress`] - administrative operations that
//!   identify their target through a hierarchical address

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod document;
pub mod operation;

pub use document::{AttributeDocument, ModelValue};
pub use operation::{AddressSegment, Operation, OperationAddress, ParseAddressError};
