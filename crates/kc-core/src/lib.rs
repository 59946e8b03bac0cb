//! # kc-core
//!
//! Core utilities, configuration, and error handling for the Keycloak
//! adapter subsystem.
//!
//! This crate provides the ambient pieces shared by the other crates:
//! the core [`Error`] type, the [`LoggingConfig`] section of a subsystem
//! definition, and tracing subscriber initialisation.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::LoggingConfig;
pub use error::{Error, Result};
