//! Adapter registry error types.

use kc_model::OperationAddress;
use thiserror::Error;

/// Errors raised by registry operations.
///
/// All of them are fatal to the triggering operation; the registry never
/// retries and never leaves a partial write behind.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A required segment type is absent from an operation address.
    #[error("can't find '{segment_type}' in address {address}")]
    AddressResolution {
        /// Segment type that was looked for.
        segment_type: String,
        /// Full address of the operation.
        address: OperationAddress,
    },

    /// An update or lookup named an entity that is not in its store.
    #[error("{entity_type} '{name}' is not defined")]
    MissingEntity {
        /// Kind of entity (e.g. "realm", "secure-deployment").
        entity_type: &'static str,
        /// Name that was looked up.
        name: String,
    },

    /// A credential update or removal ran before any credential existed.
    #[error("no credential defined for deployment '{deployment}' in op {operation}")]
    MissingSubdocument {
        /// Owning deployment.
        deployment: String,
        /// Rendered operation.
        operation: String,
    },

    /// An attribute is missing or has the wrong shape.
    #[error("attribute '{attribute}' is missing or malformed in {context}")]
    InvalidAttribute {
        /// Attribute name.
        attribute: &'static str,
        /// Where the attribute was read (operation or deployment).
        context: String,
    },

    /// The merged document could not be rendered.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration or bootstrap failure.
    #[error(transparent)]
    Core(#[from] kc_core::Error),
}

impl AdapterError {
    /// Creates a missing entity error.
    #[must_use]
    pub fn missing_entity(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::MissingEntity {
            entity_type,
            name: name.into(),
        }
    }

    /// Creates an invalid attribute error.
    #[must_use]
    pub fn invalid_attribute(attribute: &'static str, context: impl ToString) -> Self {
        Self::InvalidAttribute {
            attribute,
            context: context.to_string(),
        }
    }

    /// Checks if this error names something that does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AddressResolution { .. } | Self::MissingEntity { .. }
        )
    }

    /// Checks if this error signals operations arriving out of order.
    #[must_use]
    pub const fn is_ordering_violation(&self) -> bool {
        matches!(self, Self::MissingSubdocument { .. })
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for registry operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
