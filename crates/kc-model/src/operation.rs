//! Administrative operations and their hierarchical addresses.
//!
//! Operations carry entity identity implicitly, in their address path,
//! rather than as an explicit field.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::document::AttributeDocument;

/// One `type=value` step of an operation address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressSegment {
    /// Segment type, e.g. `secure-deployment`.
    pub kind: String,
    /// Segment value, e.g. `my-app.war`.
    pub value: String,
}

impl AddressSegment {
    /// Creates a segment.
    #[must_use]
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for AddressSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.value)
    }
}

/// Error returned when parsing an address path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAddressError {
    /// A segment between two `/` separators is empty.
    #[error("empty segment in address '{0}'")]
    EmptySegment(String),

    /// A segment has no `=` separator.
    #[error("segment '{0}' is not of the form type=value")]
    MissingSeparator(String),

    /// A segment has an empty type or value.
    #[error("segment '{0}' has an empty type or value")]
    EmptyPart(String),
}

/// Ordered sequence of address segments, root first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OperationAddress {
    segments: Vec<AddressSegment>,
}

impl OperationAddress {
    /// Creates the root address.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns a new address with one more segment appended.
    #[must_use]
    pub fn append(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.segments.push(AddressSegment::new(kind, value));
        self
    }

    /// Returns the value of the first segment of the given type.
    #[must_use]
    pub fn find(&self, kind: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|segment| segment.kind == kind)
            .map(|segment| segment.value.as_str())
    }

    /// Returns the segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[AddressSegment] {
        &self.segments
    }

    /// Returns whether this is the root address.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<AddressSegment> for OperationAddress {
    fn from_iter<I: IntoIterator<Item = AddressSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for OperationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for OperationAddress {
    type Err = ParseAddressError;

    /// Parses the management path form, e.g. `/subsystem=keycloak/realm=demo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
        if body.is_empty() {
            return Ok(Self::root());
        }

        body.split('/')
            .map(|part| {
                if part.is_empty() {
                    return Err(ParseAddressError::EmptySegment(s.to_string()));
                }
                let (kind, value) = part
                    .split_once('=')
                    .ok_or_else(|| ParseAddressError::MissingSeparator(part.to_string()))?;
                if kind.is_empty() || value.is_empty() {
                    return Err(ParseAddressError::EmptyPart(part.to_string()));
                }
                Ok(AddressSegment::new(kind, value))
            })
            .collect()
    }
}

/// An administrative operation: a name, a target address and a payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    /// Operation name, e.g. `add` or `write-attribute`.
    pub name: String,
    /// Address of the resource the operation targets.
    pub address: OperationAddress,
    /// Attribute payload.
    pub payload: AttributeDocument,
}

impl Operation {
    /// Creates an operation with an empty payload.
    #[must_use]
    pub fn new(name: impl Into<String>, address: OperationAddress) -> Self {
        Self {
            name: name.into(),
            address,
            payload: AttributeDocument::new(),
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: AttributeDocument) -> Self {
        self.payload = payload;
        self
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.address)
    }
}
