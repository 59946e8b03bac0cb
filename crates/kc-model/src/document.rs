//! Attribute documents.
//!
//! An [`AttributeDocument`] is the generic representation used for realm
//! configuration, secure-deployment configuration and the nested
//! credentials sub-document. Values may be undefined; only defined values
//! take part in merges.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelValue {
    /// No value has been set.
    #[default]
    Undefined,
    /// Boolean value.
    Boolean(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Double(f64),
    /// String value.
    String(String),
    /// Ordered list of values.
    List(Vec<ModelValue>),
    /// Nested document.
    Object(AttributeDocument),
}

impl ModelValue {
    /// Returns whether the value is defined.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// Renders a scalar value as a string.
    ///
    /// Returns `None` for undefined values, lists and nested documents.
    #[must_use]
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::Boolean(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Double(d) => Some(d.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Undefined | Self::List(_) | Self::Object(_) => None,
        }
    }

    /// Returns the nested document, if this value is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&AttributeDocument> {
        match self {
            Self::Object(doc) => Some(doc),
            _ => None,
        }
    }

    /// Converts the value into its JSON form. Undefined becomes `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Undefined => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Double(d) => Value::from(*d),
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(doc) => doc.to_json(),
        }
    }
}

impl From<Value> for ModelValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Undefined,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let (true, Some(d)) = (n.is_f64(), n.as_f64()) {
                    Self::Double(d)
                } else {
                    // u64 above i64::MAX, kept exact
                    Self::String(n.to_string())
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(name, value)| (name, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ModelValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ModelValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ModelValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ModelValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<AttributeDocument> for ModelValue {
    fn from(value: AttributeDocument) -> Self {
        Self::Object(value)
    }
}

impl Serialize for ModelValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined => serializer.serialize_none(),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Double(d) => serializer.serialize_f64(*d),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Object(doc) => doc.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ModelValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Insertion-ordered mapping from attribute name to [`ModelValue`].
///
/// Cloning is deep: every value is owned, so a stored copy can never
/// alias the caller's document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeDocument {
    attributes: IndexMap<String, ModelValue>,
}

impl AttributeDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of an attribute, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ModelValue> {
        self.attributes.get(name)
    }

    /// Returns a mutable reference to an attribute, if present.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ModelValue> {
        self.attributes.get_mut(name)
    }

    /// Sets an attribute.
    ///
    /// An existing attribute keeps its position; a new one is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ModelValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Builder form of [`AttributeDocument::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ModelValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<ModelValue> {
        self.attributes.shift_remove(name)
    }

    /// Returns whether an attribute is present, defined or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Returns whether an attribute is present and defined.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.get(name).is_some_and(ModelValue::is_defined)
    }

    /// Iterates over all attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over defined attributes in insertion order.
    pub fn defined(&self) -> impl Iterator<Item = (&str, &ModelValue)> {
        self.iter().filter(|(_, value)| value.is_defined())
    }

    /// Number of attributes, defined or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns whether the document has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Converts the document into a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Renders the document as compact JSON.
    ///
    /// ## Errors
    ///
    /// Returns the serializer error if the document cannot be rendered.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl FromIterator<(String, ModelValue)> for AttributeDocument {
    fn from_iter<I: IntoIterator<Item = (String, ModelValue)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Value> for AttributeDocument {
    type Error = Value;

    /// Converts a JSON object. Any other JSON value is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match ModelValue::from(value) {
            ModelValue::Object(doc) => Ok(doc),
            other => Err(other.to_json()),
        }
    }
}

impl Serialize for AttributeDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<String, ModelValue>::deserialize(deserializer)
            .map(|attributes| Self { attributes })
    }
}

impl fmt::Display for AttributeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
