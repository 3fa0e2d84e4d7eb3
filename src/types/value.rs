//! Scalar attribute values and write-set field values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// A scalar value stored in a resource attribute.
///
/// Attribute values are the JSON-compatible scalars; collections belong in
/// relationships, not attributes.
///
/// # Example
///
/// ```rust
/// use resource_access::AttributeValue;
///
/// let text: AttributeValue = "hello".into();
/// let count: AttributeValue = 3.into();
/// let flag: AttributeValue = true.into();
/// assert_eq!(count.as_i64(), Some(3));
/// assert!(AttributeValue::Null.is_null());
/// # let _ = (text, flag);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Null value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value (64-bit signed).
    Integer(i64),

    /// Floating-point value (64-bit).
    Float(f64),

    /// String value.
    String(String),
}

impl AttributeValue {
    /// Returns `true` if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Returns the boolean value if this is a Bool variant.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Integer variant.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value, widening integers.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string value if this is a String variant.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(i64::from(value))
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Integer(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        AttributeValue::String(value.clone())
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => AttributeValue::Null,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => write!(f, "null"),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(fl) => write!(f, "{}", fl),
            AttributeValue::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// A value in a write set: either an attribute scalar or relationship targets.
///
/// On the wire a write set is a flat object. Arrays are relationship targets;
/// everything else is a scalar. Because a to-one relationship may be written
/// as a bare identifier (or `null` to clear it), the orchestrator reinterprets
/// scalars through [`FieldValue::into_targets`] once the schema says the name
/// is a relationship.
///
/// ```rust
/// use resource_access::FieldValue;
///
/// let value: FieldValue = serde_json::from_str("[1, 2, 3]").unwrap();
/// assert_eq!(value.into_targets(), Some(vec![1, 2, 3]));
///
/// let value: FieldValue = serde_json::from_str("7").unwrap();
/// assert_eq!(value.into_targets(), Some(vec![7]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Relationship target identifiers, in order.
    Targets(Vec<ResourceId>),

    /// A scalar attribute value.
    Attribute(AttributeValue),
}

impl FieldValue {
    /// Creates a scalar field value.
    pub fn attribute(value: impl Into<AttributeValue>) -> Self {
        FieldValue::Attribute(value.into())
    }

    /// Returns the attribute value, if this is a scalar.
    pub fn as_attribute(&self) -> Option<&AttributeValue> {
        match self {
            FieldValue::Attribute(value) => Some(value),
            FieldValue::Targets(_) => None,
        }
    }

    /// Interprets this value as relationship targets.
    ///
    /// A single integer becomes a one-element list and `null` becomes the
    /// empty list. Any other scalar returns `None`.
    pub fn into_targets(self) -> Option<Vec<ResourceId>> {
        match self {
            FieldValue::Targets(targets) => Some(targets),
            FieldValue::Attribute(AttributeValue::Integer(id)) => Some(vec![id]),
            FieldValue::Attribute(AttributeValue::Null) => Some(Vec::new()),
            FieldValue::Attribute(_) => None,
        }
    }
}

impl From<AttributeValue> for FieldValue {
    fn from(value: AttributeValue) -> Self {
        FieldValue::Attribute(value)
    }
}

impl From<Vec<ResourceId>> for FieldValue {
    fn from(targets: Vec<ResourceId>) -> Self {
        FieldValue::Targets(targets)
    }
}
