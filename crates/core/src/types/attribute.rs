use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single attribute value as it travels on the wire.
///
/// Serializes as `{"S": "..."}` or `{"N": "..."}`. Numbers are carried as
/// decimal text so no precision is lost in transit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(String),
}

impl AttributeValue {
    /// Returns the string payload if this is an `S` value.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            AttributeValue::N(_) => None,
        }
    }

    /// Returns the decimal text if this is an `N` value.
    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n),
            AttributeValue::S(_) => None,
        }
    }

    /// Returns the wire type of this value.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::S(_) => AttributeType::S,
            AttributeValue::N(_) => AttributeType::N,
        }
    }

    /// Approximate stored size in bytes.
    pub fn size(&self) -> usize {
        match self {
            AttributeValue::S(s) | AttributeValue::N(s) => s.len(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::S(s) => write!(f, "S:{s:?}"),
            AttributeValue::N(n) => write!(f, "N:{n}"),
        }
    }
}

/// Wire type of an attribute definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    S,
    N,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::S => f.write_str("S"),
            AttributeType::N => f.write_str("N"),
        }
    }
}

/// The attribute-map form of one record.
pub type Item = HashMap<String, AttributeValue>;

/// The primary-key subset of an [`Item`].
pub type Key = HashMap<String, AttributeValue>;
