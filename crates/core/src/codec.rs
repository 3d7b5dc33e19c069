//! Conversion between single typed field values and wire attribute values.
//!
//! Strings travel as `S`, integers of every width as `N`. Any other field
//! type is rejected with [`DynamapError::UnsupportedAttributeType`].

use crate::error::{DynamapError, Result};
use crate::types::{AttributeType, AttributeValue};

/// Source kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Signed,
    Unsigned,
    /// A kind with no wire representation, carrying its type name.
    Unsupported(&'static str),
}

impl FieldKind {
    /// The wire type this kind encodes to, if any.
    pub fn attribute_type(&self) -> Option<AttributeType> {
        match self {
            FieldKind::String => Some(AttributeType::S),
            FieldKind::Signed | FieldKind::Unsigned => Some(AttributeType::N),
            FieldKind::Unsupported(_) => None,
        }
    }

    /// Human readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match *self {
            FieldKind::String => "string",
            FieldKind::Signed => "signed integer",
            FieldKind::Unsigned => "unsigned integer",
            FieldKind::Unsupported(name) => name,
        }
    }

    pub(crate) fn unsupported(&self, field: &str) -> DynamapError {
        DynamapError::UnsupportedAttributeType {
            field: field.to_string(),
            kind: self.name(),
        }
    }
}

/// A field type the codec knows how to move on and off the wire.
pub trait AttributeField: Sized {
    const KIND: FieldKind;

    /// Encodes the value. `Ok(None)` means the attribute is omitted.
    fn encode(&self, field: &str) -> Result<Option<AttributeValue>>;

    /// Decodes a wire value. `Ok(None)` means the value's kind is not one
    /// this field accepts and the field stays unset.
    fn decode(field: &str, value: &AttributeValue) -> Result<Option<Self>>;
}

impl AttributeField for String {
    const KIND: FieldKind = FieldKind::String;

    fn encode(&self, _field: &str) -> Result<Option<AttributeValue>> {
        if self.is_empty() {
            return Ok(None);
        }
        Ok(Some(AttributeValue::S(self.clone())))
    }

    fn decode(_field: &str, value: &AttributeValue) -> Result<Option<Self>> {
        Ok(value.as_s().map(str::to_string))
    }
}

macro_rules! integer_field {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl AttributeField for $ty {
                const KIND: FieldKind = $kind;

                fn encode(&self, _field: &str) -> Result<Option<AttributeValue>> {
                    Ok(Some(AttributeValue::N(self.to_string())))
                }

                fn decode(field: &str, value: &AttributeValue) -> Result<Option<Self>> {
                    let Some(text) = value.as_n() else {
                        return Ok(None);
                    };
                    text.parse::<$ty>()
                        .map(Some)
                        .map_err(|_| DynamapError::NumericOverflow {
                            field: field.to_string(),
                            value: text.to_string(),
                        })
                }
            }
        )+
    };
}

integer_field!(FieldKind::Signed => i8, i16, i32, i64, isize);
integer_field!(FieldKind::Unsigned => u8, u16, u32, u64, usize);

macro_rules! unsupported_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AttributeField for $ty {
                const KIND: FieldKind = FieldKind::Unsupported(stringify!($ty));

                fn encode(&self, field: &str) -> Result<Option<AttributeValue>> {
                    Err(Self::KIND.unsupported(field))
                }

                fn decode(field: &str, _value: &AttributeValue) -> Result<Option<Self>> {
                    Err(Self::KIND.unsupported(field))
                }
            }
        )+
    };
}

unsupported_field!(f32, f64, bool, char);
