//! The `Record` capability and the `record!` macro that implements it.
//!
//! A record is a plain struct whose fields map one-to-one onto item
//! attributes. Key roles are declared per field:
//!
//! ```
//! dynamap_core::record! {
//!     #[derive(Debug, Clone, Default, PartialEq)]
//!     pub struct FetchRequest {
//!         pub host: String as "Host" => hash,
//!         pub requested_on: String as "RequestedOn" => range,
//!         pub url: String as "URL",
//!         pub status: u16,
//!     }
//! }
//! ```

use crate::codec::FieldKind;
use crate::error::Result;
use crate::types::{AttributeValue, KeyType};

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Attribute name on the wire.
    pub name: &'static str,
    pub kind: FieldKind,
    pub role: Option<KeyType>,
}

impl FieldDescriptor {
    pub fn is_key(&self) -> bool {
        self.role.is_some()
    }
}

/// A struct that can be stored as an item.
///
/// Usually implemented through [`record!`](crate::record).
pub trait Record: Default + Send + Sync + 'static {
    /// Fields in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Type name reported in schemas and errors.
    fn record_name() -> &'static str;

    /// Encodes the field bound to `attribute`. Unknown names encode to `None`.
    fn encode_field(&self, attribute: &str) -> Result<Option<AttributeValue>>;

    /// Decodes `value` into the field bound to `attribute`. Unknown names
    /// and values of a kind the field does not accept are ignored.
    fn decode_field(&mut self, attribute: &str, value: &AttributeValue) -> Result<()>;
}

/// Declares a struct and implements [`Record`] for it.
///
/// Each field may carry `as "Name"` to rename its attribute and
/// `=> hash` or `=> range` to mark its key role.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(as $attribute:literal)? $(=> $role:ident)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            const FIELDS: &'static [$crate::FieldDescriptor] = &[
                $(
                    $crate::FieldDescriptor {
                        name: $crate::__attribute_name!($field $(, $attribute)?),
                        kind: <$ty as $crate::AttributeField>::KIND,
                        role: $crate::__key_role!($($role)?),
                    },
                )*
            ];

            fn record_name() -> &'static str {
                stringify!($name)
            }

            #[allow(unused_variables)]
            fn encode_field(
                &self,
                attribute: &str,
            ) -> $crate::Result<::std::option::Option<$crate::AttributeValue>> {
                $(
                    if attribute == $crate::__attribute_name!($field $(, $attribute)?) {
                        return $crate::AttributeField::encode(&self.$field, attribute);
                    }
                )*
                ::std::result::Result::Ok(::std::option::Option::None)
            }

            #[allow(unused_variables)]
            fn decode_field(
                &mut self,
                attribute: &str,
                value: &$crate::AttributeValue,
            ) -> $crate::Result<()> {
                $(
                    if attribute == $crate::__attribute_name!($field $(, $attribute)?) {
                        if let ::std::option::Option::Some(decoded) =
                            <$ty as $crate::AttributeField>::decode(attribute, value)?
                        {
                            self.$field = decoded;
                        }
                        return ::std::result::Result::Ok(());
                    }
                )*
                ::std::result::Result::Ok(())
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __attribute_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $attribute:literal) => {
        $attribute
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __key_role {
    () => {
        ::std::option::Option::None
    };
    (hash) => {
        ::std::option::Option::Some($crate::KeyType::Hash)
    };
    (range) => {
        ::std::option::Option::Some($crate::KeyType::Range)
    };
}
