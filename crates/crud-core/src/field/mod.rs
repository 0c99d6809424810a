//! Field model: schema nodes describing one value's expected shape
//!
//! A [`Field`] is built once, when a route is declared, by one of the kind
//! constructors and a chain of consuming modifiers:
//!
//! ```rust
//! use crud_core::field::{array, integer, object, string};
//!
//! let body = object([
//!     ("name", string().required()),
//!     ("tags", array().items(string()).max(10)),
//!     ("limit", integer().min(1).max(100).default(20)),
//! ]);
//! assert!(body.is_initialized());
//! ```
//!
//! After construction a Field is never mutated; every request validation reads
//! the same tree.
//!
//! Copyright (c) 2025 Crud Team
//! Licensed under the Apache-2.0 license

mod kind;

pub use kind::Kind;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::Value;

/// Numeric types accepted by [`Field::min`] and [`Field::max`]
///
/// Bounds are stored as `f64`; integers wider than 53 bits lose precision.
pub trait Bound {
    fn to_bound(self) -> f64;
}

macro_rules! impl_bound {
    ($($ty:ty),*) => {
        $(
            impl Bound for $ty {
                fn to_bound(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_bound!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// A schema node
///
/// [`Field::uninitialized`] is the placeholder that stands for "no schema
/// declared" in a [`Schemas`](crate::validator::Schemas) section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<Kind>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum: Option<f64>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    enumeration: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Field>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, Field>,
    #[serde(rename = "unknown", skip_serializing_if = "Option::is_none")]
    unknown_override: Option<bool>,
    #[serde(rename = "strip", skip_serializing_if = "Option::is_none")]
    strip_override: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// A string field
pub fn string() -> Field {
    Field::of(Kind::String)
}

/// A floating-point number field
pub fn number() -> Field {
    Field::of(Kind::Number)
}

/// A whole-number field
pub fn integer() -> Field {
    Field::of(Kind::Integer)
}

/// A boolean field
pub fn boolean() -> Field {
    Field::of(Kind::Boolean)
}

/// A sequence field; see [`Field::items`]
pub fn array() -> Field {
    Field::of(Kind::Array)
}

/// An opaque file upload
pub fn file() -> Field {
    Field::of(Kind::File)
}

/// A string-keyed mapping with the given declared properties
pub fn object<I, K>(properties: I) -> Field
where
    I: IntoIterator<Item = (K, Field)>,
    K: Into<String>,
{
    let mut field = Field::of(Kind::Object);
    field.properties = properties.into_iter().map(|(k, f)| (k.into(), f)).collect();
    field
}

impl Field {
    fn of(kind: Kind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// The zero-value placeholder; not a schema
    pub fn uninitialized() -> Self {
        Default::default()
    }

    pub fn string() -> Self {
        string()
    }

    pub fn number() -> Self {
        number()
    }

    pub fn integer() -> Self {
        integer()
    }

    pub fn boolean() -> Self {
        boolean()
    }

    pub fn array() -> Self {
        array()
    }

    pub fn file() -> Self {
        file()
    }

    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Field)>,
        K: Into<String>,
    {
        object(properties)
    }

    /// Absence of the value fails validation
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value inserted when the field is absent
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Lower bound: numeric for Number/Integer, element count for Array
    pub fn min(mut self, minimum: impl Bound) -> Self {
        self.minimum = Some(minimum.to_bound());
        self
    }

    /// Upper bound: numeric for Number/Integer, element count for Array
    pub fn max(mut self, maximum: impl Bound) -> Self {
        self.maximum = Some(maximum.to_bound());
        self
    }

    /// Restrict the normalized value to a fixed set
    pub fn enumeration<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enumeration = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Schema applied to every array element
    pub fn items(mut self, item: Field) -> Self {
        self.items = Some(Box::new(item));
        self
    }

    /// Override the router's allow-unknown policy for this object
    pub fn unknown(mut self, allow: bool) -> Self {
        self.unknown_override = Some(allow);
        self
    }

    /// Override the router's strip-unknown policy for this object
    pub fn strip(mut self, strip: bool) -> Self {
        self.strip_override = Some(strip);
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// `None` for the uninitialized placeholder
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    /// True iff the field was built through a kind constructor
    pub fn is_initialized(&self) -> bool {
        self.kind.is_some()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<f64> {
        self.maximum
    }

    pub fn enum_values(&self) -> Option<&[Value]> {
        self.enumeration.as_deref()
    }

    pub fn item_schema(&self) -> Option<&Field> {
        self.items.as_deref()
    }

    /// Declared properties, in lexicographic order
    pub fn properties(&self) -> &BTreeMap<String, Field> {
        &self.properties
    }

    pub fn unknown_override(&self) -> Option<bool> {
        self.unknown_override
    }

    pub fn strip_override(&self) -> Option<bool> {
        self.strip_override
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
