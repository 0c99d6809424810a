//! Field kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive or composite category of a [`Field`](super::Field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Number,
    /// A number with zero fractional part
    Integer,
    Boolean,
    Array,
    Object,
    /// Opaque upload; bodies of this kind are not decoded or validated
    File,
}

impl Kind {
    /// Whether values of this kind are single scalars
    pub fn is_scalar(&self) -> bool {
        matches!(self, Kind::String | Kind::Number | Kind::Integer | Kind::Boolean)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Number | Kind::Integer)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::String => write!(f, "string"),
            Kind::Number => write!(f, "number"),
            Kind::Integer => write!(f, "integer"),
            Kind::Boolean => write!(f, "boolean"),
            Kind::Array => write!(f, "array"),
            Kind::Object => write!(f, "object"),
            Kind::File => write!(f, "file"),
        }
    }
}
