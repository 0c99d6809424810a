//! Scalar coercion for both source modes
//!
//! String-sourced values (path segments, query values) are parsed into their
//! declared kind. Typed-sourced values (decoded bodies) are only checked: the
//! decoder already chose the representation and nothing is converted.

use crate::error::ErrorKind;
use crate::field::Kind;
use crate::value::Value;

use super::Mode;

/// Coerce a scalar in place, or report why it cannot be
pub fn coerce_scalar(kind: Kind, value: &mut Value, mode: Mode) -> Result<(), ErrorKind> {
    let coerced = match (mode, kind) {
        (_, Kind::String) => {
            return match value {
                Value::String(_) => Ok(()),
                _ => Err(ErrorKind::WrongType),
            };
        }
        (Mode::StringSourced, Kind::Number) => Value::Number(parse_number(value)?),
        (Mode::StringSourced, Kind::Integer) => Value::Number(whole(parse_number(value)?)?),
        (Mode::StringSourced, Kind::Boolean) => Value::Bool(parse_bool(value)?),
        (Mode::TypedSourced, Kind::Number) => {
            return value.as_f64().map(|_| ()).ok_or(ErrorKind::WrongType);
        }
        (Mode::TypedSourced, Kind::Integer) => {
            let n = value.as_f64().ok_or(ErrorKind::WrongType)?;
            return whole(n).map(|_| ());
        }
        (Mode::TypedSourced, Kind::Boolean) => {
            return value.as_bool().map(|_| ()).ok_or(ErrorKind::WrongType);
        }
        _ => return Err(ErrorKind::WrongType),
    };
    *value = coerced;
    Ok(())
}

/// Parse a floating-point literal such as `1`, `1.1` or `-1`
fn parse_number(value: &Value) -> Result<f64, ErrorKind> {
    let raw = value.as_str().ok_or(ErrorKind::WrongType)?;
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ErrorKind::WrongType),
    }
}

fn whole(n: f64) -> Result<f64, ErrorKind> {
    if n.fract() == 0.0 {
        Ok(n)
    } else {
        Err(ErrorKind::WrongType)
    }
}

/// Only the exact literals `true` and `false` are booleans
fn parse_bool(value: &Value) -> Result<bool, ErrorKind> {
    match value.as_str() {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        _ => Err(ErrorKind::WrongType),
    }
}
