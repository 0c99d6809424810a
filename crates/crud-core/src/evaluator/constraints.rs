//! Bound and enumeration checks on normalized values

use crate::error::ErrorKind;
use crate::field::Field;
use crate::value::Value;

/// Compare a magnitude (a number, or an array's element count) to the bounds
pub fn check_bounds(field: &Field, magnitude: f64) -> Result<(), ErrorKind> {
    if let Some(minimum) = field.minimum() {
        if magnitude < minimum {
            return Err(ErrorKind::Minimum);
        }
    }
    if let Some(maximum) = field.maximum() {
        if magnitude > maximum {
            return Err(ErrorKind::Maximum);
        }
    }
    Ok(())
}

/// The normalized value must be one of the allowed values, if any are declared
pub fn check_enum(field: &Field, value: &Value) -> Result<(), ErrorKind> {
    match field.enum_values() {
        Some(allowed) if !allowed.contains(value) => Err(ErrorKind::EnumNotFound),
        _ => Ok(()),
    }
}
