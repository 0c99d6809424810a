//! Coercion & constraint evaluator
//!
//! Walks one value against one [`Field`], rewriting the value in place to its
//! normalized form: string-sourced scalars are parsed, defaults are inserted
//! into objects and undeclared keys are stripped according to the [`Policy`].
//! The first failure aborts the walk and is returned with the path to the
//! offending value.
//!
//! The evaluator is organized into focused modules:
//! - `coerce`: scalar parsing and type checks per source mode
//! - `constraints`: minimum/maximum and enumeration checks
//! - `policy`: unknown-key resolution for Object nodes
//! - `path`: field paths attached to errors
//!
//! Copyright (c) 2025 Crud Team
//! Licensed under the Apache-2.0 license

pub mod coerce;
pub mod constraints;
pub mod path;
pub mod policy;

pub use path::{FieldPath, Segment};
pub use policy::Policy;

use tracing::trace;

use crate::error::{ErrorKind, ValidationError};
use crate::field::{Field, Kind};
use crate::value::{Map, Value};

/// Where the raw input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Path and query values: every scalar arrives as a string to be parsed
    StringSourced,
    /// Decoded bodies: values already carry their type
    TypedSourced,
}

/// Settings shared by every node of one walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub mode: Mode,
    pub policy: Policy,
}

impl Context {
    pub fn new(mode: Mode, policy: Policy) -> Self {
        Self { mode, policy }
    }
}

/// Validate `value` against `field`, normalizing it in place
///
/// An uninitialized field accepts anything.
pub fn evaluate(field: &Field, value: &mut Value, ctx: Context) -> Result<(), ValidationError> {
    let Some(kind) = field.kind() else {
        return Ok(());
    };

    match kind {
        Kind::String | Kind::Number | Kind::Integer | Kind::Boolean => {
            coerce::coerce_scalar(kind, value, ctx.mode).map_err(ValidationError::here)?;
        }
        Kind::Array => evaluate_array(field, value, ctx)?,
        Kind::Object => evaluate_object(field, value, ctx)?,
        Kind::File => {}
    }

    if kind.is_numeric() {
        if let Some(n) = value.as_f64() {
            constraints::check_bounds(field, n).map_err(ValidationError::here)?;
        }
    }
    // objects are checked through their properties only
    if kind == Kind::Object {
        return Ok(());
    }
    constraints::check_enum(field, value).map_err(ValidationError::here)
}

fn evaluate_array(field: &Field, value: &mut Value, ctx: Context) -> Result<(), ValidationError> {
    // a lone query value is a one-element sequence
    if ctx.mode == Mode::StringSourced && matches!(value, Value::String(_)) {
        let single = std::mem::take(value);
        *value = Value::Array(vec![single]);
    }

    let Value::Array(elements) = value else {
        return Err(ValidationError::here(ErrorKind::WrongType));
    };

    if let Some(item) = field.item_schema() {
        for (index, element) in elements.iter_mut().enumerate() {
            evaluate(item, element, ctx).map_err(|e| e.within_index(index))?;
        }
    }

    constraints::check_bounds(field, elements.len() as f64).map_err(ValidationError::here)
}

fn evaluate_object(field: &Field, value: &mut Value, ctx: Context) -> Result<(), ValidationError> {
    let Value::Object(map) = value else {
        return Err(ValidationError::here(ErrorKind::WrongType));
    };

    let undeclared = ctx.policy.undeclared_keys(field, map.keys().map(String::as_str))?;
    for key in undeclared {
        trace!(key = %key, "stripping undeclared key");
        map.remove(&key);
    }

    for (name, property) in field.properties() {
        match map.get_mut(name).filter(|v| !v.is_null()) {
            Some(present) => evaluate(property, present, ctx).map_err(|e| e.within_key(name))?,
            None => fill_absent(map, name, property)?,
        }
    }
    Ok(())
}

/// Insert the default for an absent property, or fail if it is required
fn fill_absent(map: &mut Map, name: &str, property: &Field) -> Result<(), ValidationError> {
    if let Some(default) = property.default_value() {
        trace!(field = name, "applying default");
        map.insert(name.to_string(), default.clone());
    } else if property.is_required() {
        return Err(ValidationError::here(ErrorKind::Required).within_key(name));
    }
    Ok(())
}
