//! Validation orchestrator
//!
//! [`Validator::validate`] is the single entry point adapters call once per
//! request. It runs the evaluator over each declared section in the fixed
//! order Path, Query, Body and returns the first failure, tagged with its
//! [`Section`]. Path and Query values are string-sourced; the body is
//! typed-sourced.
//!
//! Containers are normalized in place: defaults are inserted and undeclared
//! keys stripped. Query values stay in their textual form so the adapter can
//! re-encode them; [`QueryValues::is_modified`] reports whether it has to.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::config::ValidatorOptions;
use crate::error::{ErrorKind, ValidationError};
use crate::evaluator::{evaluate, Context, Mode};
use crate::field::{Field, Kind};
use crate::params::{PathValues, QueryValues};
use crate::value::Value;

/// One independently validated part of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Path,
    Query,
    Body,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Path => write!(f, "path"),
            Section::Query => write!(f, "query"),
            Section::Body => write!(f, "body"),
        }
    }
}

/// The three schemas of one endpoint
///
/// A section left as [`Field::uninitialized`] is not validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schemas {
    pub path: Field,
    pub query: Field,
    pub body: Field,
}

impl Schemas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: Field) -> Self {
        self.path = path;
        self
    }

    pub fn with_query(mut self, query: Field) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Field) -> Self {
        self.body = body;
        self
    }

    /// Declared sections, in validation order
    pub fn declared(&self) -> impl Iterator<Item = (Section, &Field)> {
        [
            (Section::Path, &self.path),
            (Section::Query, &self.query),
            (Section::Body, &self.body),
        ]
        .into_iter()
        .filter(|(_, field)| field.is_initialized())
    }
}

/// Validates requests against endpoint schemas under fixed router options
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate and normalize one request
    ///
    /// Sections whose schema is uninitialized are skipped and their
    /// containers left untouched.
    pub fn validate(
        &self,
        schemas: &Schemas,
        query: &mut QueryValues,
        body: &mut Value,
        path: &mut PathValues,
    ) -> Result<(), ValidationError> {
        for (section, field) in schemas.declared() {
            debug!(%section, "validating request section");
            let result = match section {
                Section::Path => self.validate_path(field, path),
                Section::Query => self.validate_query(field, query),
                Section::Body => self.validate_body(field, body),
            };
            if let Err(err) = result {
                let err = err.in_section(section);
                debug!(%section, field = %err.path(), kind = ?err.kind(), "request validation failed");
                return Err(err);
            }
        }
        Ok(())
    }

    fn string_context(&self) -> Context {
        Context::new(Mode::StringSourced, self.options.policy())
    }

    fn validate_path(&self, field: &Field, path: &mut PathValues) -> Result<(), ValidationError> {
        require_object_root(field)?;
        let ctx = self.string_context();

        for key in ctx.policy.undeclared_keys(field, path.keys().map(String::as_str))? {
            trace!(key = %key, "stripping undeclared path value");
            path.remove(&key);
        }

        for (name, property) in field.properties() {
            // an empty segment was never bound by the route
            match path.get(name).filter(|raw| !raw.is_empty()) {
                Some(raw) => {
                    let mut value = Value::String(raw.clone());
                    evaluate(property, &mut value, ctx).map_err(|e| e.within_key(name))?;
                }
                None => {
                    if let Some(default) = property.default_value() {
                        trace!(field = %name, "applying path default");
                        path.insert(name.clone(), default.to_query_strings().join(","));
                    } else if property.is_required() {
                        return Err(ValidationError::here(ErrorKind::Required).within_key(name));
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_query(&self, field: &Field, query: &mut QueryValues) -> Result<(), ValidationError> {
        require_object_root(field)?;
        let ctx = self.string_context();

        for key in ctx.policy.undeclared_keys(field, query.keys())? {
            trace!(key = %key, "stripping undeclared query value");
            query.remove(&key);
        }

        for (name, property) in field.properties() {
            let values = query.get_all(name).unwrap_or_default();
            if values.is_empty() {
                apply_query_default(query, name, property)?;
                continue;
            }

            let is_array = property.kind() == Some(Kind::Array);
            if values.len() > 1 && !is_array {
                return Err(ValidationError::here(ErrorKind::WrongType).within_key(name));
            }
            // an empty value for a required scalar counts as absent
            let scalar = property.kind().is_some_and(|kind| kind.is_scalar());
            if scalar && property.is_required() && values[0].is_empty() {
                apply_query_default(query, name, property)?;
                continue;
            }

            let mut value = if is_array {
                Value::from(values.to_vec())
            } else {
                Value::String(values[0].clone())
            };
            evaluate(property, &mut value, ctx).map_err(|e| e.within_key(name))?;
        }
        Ok(())
    }

    fn validate_body(&self, field: &Field, body: &mut Value) -> Result<(), ValidationError> {
        if field.kind() == Some(Kind::File) {
            return Ok(());
        }
        // a declared body must be present, whatever the root field says
        if body.is_null() {
            return Err(ValidationError::here(ErrorKind::Required));
        }
        evaluate(field, body, Context::new(Mode::TypedSourced, self.options.policy()))
    }
}

/// Path and Query are flat name/value maps and need an Object schema
fn require_object_root(field: &Field) -> Result<(), ValidationError> {
    match field.kind() {
        Some(Kind::Object) => Ok(()),
        _ => Err(ValidationError::here(ErrorKind::WrongType)),
    }
}

fn apply_query_default(query: &mut QueryValues, name: &str, property: &Field) -> Result<(), ValidationError> {
    match property.default_value() {
        Some(default) => {
            let values = default.to_query_strings();
            if !values.is_empty() {
                trace!(field = name, "applying query default");
                query.set(name, values);
            }
            Ok(())
        }
        None if property.is_required() => Err(ValidationError::here(ErrorKind::Required).within_key(name)),
        None => Ok(()),
    }
}
