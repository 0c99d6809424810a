//! Shared test support utilities for integration tests

#![allow(dead_code)]

use crud_core::{ErrorKind, Field, PathValues, QueryValues, Schemas, Validator, ValidatorOptions, Value};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route validator events to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Outcome of one request validation plus the normalized containers
pub struct Validated {
    pub error: Option<ErrorKind>,
    pub query: QueryValues,
    pub body: Value,
    pub path: PathValues,
}

/// A validator with the router defaults
pub fn default_validator() -> Validator {
    Validator::new(ValidatorOptions::default())
}

pub fn stripping_validator() -> Validator {
    Validator::new(ValidatorOptions::default().with_strip_unknown(true))
}

pub fn strict_validator() -> Validator {
    Validator::new(ValidatorOptions::default().with_allow_unknown(false))
}

/// Validate a raw query string against a query schema
pub fn validate_query(validator: &Validator, schema: Field, raw: &str) -> Validated {
    run(validator, &Schemas::new().with_query(schema), QueryValues::parse(raw), Value::Null, PathValues::new())
}

/// Validate a JSON body against a body schema
pub fn validate_body_json(validator: &Validator, schema: Field, json: &str) -> Validated {
    let body = Value::from_json_str(json).expect("test body must be valid JSON");
    run(validator, &Schemas::new().with_body(schema), QueryValues::new(), body, PathValues::new())
}

/// Validate path values against a path schema
pub fn validate_path(validator: &Validator, schema: Field, values: &[(&str, &str)]) -> Validated {
    let path = values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    run(validator, &Schemas::new().with_path(schema), QueryValues::new(), Value::Null, path)
}

/// Validate all three containers and keep them for inspection
pub fn run(
    validator: &Validator,
    schemas: &Schemas,
    mut query: QueryValues,
    mut body: Value,
    mut path: PathValues,
) -> Validated {
    init_tracing();
    let error = validator
        .validate(schemas, &mut query, &mut body, &mut path)
        .err()
        .map(|e| e.kind());
    Validated {
        error,
        query,
        body,
        path,
    }
}
