//! Router defaults and per-node overrides for undeclared keys

mod test_support;

use crud_core::field::{object, string};
use crud_core::{ErrorKind, PathValues, QueryValues, Schemas, Validator, ValidatorOptions, Value};
use test_support::{default_validator, run, strict_validator, stripping_validator, validate_body_json};

fn empty() -> crud_core::Field {
    object::<_, String>([])
}

#[test]
fn test_strip_body() {
    let outcome = validate_body_json(&stripping_validator(), empty(), r#"{"id":"blah"}"#);
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.body.to_json_string().unwrap(), "{}");

    let outcome = validate_body_json(&stripping_validator(), empty().strip(false), r#"{"id":"blah"}"#);
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.body.to_json_string().unwrap(), r#"{"id":"blah"}"#);
}

#[test]
fn test_unknown_body() {
    let validator = Validator::new(ValidatorOptions::default().with_allow_unknown(true));
    let outcome = validate_body_json(&validator, empty(), r#"{"id":"blah"}"#);
    assert_eq!(outcome.error, None);

    let outcome = validate_body_json(&validator, empty().unknown(false), r#"{"id":"blah"}"#);
    assert_eq!(outcome.error, Some(ErrorKind::Unknown));
}

#[test]
fn test_unknown_query() {
    let validator = strict_validator();
    let query = || QueryValues::parse("unknown=value");

    let schemas = Schemas::new().with_query(empty());
    let outcome = run(&validator, &schemas, query(), Value::Null, PathValues::new());
    assert_eq!(outcome.error, Some(ErrorKind::Unknown));

    let schemas = Schemas::new().with_query(empty().unknown(true));
    let outcome = run(&validator, &schemas, query(), Value::Null, PathValues::new());
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.query.get("unknown"), Some("value"));
}

#[test]
fn test_strip_query() {
    let validator = default_validator();

    let schemas = Schemas::new().with_query(empty().strip(false));
    let outcome = run(&validator, &schemas, QueryValues::parse("unknown=value"), Value::Null, PathValues::new());
    assert_eq!(outcome.error, None);
    assert!(outcome.query.contains_key("unknown"));
    assert!(!outcome.query.is_modified());

    let schemas = Schemas::new().with_query(empty().strip(true));
    let outcome = run(&validator, &schemas, outcome.query, Value::Null, PathValues::new());
    assert_eq!(outcome.error, None);
    assert!(!outcome.query.contains_key("unknown"));
    assert!(outcome.query.is_modified());
}

#[test]
fn test_strip_wins_over_forbid() {
    let validator = Validator::new(
        ValidatorOptions::default()
            .with_allow_unknown(false)
            .with_strip_unknown(true),
    );
    let outcome = validate_body_json(&validator, object([("keep", string())]), r#"{"keep":"a","drop":1}"#);
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.body.to_json_string().unwrap(), r#"{"keep":"a"}"#);
}

#[test]
fn test_declared_keys_never_unknown() {
    let outcome = validate_body_json(&strict_validator(), object([("keep", string())]), r#"{"keep":"a"}"#);
    assert_eq!(outcome.error, None);
}
