//! Body validation through the public entry point

mod test_support;

use crud_core::field::{array, boolean, integer, number, object, string};
use crud_core::{ErrorKind, Field, PathValues, QueryValues, Schemas, Section, Value};
use test_support::{default_validator, run, strict_validator, stripping_validator, validate_body_json};

#[test]
fn test_simple_body_validation() {
    let cases: Vec<(Field, &str, Option<ErrorKind>)> = vec![
        (number(), "1", None),
        (number(), "1.5", None),
        (number(), r#""a""#, Some(ErrorKind::WrongType)),
        (string(), r#""2""#, None),
        (string(), "2", Some(ErrorKind::WrongType)),
        (boolean(), "true", None),
        (boolean(), "false", None),
        (boolean(), r#""1""#, Some(ErrorKind::WrongType)),
        // typed bodies are never parsed from text
        (integer(), r#""1""#, Some(ErrorKind::WrongType)),
    ];

    let validator = default_validator();
    for (i, (schema, input, expected)) in cases.into_iter().enumerate() {
        let outcome = validate_body_json(&validator, schema, input);
        assert_eq!(outcome.error, expected, "case {}: input '{}'", i, input);
    }
}

#[test]
fn test_body_validation_table() {
    let complex = || {
        object([(
            "array",
            array().required().items(object([("id", number().required())])),
        )])
        .required()
    };

    let cases: Vec<(Vec<(&str, Field)>, &str, Option<ErrorKind>)> = vec![
        (vec![("int", integer())], "{}", None),
        (vec![("int", integer().required())], "{}", Some(ErrorKind::Required)),
        (vec![("int", integer().required())], r#"{"int":1}"#, None),
        (vec![("int", integer().required())], r#"{"int":1.9}"#, Some(ErrorKind::WrongType)),
        (vec![("float", number().required())], r#"{"float":-1}"#, None),
        (vec![("float", number().required())], r#"{"float":1.1}"#, None),
        (
            vec![("obj1", object([("inner", number().required())]))],
            r#"{"obj1":{"inner":1}}"#,
            None,
        ),
        (
            vec![("obj2", object([("inner", number().required())]))],
            r#"{"obj2":{"inner":"not a number"}}"#,
            Some(ErrorKind::WrongType),
        ),
        (vec![("arr1", array())], r#"{"arr1":[1,"a"]}"#, None),
        (vec![("arr1", array().items(number()))], r#"{"arr1":[1]}"#, None),
        (vec![("arr2", array().items(number()))], r#"{"arr2":["a"]}"#, Some(ErrorKind::WrongType)),
        (vec![("arr3", array().min(2))], r#"{"arr3":["a"]}"#, Some(ErrorKind::Minimum)),
        (vec![("complex1", complex())], r#"{"complex1":{"array":[{"id":1}]}}"#, None),
        (
            vec![("complex2", complex())],
            r#"{"complex2":{"array":[{"id":"a"}]}}"#,
            Some(ErrorKind::WrongType),
        ),
    ];

    let validator = default_validator();
    for (i, (properties, input, expected)) in cases.into_iter().enumerate() {
        let outcome = validate_body_json(&validator, object(properties), input);
        assert_eq!(outcome.error, expected, "case {}: input '{}'", i, input);
    }
}

#[test]
fn test_body_strip_unknown() {
    let cases: Vec<(Field, &str, &str)> = vec![
        (object([("str", string())]), r#"{"str":"ok","unknown1":1}"#, r#"{"str":"ok"}"#),
        (object([("str2", string().default("Hello"))]), "{}", r#"{"str2":"Hello"}"#),
        (object([("int1", integer().default(1))]), "{}", r#"{"int1":1}"#),
    ];

    let validator = stripping_validator();
    for (schema, input, expected) in cases {
        let outcome = validate_body_json(&validator, schema, input);
        assert_eq!(outcome.error, None, "input '{}'", input);
        assert_eq!(outcome.body.to_json_string().unwrap(), expected);
    }
}

#[test]
fn test_body_error_unknown() {
    let outcome = validate_body_json(
        &strict_validator(),
        object([("str", string())]),
        r#"{"str":"ok","unknown1":1}"#,
    );
    assert_eq!(outcome.error, Some(ErrorKind::Unknown));
}

#[test]
fn test_body_required_automatically() {
    let validator = strict_validator();
    let schemas = Schemas::new().with_body(object::<_, String>([]));
    let outcome = run(&validator, &schemas, QueryValues::new(), Value::Null, PathValues::new());
    assert_eq!(outcome.error, Some(ErrorKind::Required));

    // an optional root does not lift the rule
    let schemas = Schemas::new().with_body(string());
    let outcome = run(&validator, &schemas, QueryValues::new(), Value::Null, PathValues::new());
    assert_eq!(outcome.error, Some(ErrorKind::Required));
}

#[test]
fn test_body_error_reports_nested_path() {
    let schemas = Schemas::new().with_body(object([(
        "items",
        array().items(object([("qty", integer().min(1))])),
    )]));
    let mut body = Value::from_json_str(r#"{"items":[{"qty":2},{"qty":0}]}"#).unwrap();
    let err = default_validator()
        .validate(&schemas, &mut QueryValues::new(), &mut body, &mut PathValues::new())
        .unwrap_err();
    assert_eq!(err.section(), Some(Section::Body));
    assert_eq!(err.path().to_string(), "items[1].qty");
    assert_eq!(err.to_string(), "body validation failed for field items[1].qty: minimum exceeded");
}

#[test]
fn test_valid_body_is_left_untouched() {
    let input = r#"{"name":"widget","price":9.5,"tags":["a","b"]}"#;
    let schema = object([
        ("name", string().required()),
        ("price", number().min(0)),
        ("tags", array().items(string())),
    ]);
    let outcome = validate_body_json(&default_validator(), schema, input);
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.body.to_json_string().unwrap(), input);
}
