//! Crud Core - schema-driven validation of HTTP request surfaces
//!
//! This crate validates and normalizes the three inputs of an HTTP request
//! against per-endpoint schemas: path parameters, query parameters and the
//! decoded body. String-encoded inputs are coerced to typed values, defaults
//! are applied, constraints (required, min/max, enumerations) are enforced and
//! unknown keys are stripped or rejected.
//!
//! # Main Components
//!
//! - **Field model**: [`Field`] schema nodes built with chainable modifiers
//! - **Evaluator**: recursive coercion and constraint checks, see [`evaluator`]
//! - **Validator**: the per-request entry point, [`Validator::validate`]
//! - **Routes**: the collaborator-facing route table, [`Router`] and [`Adapter`]
//! - **Error Handling**: [`ValidationError`] with a testable [`ErrorKind`]
//!
//! # Example
//!
//! ```rust
//! use crud_core::field::{integer, object, string};
//! use crud_core::{ErrorKind, PathValues, QueryValues, Schemas, Validator, ValidatorOptions, Value};
//!
//! let schemas = Schemas::new()
//!     .with_query(object([("limit", integer().max(100).default(20))]))
//!     .with_body(object([("name", string().required())]));
//!
//! let validator = Validator::new(ValidatorOptions::default().with_strip_unknown(true));
//!
//! let mut query = QueryValues::parse("");
//! let mut body = Value::from_json_str(r#"{"name":"widget","junk":1}"#).unwrap();
//! validator
//!     .validate(&schemas, &mut query, &mut body, &mut PathValues::new())
//!     .unwrap();
//! assert_eq!(query.encode(), "limit=20");
//! assert_eq!(body.to_json_string().unwrap(), r#"{"name":"widget"}"#);
//!
//! let mut query = QueryValues::parse("limit=500");
//! let err = validator
//!     .validate(&schemas, &mut query, &mut body, &mut PathValues::new())
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Maximum);
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod field;
pub mod params;
pub mod route;
pub mod validator;
pub mod value;

// Re-export main types for convenience
pub use config::ValidatorOptions;
pub use error::{Error, ErrorKind, Result, ValidationError};
pub use evaluator::{FieldPath, Mode, Policy};
pub use field::{Bound, Field, Kind};
pub use params::{PathValues, QueryValues};
pub use route::{Adapter, Method, Router, Spec};
pub use validator::{Schemas, Section, Validator};
pub use value::{Map, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
