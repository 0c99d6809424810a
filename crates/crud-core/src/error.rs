//! Error types for the crud core library
//!
//! Validation failures travel through [`ValidationError`], a structured error
//! carrying an [`ErrorKind`], the request section and the field path as data.
//! Everything that is not a validation failure (configuration loading, route
//! registration) uses the crate-level [`Error`] enum.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

use crate::evaluator::{FieldPath, Segment};
use crate::validator::Section;

/// Category of a validation failure
///
/// Callers branch on the kind; the human-readable message is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Mandatory value missing, or supplied as an empty query string
    Required,
    /// Value cannot be coerced to, or does not match, the declared kind
    WrongType,
    /// Numeric value or element count below the declared minimum
    Minimum,
    /// Numeric value or element count above the declared maximum
    Maximum,
    /// Normalized value is not one of the allowed values
    EnumNotFound,
    /// Key is not declared and unknown keys are not permitted
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Required => write!(f, "required field missing"),
            ErrorKind::WrongType => write!(f, "wrong type passed"),
            ErrorKind::Minimum => write!(f, "minimum exceeded"),
            ErrorKind::Maximum => write!(f, "maximum exceeded"),
            ErrorKind::EnumNotFound => write!(f, "unknown enum value"),
            ErrorKind::Unknown => write!(f, "unknown value"),
        }
    }
}

/// A single validation failure annotated with where it happened
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    kind: ErrorKind,
    section: Option<Section>,
    path: FieldPath,
}

impl ValidationError {
    /// Create an error of the given kind at the given field path
    pub fn new(kind: ErrorKind, path: FieldPath) -> Self {
        Self {
            kind,
            section: None,
            path,
        }
    }

    /// Error of the given kind at the root of the value being evaluated
    pub(crate) fn here(kind: ErrorKind) -> Self {
        Self::new(kind, FieldPath::root())
    }

    /// Re-anchor the error one level up, under an object key
    pub(crate) fn within_key(mut self, key: &str) -> Self {
        self.path.prepend(Segment::Key(key.to_string()));
        self
    }

    /// Re-anchor the error one level up, under an array index
    pub(crate) fn within_index(mut self, index: usize) -> Self {
        self.path.prepend(Segment::Index(index));
        self
    }

    /// Attach the request section the error was raised in
    pub fn in_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn section(&self) -> Option<Section> {
        self.section
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Check the error category without looking at the message
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(section) = self.section {
            write!(f, "{} ", section)?;
        }
        write!(f, "validation failed")?;
        if !self.path.is_root() {
            write!(f, " for field {}", self.path)?;
        }
        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for ValidationError {}

/// Main error type for crud operations outside of request validation
#[derive(Error, Debug)]
pub enum Error {
    /// A request failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Route declarations the engine cannot validate against
    #[error("Route error: {method} {path} - {message}")]
    Route {
        method: String,
        path: String,
        message: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let path = FieldPath::root().key("complex1").key("array").index(0).key("id");
        let err = ValidationError::new(ErrorKind::WrongType, path).in_section(Section::Body);
        assert_eq!(
            err.to_string(),
            "body validation failed for field complex1.array[0].id: wrong type passed"
        );
    }

    #[test]
    fn test_root_error_omits_field() {
        let err = ValidationError::new(ErrorKind::Required, FieldPath::root()).in_section(Section::Body);
        assert_eq!(err.to_string(), "body validation failed: required field missing");
    }

    #[test]
    fn test_kind_is_comparable() {
        let err = ValidationError::new(ErrorKind::Maximum, FieldPath::root().key("q"));
        assert!(err.is(ErrorKind::Maximum));
        assert!(!err.is(ErrorKind::Minimum));
        assert_eq!(err.section(), None);
    }

    #[test]
    fn test_error_wraps_validation() {
        let err: Error = ValidationError::new(ErrorKind::Unknown, FieldPath::root().key("x")).into();
        assert!(matches!(err, Error::Validation(ref v) if v.kind() == ErrorKind::Unknown));
        assert_eq!(err.to_string(), "validation failed for field x: unknown value");
    }
}
