//! Router-level validation options
//!
//! Options are fixed when a [`Validator`](crate::validator::Validator) is
//! built. They can be assembled in code, loaded from a YAML or JSON file, and
//! overridden from the environment:
//!
//! - `CRUD_ALLOW_UNKNOWN`: permit undeclared keys (`true`/`false`/`1`/`0`)
//! - `CRUD_STRIP_UNKNOWN`: remove undeclared keys (`true`/`false`/`1`/`0`)

use crate::error::{Error, Result};
use crate::evaluator::Policy;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_ALLOW_UNKNOWN: &str = "CRUD_ALLOW_UNKNOWN";
pub const ENV_STRIP_UNKNOWN: &str = "CRUD_STRIP_UNKNOWN";

/// Validation options applied to every route of a router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Permit keys that are not declared in an object schema
    pub allow_unknown: bool,

    /// Remove keys that are not declared in an object schema
    pub strip_unknown: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            allow_unknown: true,
            strip_unknown: false,
        }
    }
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    pub fn with_strip_unknown(mut self, strip: bool) -> Self {
        self.strip_unknown = strip;
        self
    }

    /// Load options from a file; `.yaml`/`.yml` is read as YAML, anything
    /// else as JSON
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let extension = path.extension().and_then(|s| s.to_str());
        let options = if matches!(extension, Some("yaml") | Some("yml")) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(options)
    }

    /// Apply environment overrides on top of the current values
    pub fn merge_with_env(&mut self) -> Result<()> {
        if let Some(allow) = env_flag(ENV_ALLOW_UNKNOWN)? {
            self.allow_unknown = allow;
        }
        if let Some(strip) = env_flag(ENV_STRIP_UNKNOWN)? {
            self.strip_unknown = strip;
        }
        Ok(())
    }

    /// Defaults merged with the environment
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();
        options.merge_with_env()?;
        Ok(options)
    }

    /// The unknown-key policy handed to the evaluator
    pub fn policy(&self) -> Policy {
        Policy {
            allow_unknown: self.allow_unknown,
            strip_unknown: self.strip_unknown,
        }
    }
}

fn env_flag(name: &str) -> Result<Option<bool>> {
    match std::env::var(name) {
        Ok(raw) => parse_flag(&raw).map(Some).ok_or_else(|| Error::Configuration {
            message: format!("{} must be true, false, 1 or 0, got '{}'", name, raw),
            source: None,
        }),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::Configuration {
            message: format!("{} is not valid unicode", name),
            source: Some(e.into()),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let options = ValidatorOptions::default();
        assert!(options.allow_unknown);
        assert!(!options.strip_unknown);
        assert_eq!(options.policy(), Policy::default());
    }

    #[test]
    fn test_builders() {
        let options = ValidatorOptions::new()
            .with_allow_unknown(false)
            .with_strip_unknown(true);
        assert!(!options.allow_unknown);
        assert!(options.strip_unknown);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "strip_unknown: true").unwrap();

        let options = ValidatorOptions::from_file(file.path()).unwrap();
        assert!(options.strip_unknown);
        // missing keys keep their defaults
        assert!(options.allow_unknown);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"allow_unknown": false}}"#).unwrap();

        let options = ValidatorOptions::from_file(file.path()).unwrap();
        assert!(!options.allow_unknown);
        assert!(!options.strip_unknown);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(ValidatorOptions::from_file(file.path()), Err(Error::Json { .. })));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(" false "), Some(false));
        assert_eq!(parse_flag("yes"), None);
    }
}
