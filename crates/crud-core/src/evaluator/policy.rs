//! Unknown-key policy
//!
//! The router fixes a default [`Policy`]; each Object node may override either
//! half of it. Overrides are resolved per node at validation time and never
//! baked into the schema, so one schema tree can serve validators configured
//! with different defaults.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ValidationError};
use crate::field::Field;

/// Router-level handling of undeclared object keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Undeclared keys are left in place without error
    pub allow_unknown: bool,
    /// Undeclared keys are removed before any other check
    pub strip_unknown: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            allow_unknown: true,
            strip_unknown: false,
        }
    }
}

impl Policy {
    /// Effective policy for one Object node
    pub fn resolve(&self, field: &Field) -> Policy {
        Policy {
            allow_unknown: field.unknown_override().unwrap_or(self.allow_unknown),
            strip_unknown: field.strip_override().unwrap_or(self.strip_unknown),
        }
    }

    /// Apply the node's effective policy to the keys of a container
    ///
    /// Returns the undeclared keys the caller must remove (empty unless
    /// stripping), or an Unknown error naming the first undeclared key when
    /// unknown keys are neither stripped nor allowed.
    pub fn undeclared_keys<'a, I>(&self, field: &Field, keys: I) -> Result<Vec<String>, ValidationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let effective = self.resolve(field);
        if !effective.strip_unknown && effective.allow_unknown {
            return Ok(Vec::new());
        }

        let properties = field.properties();
        let mut undeclared = keys.into_iter().filter(|key| !properties.contains_key(*key));

        if effective.strip_unknown {
            return Ok(undeclared.map(str::to_string).collect());
        }
        match undeclared.next() {
            Some(key) => Err(ValidationError::here(ErrorKind::Unknown).within_key(key)),
            None => Ok(Vec::new()),
        }
    }
}
