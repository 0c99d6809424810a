//! Route table handed over by collaborators
//!
//! A [`Spec`] declares one endpoint: method, path template, handler,
//! pre-handlers and the three section schemas. The engine treats handlers as
//! opaque; a [`Router`] checks each spec against the schemas, records it and
//! passes it to an [`Adapter`], which wires it into a concrete HTTP framework
//! and calls [`Validator::validate`] from its middleware.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::info;

use crate::config::ValidatorOptions;
use crate::error::{Error, Result, ValidationError};
use crate::field::Kind;
use crate::params::{PathValues, QueryValues};
use crate::validator::{Schemas, Validator};
use crate::value::Value;

/// `{name}` or `{name:pattern}` in a path template
static PARAM_PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();

/// HTTP method of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(Error::Route {
                method: s.to_string(),
                path: String::new(),
                message: "unsupported HTTP method".to_string(),
            }),
        }
    }
}

/// One endpoint declaration
#[derive(Debug, Clone)]
pub struct Spec<H> {
    pub method: Method,
    /// Path template; segments written `{name}` (optionally `{name:pattern}`)
    /// bind path values
    pub path: String,
    pub handler: H,
    pub pre_handlers: Vec<H>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub schemas: Schemas,
}

impl<H> Spec<H> {
    pub fn new(method: Method, path: impl Into<String>, handler: H) -> Self {
        Self {
            method,
            path: path.into(),
            handler,
            pre_handlers: Vec::new(),
            description: None,
            tags: Vec::new(),
            schemas: Schemas::default(),
        }
    }

    pub fn with_schemas(mut self, schemas: Schemas) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn with_pre_handler(mut self, pre_handler: H) -> Self {
        self.pre_handlers.push(pre_handler);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Names of the `{param}` segments in the path template
    pub fn path_params(&self) -> Result<Vec<&str>> {
        let pattern = PARAM_PATTERN
            .get_or_init(|| Regex::new(r"\{([^{}:]*)(?::[^{}]*)?\}"))
            .as_ref()
            .map_err(|e| self.error(format!("invalid path parameter pattern: {}", e)))?;

        let mut params = Vec::new();
        for captures in pattern.captures_iter(&self.path) {
            let name = captures.get(1).map_or("", |m| m.as_str());
            if name.is_empty() {
                return Err(self.error("empty path parameter name"));
            }
            params.push(name);
        }
        if pattern.replace_all(&self.path, "").contains(['{', '}']) {
            return Err(self.error("unbalanced brace in path template"));
        }
        Ok(params)
    }

    /// Reject declarations the validator cannot honor
    pub fn check(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(self.error("path template must start with '/'"));
        }

        let path_schema = &self.schemas.path;
        let query_schema = &self.schemas.query;
        if path_schema.is_initialized() && path_schema.kind() != Some(Kind::Object) {
            return Err(self.error("path schema must be an object"));
        }
        if query_schema.is_initialized() && query_schema.kind() != Some(Kind::Object) {
            return Err(self.error("query schema must be an object"));
        }

        let params = self.path_params()?;
        if path_schema.is_initialized() {
            if let Some(missing) = params
                .iter()
                .find(|name| !path_schema.properties().contains_key(**name))
            {
                return Err(self.error(format!("path parameter '{}' is not declared in the path schema", missing)));
            }
        }
        Ok(())
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Route {
            method: self.method.to_string(),
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

/// Installs checked routes into a concrete HTTP framework
///
/// Implementations extract path and query values, decode the body, call
/// [`Validator::validate`] before the handler runs and re-serialize the
/// normalized containers.
pub trait Adapter {
    type Handler;

    fn install(&mut self, validator: &Validator, spec: &Spec<Self::Handler>) -> Result<()>;
}

/// Route registry bound to one adapter and one set of validation options
#[derive(Debug)]
pub struct Router<A: Adapter> {
    validator: Validator,
    adapter: A,
    routes: BTreeSet<(Method, String)>,
}

impl<A: Adapter> Router<A> {
    pub fn new(adapter: A, options: ValidatorOptions) -> Self {
        Self {
            validator: Validator::new(options),
            adapter,
            routes: BTreeSet::new(),
        }
    }

    /// Check, record and install one route
    pub fn add(&mut self, spec: Spec<A::Handler>) -> Result<()> {
        spec.check()?;
        let key = (spec.method, spec.path.clone());
        if self.routes.contains(&key) {
            return Err(spec.error("route is already registered"));
        }

        self.adapter.install(&self.validator, &spec)?;
        info!(method = %spec.method, path = %spec.path, "route registered");
        self.routes.insert(key);
        Ok(())
    }

    /// Add several routes, stopping at the first failure
    pub fn add_all<I>(&mut self, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = Spec<A::Handler>>,
    {
        specs.into_iter().try_for_each(|spec| self.add(spec))
    }

    /// Registered routes, ordered by method then path
    pub fn routes(&self) -> impl Iterator<Item = (Method, &str)> {
        self.routes.iter().map(|(method, path)| (*method, path.as_str()))
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Shorthand for [`Validator::validate`] with this router's options
    pub fn validate(
        &self,
        schemas: &Schemas,
        query: &mut QueryValues,
        body: &mut Value,
        path: &mut PathValues,
    ) -> std::result::Result<(), ValidationError> {
        self.validator.validate(schemas, query, body, path)
    }
}
