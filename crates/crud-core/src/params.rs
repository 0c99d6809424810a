//! String-sourced request containers
//!
//! Query strings may repeat a key, so [`QueryValues`] maps every name to an
//! ordered list of raw values. Path segments bind exactly one value per name
//! and use a plain [`PathValues`] map.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// Route segment name to raw segment value
pub type PathValues = BTreeMap<String, String>;

/// Multi-valued query parameters
///
/// Validation may insert defaults or strip unknown keys; [`is_modified`]
/// tells the adapter whether the query needs re-encoding afterwards.
///
/// [`is_modified`]: QueryValues::is_modified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    values: BTreeMap<String, Vec<String>>,
    modified: bool,
}

impl QueryValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `application/x-www-form-urlencoded` query string
    ///
    /// Repeated keys keep their values in encounter order. A leading `?` is
    /// ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            values.entry(key.into_owned()).or_default().push(value.into_owned());
        }
        Self {
            values,
            modified: false,
        }
    }

    /// Encode as a query string with keys sorted
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.values {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// All values bound to `key`, in encounter order
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// First value bound to `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Append a value to `key`
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Replace every value bound to `key` and mark the container modified
    pub fn set(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.values.insert(key.into(), values);
        self.modified = true;
    }

    /// Remove `key` and mark the container modified if it was present
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let removed = self.values.remove(key);
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether validation changed the container since it was parsed
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

impl<K, V> FromIterator<(K, V)> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = QueryValues::new();
        for (key, value) in iter {
            query.append(key, value);
        }
        query
    }
}
