//! HTTP header handling
//!
//! Header names are lower-cased and trimmed on insertion and lookup, so
//! comparisons are case-insensitive. Names are unique: inserting an
//! existing name replaces its value.

use std::collections::HashMap;
use std::fmt;

/// HTTP headers collection with normalized, unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    headers: HashMap<String, String>,
}

impl HeaderMap {
    /// Create a new empty headers collection
    pub fn new() -> Self {
        HeaderMap {
            headers: HashMap::new(),
        }
    }

    /// Insert a header, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        self.headers.insert(
            normalize(name.as_ref()),
            value.as_ref().trim().to_string(),
        );
    }

    /// Get the value for a header (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(&normalize(name)).map(String::as_str)
    }

    /// Check if a header exists
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&normalize(name))
    }

    /// Remove a header, returning its value if it was present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.headers.remove(&normalize(name))
    }

    /// Get the number of headers
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Check if there are no headers
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterate over all headers (no defined order)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Split a header line at the first colon into a normalized name and a
    /// trimmed value. Returns `None` for lines without a colon; the header
    /// block parser skips those silently.
    pub fn parse_line(line: &str) -> Option<(String, String)> {
        let colon = line.find(':')?;
        let name = normalize(&line[..colon]);
        let value = line[colon + 1..].trim().to_string();
        Some((name, value))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl fmt::Display for HeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}
