//! Request parameter storage and canonical ordering
//!
//! Keys and values are restricted to `[A-Za-z0-9_.-]`; every other character
//! is stripped on insertion. Because of that, stored values never need
//! percent-encoding when they are placed into a query string, and the
//! canonical (sorted) form used for signing is identical to what goes on the
//! wire.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Returns `true` if `c` may appear in a parameter key or value.
#[must_use]
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Strip every character outside `[A-Za-z0-9_.-]`, preserving the order of
/// the characters that remain.
#[must_use]
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|c| is_allowed_char(*c)).collect()
}

/// Sanitized key/value request parameters in canonical order.
///
/// Backed by a `BTreeMap`, so iteration is always ascending by key in byte
/// order regardless of insertion order. Setting an existing key replaces its
/// value. There is no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterStore {
    params: BTreeMap<String, String>,
}

impl ParameterStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl AsRef<str>, value: impl fmt::Display) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a parameter, sanitizing both key and value
    pub fn set(&mut self, key: impl AsRef<str>, value: impl fmt::Display) -> &mut Self {
        let key = sanitize(key.as_ref());
        let value = sanitize(&value.to_string());
        self.params.insert(key, value);
        self
    }

    /// Copy every parameter of `other` into this store, replacing duplicates
    pub fn extend(&mut self, other: &ParameterStore) -> &mut Self {
        for (key, value) in other.iter() {
            self.params.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Look up a parameter value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// All parameters, ascending by key
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Iterate in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `key=value` pairs joined with `&`, in canonical order.
    ///
    /// This is the normalized parameter string that OAuth signs, and (because
    /// values are pre-sanitized) also a valid query string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}
