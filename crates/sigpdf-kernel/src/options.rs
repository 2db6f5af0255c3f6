//! String-keyed option sets and their layered merge.
//!
//! Three layers feed a signal PDF, lowest precedence first:
//!
//! 1. the entry's registration-time defaults,
//! 2. the options embedded in the looked-up qualified name,
//! 3. the options passed explicitly by the caller.
//!
//! Each layer overwrites same-keyed values of the previous one.

use crate::error::{Result, SignalPdfError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

/// An ordered map from option key to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, String>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite one option, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, or `fallback` when the key is not set.
    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get(key).unwrap_or(fallback)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `higher` on top of `self`.
    ///
    /// Keys present in `higher` win; keys only present in `self` pass through.
    pub fn merge(&self, higher: &Options) -> Options {
        let mut merged = self.0.clone();
        for (key, value) in &higher.0 {
            merged.insert(key.clone(), value.clone());
        }
        Options(merged)
    }

    /// Read a flat TOML table of options.
    ///
    /// Non-string scalars (booleans, integers, floats) are kept in their
    /// textual form; nested tables and arrays are rejected.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = text.parse()?;
        let mut options = Options::new();
        for (key, value) in table {
            let rendered = match value {
                toml::Value::String(s) => s,
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                other => {
                    return Err(SignalPdfError::Config(format!(
                        "option '{key}' must be a scalar, got {}",
                        other.type_str()
                    )));
                }
            };
            options.insert(key, rendered);
        }
        Ok(options)
    }
}

impl Add for Options {
    type Output = Options;

    fn add(self, rhs: Options) -> Options {
        self.merge(&rhs)
    }
}

impl Add<&Options> for &Options {
    type Output = Options;

    fn add(self, rhs: &Options) -> Options {
        self.merge(rhs)
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Options(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
