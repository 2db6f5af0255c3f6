//! Named physical parameters handed to decay models at construction.

use crate::error::{Result, SignalPdfError};
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Named `f64` values. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: Arc<RwLock<BTreeMap<String, f64>>>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let values = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Read a flat TOML table of numeric parameters.
    ///
    /// Keys containing `::` must be quoted, e.g. `"Test::tau" = 1.5`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = text.parse()?;
        let mut values = BTreeMap::new();
        for (key, value) in table {
            let number = match value {
                toml::Value::Float(f) => f,
                toml::Value::Integer(i) => i as f64,
                other => {
                    return Err(SignalPdfError::Config(format!(
                        "parameter '{key}' must be numeric, got {}",
                        other.type_str()
                    )));
                }
            };
            values.insert(key, number);
        }
        Ok(Self {
            values: Arc::new(RwLock::new(values)),
        })
    }

    pub fn set(&self, name: impl Into<String>, value: f64) {
        self.values.write().insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .read()
            .get(name)
            .copied()
            .ok_or_else(|| SignalPdfError::UnknownParameter(name.to_string()))
    }

    /// Value of `name`, or `fallback` when it is not set.
    pub fn get_or(&self, name: &str, fallback: f64) -> f64 {
        self.values.read().get(name).copied().unwrap_or(fallback)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.values.read().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Parameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Ok(Self {
            values: Arc::new(RwLock::new(values)),
        })
    }
}
