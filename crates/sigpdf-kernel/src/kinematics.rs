//! Kinematic ranges and the live kinematics bag.
//!
//! A [`KinematicRange`] is declarative metadata attached to one positional
//! argument of a differential function. [`Kinematics`] is the runtime store
//! the densities read from; it is a shared handle, so a caller that keeps a
//! clone can vary values between evaluations.

use crate::error::{Result, SignalPdfError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A named interval `[min, max]` with a human-readable description.
///
/// `min <= max` is expected but not checked. The range documents the domain;
/// the model decides what happens outside of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicRange {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub description: String,
}

impl KinematicRange {
    pub fn new(name: impl Into<String>, min: f64, max: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            description: description.into(),
        }
    }

    /// Whether `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl fmt::Display for KinematicRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in [{}, {}]", self.name, self.min, self.max)
    }
}

/// Named kinematic variables with their current values.
///
/// Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct Kinematics {
    values: Arc<RwLock<BTreeMap<String, f64>>>,
}

impl Kinematics {
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

    /// Declare a variable, or overwrite its value if it already exists.
    pub fn declare(&self, name: impl Into<String>, value: f64) {
        self.values.write().insert(name.into(), value);
    }

    /// Set the value of a variable.
    pub fn set(&self, name: impl Into<String>, value: f64) {
        self.declare(name, value);
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .read()
            .get(name)
            .copied()
            .ok_or_else(|| SignalPdfError::UnknownKinematicVariable(name.to_string()))
    }

    /// Remove a variable, returning its last value.
    pub fn remove(&self, name: &str) -> Option<f64> {
        self.values.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.read().contains_key(name)
    }

    /// Variable names in key order.
    pub fn names(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    /// Copy of all current values.
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.values.read().clone()
    }

    /// Fetch `names` in order, failing on the first absent one.
    ///
    /// Holds the read lock once for the whole batch, so the values form one
    /// consistent reading.
    pub fn values_of<'a, I>(&self, names: I) -> Result<Vec<f64>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values = self.values.read();
        names
            .into_iter()
            .map(|name| {
                values
                    .get(name)
                    .copied()
                    .ok_or_else(|| SignalPdfError::UnknownKinematicVariable(name.to_string()))
            })
            .collect()
    }

    /// Whether two handles share the same storage.
    pub fn same_store(&self, other: &Kinematics) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}
