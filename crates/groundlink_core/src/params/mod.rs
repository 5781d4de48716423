//! Vehicle parameter cache.
//!
//! # Responsibility
//! - Hold the last known value of every parameter fetched from the vehicle.
//! - Persist snapshots of the cache through [`store::ParamStore`].
//!
//! # Invariants
//! - Parameter names are stored uppercase; lookups are case-insensitive.
//! - Iteration order is sorted by name.

use std::collections::BTreeMap;

pub mod store;

pub use store::{ParamSnapshot, ParamStore};

/// Name to value map of vehicle parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamCache {
    values: BTreeMap<String, f64>,
}

impl ParamCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(normalize_param_name(name).as_str()).copied()
    }

    /// Returns the cached value or `default` when the name is absent.
    pub fn get_or(&self, name: &str, default: Option<f64>) -> Option<f64> {
        self.get(name).or(default)
    }

    /// Stores a value and returns the previous one.
    pub fn insert(&mut self, name: &str, value: f64) -> Option<f64> {
        self.values.insert(normalize_param_name(name), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(normalize_param_name(name).as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(normalize_param_name(name).as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl FromIterator<(String, f64)> for ParamCache {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        let mut cache = Self::new();
        for (name, value) in iter {
            cache.insert(&name, value);
        }
        cache
    }
}

/// Uppercases and trims a parameter name.
pub fn normalize_param_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
