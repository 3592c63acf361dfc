//! Shared validation layer: one schema builder parameterized by
//! configuration, used by both edit controllers.

pub mod user_schema;

pub use user_schema::UserSchema;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::record::Field;

/// Tunable validation thresholds, loaded from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub name_min_len: usize,
    pub name_max_len: usize,
    pub min_age: u32,
    /// One table variant has no birth-date column
    pub require_birth_date: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            name_min_len: 2,
            name_max_len: 50,
            min_age: 18,
            require_birth_date: true,
        }
    }
}

/// Field-keyed validation messages. Returned and stored, never thrown;
/// an empty mapping means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}
