//! Declarative validator configuration
//!
//! A form can be described entirely in JSON and turned into a
//! [`Validator`](crate::validator::Validator):
//!
//! ```json
//! {
//!   "fields": {
//!     "username": { "filter": { "type": "regexp", "regexp": "/^[a-z0-9_]+$/i", "max_length": 20 } },
//!     "age":      { "filter": { "type": "int", "min_range": 0 }, "allows_null": true }
//!   },
//!   "on_failure": { "raise": "validation" }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::OnFailure;

pub use crate::filter::FilterConfig;

/// One field of a [`ValidatorConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// The field's filter.
    pub filter: FilterConfig,
    /// Whether `null` bypasses the filter.
    #[serde(default)]
    pub allows_null: bool,
}

impl FieldConfig {
    /// A non-nullable field.
    #[must_use]
    pub fn new(filter: FilterConfig) -> Self {
        Self {
            filter,
            allows_null: false,
        }
    }

    /// Sets nullability.
    #[must_use = "builder methods must be chained or built"]
    pub fn allows_null(mut self, allows_null: bool) -> Self {
        self.allows_null = allows_null;
        self
    }
}

/// A whole validator: fields in registration order plus the failure
/// policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Fields keyed by name.
    #[serde(default)]
    pub fields: IndexMap<String, FieldConfig>,
    /// What to do with a rejected value.
    #[serde(default)]
    pub on_failure: OnFailure,
}

impl ValidatorConfig {
    /// Parses a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Renders the config as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
