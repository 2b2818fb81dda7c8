//! Prelude module for convenient imports.
//!
//! Provides a single `use strainer_validator::prelude::*;` import that
//! brings in the traits, filters and validator types most callers need.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use strainer_validator::prelude::*;
//!
//! let mut price = Filter::from(FloatFilter::new().range(0.0, 1e6).unwrap());
//! assert_eq!(price.process(&json!("19.99")), json!(19.99));
//! ```

// ============================================================================
// FOUNDATION: Core traits, messages, errors
// ============================================================================

pub use crate::foundation::{
    Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind, Messages,
};

// ============================================================================
// FILTERS: Built-in kinds and their options
// ============================================================================

pub use crate::filters::{
    BoolFilter, BoolOptions, DateFilter, DateFormat, DateOptions, EmailFilter, EmailOptions,
    EnumFilter, EnumOptions, FloatFilter, FloatOptions, IntFilter, IntOptions, IpFilter,
    IpOptions, RegexpFilter, RegexpOptions, StringFilter, StringOptions, UrlFilter, UrlOptions,
};

pub use crate::filter::{Filter, FilterConfig, FilterType};

// ============================================================================
// VALIDATOR: Field registry, policy and config
// ============================================================================

pub use crate::config::{FieldConfig, ValidatorConfig};
pub use crate::error::{ErrorClass, FieldRejection, OnFailure, Rejection, ValidatorError};
pub use crate::validator::Validator;
