//! Core filter types and traits
//!
//! This module contains the building blocks shared by every filter kind:
//!
//! - **Traits**: [`Coerce`] (the pure rule) and [`Configurable`] (typed
//!   options with a name-based view)
//! - **Messages**: [`Message`], [`MessageKind`], [`Messages`]
//! - **Errors**: [`FilterError`] for configuration mistakes
//! - **Values**: loose conversions over [`serde_json::Value`] in [`value`]
//!
//! # Architecture
//!
//! ## 1. Pure rules
//!
//! A rule never mutates itself while checking a value:
//!
//! ```rust,ignore
//! impl Coerce for IntFilter {
//!     fn coerce(&self, input: &Value) -> Result<Value, Messages> {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## 2. One message per violated rule
//!
//! A failed call reports every rule it broke, in the order they were
//! checked:
//!
//! ```rust,ignore
//! let messages = StringFilter::new().strict(true).min_length(5)?
//!     .coerce(&json!(12))
//!     .unwrap_err();
//! assert_eq!(messages.len(), 2); // strict type + too short
//! ```
//!
//! ## 3. Typed options
//!
//! Options are plain serde structs. The name-based accessors
//! (`get_option`, `set_option`, `options_map`) are derived from them, so
//! there is no separate option registry to keep in sync.

pub mod error;
pub mod message;
pub mod traits;
pub mod value;

pub use error::FilterError;
pub use message::{Message, MessageKind, Messages};
pub use traits::{Coerce, Configurable};

/// A coercion result: the coerced value, or every violated rule.
pub type CoerceResult = Result<serde_json::Value, Messages>;
