//! # strainer-validator
//!
//! Data coercion filters and a field validator for form-style input.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use strainer_validator::prelude::*;
//!
//! let mut form = Validator::new();
//! form.set_filter("username", RegexpFilter::new("/^[a-z0-9_]+$/i").unwrap(), false)
//!     .unwrap()
//!     .set_filter("email", EmailFilter::new(), false)
//!     .unwrap()
//!     .set_filter("newsletter", BoolFilter::new(), true)
//!     .unwrap();
//!
//! let input = json!({ "username": "lupo", "email": "lupo@example.com", "newsletter": "yes" });
//! let clean = form.validate_all(input.as_object().unwrap()).unwrap();
//! assert_eq!(clean["newsletter"], json!(true));
//! ```
//!
//! ## Filters
//!
//! A filter coerces one value to one semantic type. Calling
//! [`Filter::process`](filter::Filter::process) returns the coerced value,
//! or a failure sentinel (`null` for booleans, `false` otherwise) with one
//! [`Message`](foundation::Message) per violated rule.
//!
//! - **Scalars**: [`BoolFilter`](filters::BoolFilter),
//!   [`IntFilter`](filters::IntFilter), [`FloatFilter`](filters::FloatFilter)
//! - **Text**: [`StringFilter`](filters::StringFilter),
//!   [`RegexpFilter`](filters::RegexpFilter)
//! - **Formats**: [`DateFilter`](filters::DateFilter),
//!   [`EmailFilter`](filters::EmailFilter), [`UrlFilter`](filters::UrlFilter),
//!   [`IpFilter`](filters::IpFilter)
//! - **Sets**: [`EnumFilter`](filters::EnumFilter)
//!
//! ## Validators
//!
//! A [`Validator`](validator::Validator) binds field names to filters and
//! validates single values or whole records, returning `false` or an error
//! on rejection according to its [`OnFailure`](error::OnFailure) policy.
//! Validators can also be described in JSON through
//! [`ValidatorConfig`](config::ValidatorConfig).

pub mod config;
pub mod error;
pub mod filter;
pub mod filters;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod validator;
