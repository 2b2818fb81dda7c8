//! Core traits for the filter system
//!
//! Every filter kind implements two traits:
//!
//! - [`Coerce`]: the pure rule, input value in, coerced value or messages out;
//! - [`Configurable`]: typed options with a name-based view on top of them.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::foundation::{FilterError, Messages};

// ============================================================================
// COERCE
// ============================================================================

/// A coercion rule for one semantic type.
///
/// `coerce` is a pure function of the filter's options and the input: it
/// never mutates the filter, so calling it twice with the same input yields
/// the same result.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use strainer_validator::foundation::{Coerce, Message, MessageKind, Messages};
///
/// struct NonEmpty;
///
/// impl Coerce for NonEmpty {
///     fn coerce(&self, input: &Value) -> Result<Value, Messages> {
///         match input.as_str() {
///             Some(s) if !s.is_empty() => Ok(input.clone()),
///             _ => Err(Message::new(MessageKind::Domain, "empty", "Must not be empty").into()),
///         }
///     }
/// }
///
/// assert_eq!(NonEmpty.coerce(&json!("x")), Ok(json!("x")));
/// assert!(NonEmpty.coerce(&json!("")).is_err());
/// ```
pub trait Coerce {
    /// Coerces `input` to the target type.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` with the coerced value
    /// * `Err(messages)` with one message per violated rule, never empty
    fn coerce(&self, input: &Value) -> Result<Value, Messages>;

    /// The value reported in place of a coerced value when coercion fails.
    ///
    /// Boolean filters override this with `null` so that a rejected input
    /// can be told apart from a genuine `false`.
    fn sentinel(&self) -> Value {
        Value::Bool(false)
    }
}

// ============================================================================
// CONFIGURABLE
// ============================================================================

/// Typed filter options with a name-based view.
///
/// The option struct is the source of truth; [`options_map`] and
/// [`set_option`] go through its serde representation, so option names are
/// exactly the struct's field names. Setting an unknown name is ignored.
///
/// [`options_map`]: Configurable::options_map
/// [`set_option`]: Configurable::set_option
pub trait Configurable {
    /// The option struct.
    type Options: Serialize + DeserializeOwned + Clone;

    /// Current options.
    fn options(&self) -> &Self::Options;

    /// Replaces all options at once, validating them first.
    fn apply_options(&mut self, options: Self::Options) -> Result<(), FilterError>;

    /// Options as an ordered name → value map.
    fn options_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self.options()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Reads one option by name.
    fn get_option(&self, name: &str) -> Option<Value> {
        self.options_map().remove(name)
    }

    /// Sets one option by name.
    ///
    /// Unknown names are ignored. A value of the wrong shape, or one that
    /// makes the options inconsistent, is rejected and leaves the options
    /// untouched.
    fn set_option(&mut self, name: &str, value: Value) -> Result<(), FilterError> {
        let mut map = self.options_map();
        let Some(slot) = map.get_mut(name) else {
            tracing::trace!(option = name, "ignoring unrecognized filter option");
            return Ok(());
        };
        *slot = value;

        let options = serde_json::from_value(Value::Object(map))
            .map_err(|e| FilterError::invalid_option(name, e))?;
        self.apply_options(options)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Message, MessageKind};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct LimitOptions {
        limit: u32,
        strict: bool,
    }

    struct Limit(LimitOptions);

    impl Coerce for Limit {
        fn coerce(&self, input: &Value) -> Result<Value, Messages> {
            match input.as_u64() {
                Some(n) if n <= u64::from(self.0.limit) => Ok(input.clone()),
                _ => Err(Message::new(MessageKind::Range, "limit", "too big").into()),
            }
        }
    }

    impl Configurable for Limit {
        type Options = LimitOptions;

        fn options(&self) -> &LimitOptions {
            &self.0
        }

        fn apply_options(&mut self, options: LimitOptions) -> Result<(), FilterError> {
            self.0 = options;
            Ok(())
        }
    }

    #[test]
    fn test_default_sentinel_is_false() {
        assert_eq!(Limit(LimitOptions::default()).sentinel(), json!(false));
    }

    #[test]
    fn test_options_map_in_declaration_order() {
        let filter = Limit(LimitOptions {
            limit: 3,
            strict: true,
        });
        let keys: Vec<_> = filter.options_map().keys().cloned().collect();
        assert_eq!(keys, ["limit", "strict"]);
        assert_eq!(filter.get_option("limit"), Some(json!(3)));
        assert_eq!(filter.get_option("missing"), None);
    }

    #[test]
    fn test_set_option() {
        let mut filter = Limit(LimitOptions::default());
        filter.set_option("limit", json!(7)).unwrap();
        assert_eq!(filter.0.limit, 7);
        assert!(filter.coerce(&json!(7)).is_ok());
        assert!(filter.coerce(&json!(8)).is_err());
    }

    #[test]
    fn test_set_unknown_option_is_ignored() {
        let mut filter = Limit(LimitOptions::default());
        assert!(filter.set_option("bogus", json!("x")).is_ok());
        assert_eq!(filter.0.limit, 0);
    }

    #[test]
    fn test_set_option_wrong_shape() {
        let mut filter = Limit(LimitOptions::default());
        let err = filter.set_option("limit", json!("many")).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidOption { ref name, .. } if name == "limit"
        ));
        assert_eq!(filter.0.limit, 0);
    }
}
