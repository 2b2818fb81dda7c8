//! Enumerated-value filter

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::loose_eq;
use crate::foundation::{Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind};

/// Options for [`EnumFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumOptions {
    /// Accepted values; scalars and arrays may be mixed.
    pub enums: Vec<Value>,
}

/// Accepts a value loosely equal to one of a fixed set.
///
/// Matching uses [`loose_eq`], so `"1"` matches `1` and any truthy value
/// matches `true`. The input is returned unchanged.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::EnumFilter;
/// use strainer_validator::foundation::Coerce;
///
/// let filter = EnumFilter::new([json!("red"), json!("green"), json!(3)]);
/// assert_eq!(filter.coerce(&json!("green")), Ok(json!("green")));
/// assert_eq!(filter.coerce(&json!("3")), Ok(json!("3")));
/// assert!(filter.coerce(&json!("blue")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumFilter {
    options: EnumOptions,
}

impl EnumFilter {
    /// Creates a filter accepting the given values.
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            options: EnumOptions {
                enums: values.into_iter().collect(),
            },
        }
    }

    /// Creates a filter from options.
    pub fn from_options(options: EnumOptions) -> Result<Self, FilterError> {
        Ok(Self { options })
    }

    /// Accepted values.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.options.enums
    }
}

impl Coerce for EnumFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        let enums = &self.options.enums;
        if enums.iter().any(|candidate| loose_eq(input, candidate)) {
            return Ok(input.clone());
        }
        Err(Message::new(
            MessageKind::Domain,
            "not_in_enum",
            "Value is not one of the accepted values",
        )
        .with_param("count", self.options.enums.len().to_string())
        .into())
    }
}

impl Configurable for EnumFilter {
    type Options = EnumOptions;

    fn options(&self) -> &EnumOptions {
        &self.options
    }

    fn apply_options(&mut self, options: EnumOptions) -> Result<(), FilterError> {
        self.options = options;
        Ok(())
    }
}
