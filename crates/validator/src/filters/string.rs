//! String filter and the length rules shared with [`RegexpFilter`]
//!
//! [`RegexpFilter`]: super::RegexpFilter

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::{number_to_string, type_name};
use crate::foundation::{Coerce, CoerceResult, Configurable, FilterError, Message, Messages};

/// Options for [`StringFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringOptions {
    /// Minimum length in characters.
    pub min_length: usize,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    /// Shorten over-long input to `max_length` instead of rejecting it.
    pub truncate: bool,
    /// Accept only native strings.
    pub strict: bool,
}

impl StringOptions {
    pub(crate) fn check(&self) -> Result<(), FilterError> {
        match self.max_length {
            Some(max) if self.min_length > max => Err(FilterError::invalid_range(
                "min_length",
                "max_length",
                self.min_length,
                max,
            )),
            _ => Ok(()),
        }
    }

    /// Stringifies `input` and applies the type and length rules.
    ///
    /// Violations are pushed onto `messages`. Returns `None` only when the
    /// input cannot be read as text at all; in that case no length rule was
    /// evaluated.
    pub(crate) fn read_text(&self, input: &Value, messages: &mut Messages) -> Option<String> {
        let mut text = match input {
            Value::String(s) => s.clone(),
            Value::Number(n) => {
                if self.strict {
                    messages.push(Message::strict_type("string", type_name(input)));
                }
                number_to_string(n)
            }
            other => {
                messages.push(Message::type_mismatch("string", type_name(other)));
                return None;
            }
        };

        let length = text.chars().count();
        if length < self.min_length {
            messages.push(Message::min_length(self.min_length, length));
        }
        if let Some(max) = self.max_length {
            if length > max {
                if self.truncate {
                    text = text.chars().take(max).collect();
                } else {
                    messages.push(Message::max_length(max, length));
                }
            }
        }
        Some(text)
    }
}

/// Coerces input to a string.
///
/// Strings and numbers are accepted; booleans, null, arrays and objects are
/// not.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::StringFilter;
/// use strainer_validator::foundation::{Coerce, MessageKind};
///
/// let filter = StringFilter::new().length(0, 10).unwrap();
/// let messages = filter.coerce(&json!("eighteen chars....")).unwrap_err();
/// assert_eq!(messages.count_of(MessageKind::Length), 1);
///
/// let filter = filter.truncate(true);
/// assert_eq!(filter.coerce(&json!("eighteen chars....")), Ok(json!("eighteen c")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringFilter {
    options: StringOptions,
}

impl StringFilter {
    /// Creates a string filter with no length bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter from options.
    pub fn from_options(options: StringOptions) -> Result<Self, FilterError> {
        options.check()?;
        Ok(Self { options })
    }

    /// Sets both length bounds.
    pub fn length(mut self, min: usize, max: usize) -> Result<Self, FilterError> {
        self.options.min_length = min;
        self.options.max_length = Some(max);
        self.options.check()?;
        Ok(self)
    }

    /// Sets the minimum length.
    pub fn min_length(mut self, min: usize) -> Result<Self, FilterError> {
        self.set_min_length(min)?;
        Ok(self)
    }

    /// Sets the maximum length.
    pub fn max_length(mut self, max: usize) -> Result<Self, FilterError> {
        self.set_max_length(max)?;
        Ok(self)
    }

    /// Truncates over-long input.
    #[must_use = "builder methods must be chained or built"]
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.options.truncate = truncate;
        self
    }

    /// Sets strict typing.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Sets the minimum length in place.
    pub fn set_min_length(&mut self, min: usize) -> Result<(), FilterError> {
        let mut options = self.options.clone();
        options.min_length = min;
        self.apply_options(options)
    }

    /// Sets the maximum length in place.
    pub fn set_max_length(&mut self, max: usize) -> Result<(), FilterError> {
        let mut options = self.options.clone();
        options.max_length = Some(max);
        self.apply_options(options)
    }

    /// Sets strict typing in place.
    pub fn set_strict(&mut self, strict: bool) {
        self.options.strict = strict;
    }
}

impl Coerce for StringFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        let mut messages = Messages::new();
        match self.options.read_text(input, &mut messages) {
            Some(text) => messages.into_result(Value::String(text)),
            None => Err(messages),
        }
    }
}

impl Configurable for StringFilter {
    type Options = StringOptions;

    fn options(&self) -> &StringOptions {
        &self.options
    }

    fn apply_options(&mut self, options: StringOptions) -> Result<(), FilterError> {
        options.check()?;
        self.options = options;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
