//! The [`Filter`] calling convention
//!
//! A [`Filter`] pairs one [`FilterType`] with the messages of its most
//! recent [`process`](Filter::process) call. `process` returns the coerced
//! value or the kind's failure sentinel; [`check`](Filter::check) is the
//! pure form returning a `Result`.

use serde_json::{Map, Value};

use crate::filters::{
    BoolFilter, BoolOptions, DateFilter, DateOptions, EmailFilter, EmailOptions, EnumFilter,
    EnumOptions, FloatFilter, FloatOptions, IntFilter, IntOptions, IpFilter, IpOptions,
    RegexpFilter, RegexpOptions, StringFilter, StringOptions, UrlFilter, UrlOptions,
};
use crate::foundation::{Coerce, CoerceResult, FilterError, Messages};

crate::filter_set! {
    /// Booleans and boolean tokens. Fails with `null`.
    Bool(BoolFilter, BoolOptions) => "bool",
    /// Integers and integer strings.
    Int(IntFilter, IntOptions) => "int",
    /// Floats, integers and decimal strings.
    Float(FloatFilter, FloatOptions) => "float",
    /// Strings and numbers, with length bounds.
    String(StringFilter, StringOptions) => "string",
    /// String rules plus a required pattern.
    Regexp(RegexpFilter, RegexpOptions) => "regexp",
    /// Date, datetime or time strings.
    Date(DateFilter, DateOptions) => "date",
    /// Email addresses.
    Email(EmailFilter, EmailOptions) => "email",
    /// Absolute URLs.
    Url(UrlFilter, UrlOptions) => "url",
    /// IPv4 and IPv6 literals.
    Ip(IpFilter, IpOptions) => "ip",
    /// Members of a fixed set.
    Enum(EnumFilter, EnumOptions) => "enum",
}

// ============================================================================
// FILTER
// ============================================================================

/// A filter together with the messages of its last call.
///
/// After every [`process`](Self::process) call, [`messages`](Self::messages)
/// is non-empty exactly when the returned value is the failure sentinel.
/// Messages never carry over from one call to the next.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filter::Filter;
/// use strainer_validator::filters::{BoolFilter, IntFilter};
///
/// let mut age = Filter::from(IntFilter::new().range(0, 130).unwrap());
/// assert_eq!(age.process(&json!("42")), json!(42));
/// assert!(age.messages().is_empty());
///
/// assert_eq!(age.process(&json!("forty")), json!(false));
/// assert_eq!(age.messages().len(), 1);
///
/// let mut flag = Filter::from(BoolFilter::new());
/// assert_eq!(flag.process(&json!("maybe")), json!(null));
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    kind: FilterType,
    messages: Messages,
}

impl Filter {
    /// Wraps a filter kind.
    #[must_use]
    pub fn new(kind: FilterType) -> Self {
        Self {
            kind,
            messages: Messages::new(),
        }
    }

    /// Builds a filter from its declarative form.
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        config.build().map(Self::new)
    }

    /// The wrapped filter kind.
    #[must_use]
    pub fn kind(&self) -> &FilterType {
        &self.kind
    }

    /// Stable lowercase name of the kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Coerces `input`, recording the messages of this call.
    ///
    /// Returns the coerced value, or [`sentinel`](Self::sentinel) when any
    /// rule was violated.
    pub fn process(&mut self, input: &Value) -> Value {
        self.messages.clear();
        match self.kind.coerce(input) {
            Ok(value) => {
                tracing::trace!(filter = self.name(), "value accepted");
                value
            }
            Err(messages) => {
                tracing::trace!(
                    filter = self.name(),
                    messages = messages.len(),
                    "value rejected"
                );
                self.messages = messages;
                self.kind.sentinel()
            }
        }
    }

    /// Coerces `input` without touching the recorded messages.
    pub fn check(&self, input: &Value) -> CoerceResult {
        self.kind.coerce(input)
    }

    /// Messages of the most recent [`process`](Self::process) call.
    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Forgets the recorded messages.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// The value `process` returns on failure: `null` for booleans, `false`
    /// for every other kind.
    #[must_use]
    pub fn sentinel(&self) -> Value {
        self.kind.sentinel()
    }

    // ========================================================================
    // OPTIONS
    // ========================================================================

    /// Options as an ordered name → value map.
    #[must_use]
    pub fn options(&self) -> Map<String, Value> {
        self.kind.options_map()
    }

    /// Reads one option by name; `None` if this kind has no such option.
    #[must_use]
    pub fn get_option(&self, name: &str) -> Option<Value> {
        self.kind.get_option(name)
    }

    /// Sets one option by name. Names this kind does not recognize are
    /// ignored.
    pub fn set_option(&mut self, name: &str, value: Value) -> Result<(), FilterError> {
        self.kind.set_option(name, value)
    }

    /// Sets `min_length`, if this kind has it.
    pub fn set_min_length(&mut self, min: usize) -> Result<(), FilterError> {
        self.set_option("min_length", Value::from(min))
    }

    /// Sets `max_length`, if this kind has it.
    pub fn set_max_length(&mut self, max: usize) -> Result<(), FilterError> {
        self.set_option("max_length", Value::from(max))
    }

    /// Sets `strict`, if this kind has it.
    pub fn set_strict(&mut self, strict: bool) -> Result<(), FilterError> {
        self.set_option("strict", Value::Bool(strict))
    }

    /// Declarative form of this filter.
    #[must_use]
    pub fn config(&self) -> FilterConfig {
        self.kind.to_config()
    }
}

impl From<FilterType> for Filter {
    fn from(kind: FilterType) -> Self {
        Self::new(kind)
    }
}

impl TryFrom<FilterConfig> for Filter {
    type Error = FilterError;

    fn try_from(config: FilterConfig) -> Result<Self, FilterError> {
        Self::from_config(&config)
    }
}

// ============================================================================
// TESTS
// ============================================================================
