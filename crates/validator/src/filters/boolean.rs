//! Boolean filter

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::type_name;
use crate::foundation::{Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind};

/// Options for [`BoolFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolOptions {
    /// Accept only native booleans.
    pub strict: bool,
}

/// Coerces input to a boolean.
///
/// Besides `true`/`false`, the lenient mode accepts the integers `1`/`0`
/// and the tokens `"1"`, `"true"`, `"on"`, `"yes"` / `"0"`, `"false"`,
/// `"off"`, `"no"`, `""` (case-insensitive, surrounding whitespace ignored).
///
/// Failure is reported as `null`, never `false`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::BoolFilter;
/// use strainer_validator::foundation::Coerce;
///
/// let lenient = BoolFilter::new();
/// assert_eq!(lenient.coerce(&json!("on")), Ok(json!(true)));
/// assert_eq!(lenient.coerce(&json!(0)), Ok(json!(false)));
/// assert!(lenient.coerce(&json!("maybe")).is_err());
///
/// let strict = BoolFilter::new().strict(true);
/// assert!(strict.coerce(&json!(1)).is_err());
/// assert_eq!(lenient.sentinel(), json!(null));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoolFilter {
    options: BoolOptions,
}

impl BoolFilter {
    /// Creates a lenient boolean filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter from options.
    pub fn from_options(options: BoolOptions) -> Result<Self, FilterError> {
        Ok(Self { options })
    }

    /// Sets strict typing.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Sets strict typing in place.
    pub fn set_strict(&mut self, strict: bool) {
        self.options.strict = strict;
    }
}

const TRUTHY: [&str; 4] = ["1", "true", "on", "yes"];
const FALSY: [&str; 5] = ["0", "false", "off", "no", ""];

fn parse_token(token: &str) -> Option<bool> {
    let token = token.trim_matches(|c: char| c.is_ascii_whitespace());

    if TRUTHY.iter().any(|t| token.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSY.iter().any(|t| token.eq_ignore_ascii_case(t)) {
        Some(false)
    } else {
        None
    }
}

fn parse_loose(input: &Value) -> Option<bool> {
    match input {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) if !n.is_f64() => Some(true),
            Some(0) if !n.is_f64() => Some(false),
            _ => None,
        },
        Value::String(s) => parse_token(s),
        _ => None,
    }
}

impl Coerce for BoolFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        if let Value::Bool(b) = input {
            return Ok(Value::Bool(*b));
        }

        if self.options.strict {
            return Err(Message::strict_type("boolean", type_name(input)).into());
        }

        parse_loose(input).map(Value::Bool).ok_or_else(|| {
            Message::new(
                MessageKind::Type,
                "invalid_boolean",
                format!("Value of type {} is not a boolean", type_name(input)),
            )
            .with_param("actual", type_name(input))
            .into()
        })
    }

    fn sentinel(&self) -> Value {
        Value::Null
    }
}

impl Configurable for BoolFilter {
    type Options = BoolOptions;

    fn options(&self) -> &BoolOptions {
        &self.options
    }

    fn apply_options(&mut self, options: BoolOptions) -> Result<(), FilterError> {
        self.options = options;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
