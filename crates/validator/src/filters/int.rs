//! Integer filter

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::type_name;
use crate::foundation::{
    Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind, Messages,
};

/// Options for [`IntFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntOptions {
    /// Inclusive lower bound.
    pub min_range: Option<i64>,
    /// Inclusive upper bound.
    pub max_range: Option<i64>,
    /// Accept `0x`-prefixed hexadecimal strings.
    pub allow_hex: bool,
    /// Accept leading-zero octal strings.
    pub allow_octal: bool,
    /// Accept only native integers.
    pub strict: bool,
}

impl IntOptions {
    fn check(&self) -> Result<(), FilterError> {
        match (self.min_range, self.max_range) {
            (Some(min), Some(max)) if min > max => Err(FilterError::invalid_range(
                "min_range",
                "max_range",
                min,
                max,
            )),
            _ => Ok(()),
        }
    }
}

/// Coerces input to an integer.
///
/// Accepts native integers and integer strings. Floats, booleans and
/// anything that is not a plain integer literal are rejected.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::IntFilter;
/// use strainer_validator::foundation::Coerce;
///
/// let filter = IntFilter::new().range(-5, 10).unwrap();
/// assert!(filter.coerce(&json!("12")).is_err()); // above range
/// assert_eq!(filter.coerce(&json!("-5")), Ok(json!(-5)));
///
/// let hex = IntFilter::new().allow_hex(true);
/// assert_eq!(hex.coerce(&json!("0x1A")), Ok(json!(26)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntFilter {
    options: IntOptions,
}

impl IntFilter {
    /// Creates an unbounded, lenient integer filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter from options.
    pub fn from_options(options: IntOptions) -> Result<Self, FilterError> {
        options.check()?;
        Ok(Self { options })
    }

    /// Sets both inclusive bounds.
    pub fn range(mut self, min: i64, max: i64) -> Result<Self, FilterError> {
        self.options.min_range = Some(min);
        self.options.max_range = Some(max);
        self.options.check()?;
        Ok(self)
    }

    /// Accepts hexadecimal literals.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_hex(mut self, allow: bool) -> Self {
        self.options.allow_hex = allow;
        self
    }

    /// Accepts octal literals.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_octal(mut self, allow: bool) -> Self {
        self.options.allow_octal = allow;
        self
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

    fn parse(&self, text: &str) -> Option<i64> {
        let text = text.trim_matches(|c: char| c.is_ascii_whitespace());

        if self.options.allow_hex {
            if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return None;
                }
                return i64::from_str_radix(digits, 16).ok();
            }
        }

        if self.options.allow_octal && text.len() > 1 && text.starts_with('0') {
            let digits = &text[1..];
            if !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
                return None;
            }
            return i64::from_str_radix(digits, 8).ok();
        }

        parse_decimal(text)
    }
}

/// `[+-]?(0|[1-9][0-9]*)`
fn parse_decimal(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

impl Coerce for IntFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        let number = match input {
            Value::Number(n) if !n.is_f64() => match n.as_i64() {
                Some(i) => i,
                None => {
                    return Err(Message::new(
                        MessageKind::Range,
                        "integer_overflow",
                        "Value does not fit in a 64-bit signed integer",
                    )
                    .into());
                }
            },
            _ if self.options.strict => {
                return Err(Message::strict_type("integer", type_name(input)).into());
            }
            Value::String(s) => match self.parse(s) {
                Some(i) => i,
                None => {
                    return Err(Message::new(
                        MessageKind::Type,
                        "invalid_integer",
                        "String is not an integer literal",
                    )
                    .into());
                }
            },
            other => return Err(Message::type_mismatch("integer", type_name(other)).into()),
        };

        let mut messages = Messages::new();
        if let Some(min) = self.options.min_range {
            if number < min {
                messages.push(Message::below_range(min, number));
            }
        }
        if let Some(max) = self.options.max_range {
            if number > max {
                messages.push(Message::above_range(max, number));
            }
        }
        messages.into_result(Value::from(number))
    }
}

impl Configurable for IntFilter {
    type Options = IntOptions;

    fn options(&self) -> &IntOptions {
        &self.options
    }

    fn apply_options(&mut self, options: IntOptions) -> Result<(), FilterError> {
        options.check()?;
        self.options = options;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
