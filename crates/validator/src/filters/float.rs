//! Floating-point filter

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::foundation::value::{format_float, type_name};
use crate::foundation::{
    Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind, Messages,
};

/// Options for [`FloatFilter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatOptions {
    /// Character separating the integer and fractional parts.
    pub decimal_separator: char,
    /// Accept digit grouping (`1,200.50`).
    pub allow_thousands_separator: bool,
    /// Inclusive lower bound.
    pub min_range: Option<f64>,
    /// Inclusive upper bound.
    pub max_range: Option<f64>,
    /// Accept only native floats.
    pub strict: bool,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            allow_thousands_separator: false,
            min_range: None,
            max_range: None,
            strict: false,
        }
    }
}

impl FloatOptions {
    fn check(&self) -> Result<(), FilterError> {
        let sep = self.decimal_separator;
        if sep.is_ascii_digit() || sep.is_whitespace() || matches!(sep, '+' | '-' | 'e' | 'E') {
            return Err(FilterError::invalid_option(
                "decimal_separator",
                format!("{sep:?} cannot separate decimals"),
            ));
        }
        match (self.min_range, self.max_range) {
            (Some(min), Some(max)) if min > max => Err(FilterError::invalid_range(
                "min_range",
                "max_range",
                format_float(min),
                format_float(max),
            )),
            _ => Ok(()),
        }
    }

    /// Grouping character, if grouping is allowed.
    fn thousands_separator(&self) -> Option<char> {
        if !self.allow_thousands_separator {
            None
        } else if self.decimal_separator == ',' {
            Some('.')
        } else {
            Some(',')
        }
    }
}

/// Coerces input to a float.
///
/// Accepts native floats, native integers and numeric strings written with
/// the configured decimal separator.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::{FloatFilter, FloatOptions};
/// use strainer_validator::foundation::Coerce;
///
/// assert_eq!(FloatFilter::new().coerce(&json!("2.75")), Ok(json!(2.75)));
///
/// let european = FloatFilter::from_options(FloatOptions {
///     decimal_separator: ',',
///     ..FloatOptions::default()
/// })
/// .unwrap();
/// assert_eq!(european.coerce(&json!("2,75")), Ok(json!(2.75)));
/// assert!(european.coerce(&json!("2.75")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FloatFilter {
    options: FloatOptions,
}

impl FloatFilter {
    /// Creates a lenient float filter using `.` as decimal separator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter from options.
    pub fn from_options(options: FloatOptions) -> Result<Self, FilterError> {
        options.check()?;
        Ok(Self { options })
    }

    /// Sets the decimal separator.
    pub fn decimal_separator(mut self, separator: char) -> Result<Self, FilterError> {
        self.options.decimal_separator = separator;
        self.options.check()?;
        Ok(self)
    }

    /// Accepts digit grouping.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_thousands_separator(mut self, allow: bool) -> Self {
        self.options.allow_thousands_separator = allow;
        self
    }

    /// Sets both inclusive bounds.
    pub fn range(mut self, min: f64, max: f64) -> Result<Self, FilterError> {
        self.options.min_range = Some(min);
        self.options.max_range = Some(max);
        self.options.check()?;
        Ok(self)
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

    fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
        let separator = self.options.decimal_separator;
        let grouping = self.options.thousands_separator();

        let mut normalized = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        if let Some(sign) = chars.next_if(|c| matches!(c, '+' | '-')) {
            normalized.push(sign);
        }

        let mut int_digits = 0;
        let mut group_len = 0;
        let mut grouped = false;
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() {
                normalized.push(c);
                int_digits += 1;
                group_len += 1;
            } else if Some(c) == grouping {
                let valid = if grouped {
                    group_len == 3
                } else {
                    (1..=3).contains(&group_len)
                };
                if !valid {
                    return None;
                }
                grouped = true;
                group_len = 0;
            } else {
                break;
            }
            chars.next();
        }
        if grouped && group_len != 3 {
            return None;
        }

        let mut frac_digits = 0;
        if chars.next_if_eq(&separator).is_some() {
            normalized.push('.');
            while let Some(c) = chars.next_if(char::is_ascii_digit) {
                normalized.push(c);
                frac_digits += 1;
            }
        }

        if int_digits == 0 && frac_digits == 0 {
            return None;
        }

        if chars.next_if(|c| matches!(c, 'e' | 'E')).is_some() {
            normalized.push('e');
            if let Some(sign) = chars.next_if(|c| matches!(c, '+' | '-')) {
                normalized.push(sign);
            }
            let mut exp_digits = 0;
            while let Some(c) = chars.next_if(char::is_ascii_digit) {
                normalized.push(c);
                exp_digits += 1;
            }
            if exp_digits == 0 {
                return None;
            }
        }

        if chars.next().is_some() {
            return None;
        }

        normalized.parse::<f64>().ok().filter(|f| f.is_finite())
    }
}

impl Coerce for FloatFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        let number = match input {
            Value::Number(n) if n.is_f64() => n.as_f64().unwrap_or(f64::NAN),
            _ if self.options.strict => {
                return Err(Message::strict_type("float", type_name(input)).into());
            }
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => match self.parse(s) {
                Some(f) => f,
                None => {
                    let separator = self.options.decimal_separator.to_string();
                    return Err(Message::new(
                        MessageKind::Type,
                        "invalid_float",
                        "String is not a decimal number",
                    )
                    .with_param("decimal_separator", separator)
                    .into());
                }
            },
            other => return Err(Message::type_mismatch("float", type_name(other)).into()),
        };

        let Some(coerced) = Number::from_f64(number) else {
            return Err(Message::new(
                MessageKind::Range,
                "non_finite",
                "Value is not a finite number",
            )
            .into());
        };

        let mut messages = Messages::new();
        if let Some(min) = self.options.min_range {
            if number < min {
                let actual = format_float(number);
                messages.push(Message::below_range(format_float(min), actual));
            }
        }
        if let Some(max) = self.options.max_range {
            if number > max {
                let actual = format_float(number);
                messages.push(Message::above_range(format_float(max), actual));
            }
        }
        messages.into_result(Value::Number(coerced))
    }
}

impl Configurable for FloatFilter {
    type Options = FloatOptions;

    fn options(&self) -> &FloatOptions {
        &self.options
    }

    fn apply_options(&mut self, options: FloatOptions) -> Result<(), FilterError> {
        options.check()?;
        self.options = options;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        let filter = FloatFilter::new();
        assert_eq!(filter.coerce(&json!(2.75)), Ok(json!(2.75)));
        assert_eq!(filter.coerce(&json!("2.75")), Ok(json!(2.75)));
        assert_eq!(filter.coerce(&json!(" -0.5 ")), Ok(json!(-0.5)));
        assert_eq!(filter.coerce(&json!(".5")), Ok(json!(0.5)));
        assert_eq!(filter.coerce(&json!("5.")), Ok(json!(5.0)));
        assert_eq!(filter.coerce(&json!("1e3")), Ok(json!(1000.0)));
    }

    #[test]
    fn test_integers_become_floats() {
        let filter = FloatFilter::new();
        let coerced = filter.coerce(&json!(4)).unwrap();
        assert!(coerced.is_f64());
        assert_eq!(coerced.as_f64(), Some(4.0));
        assert!(filter.coerce(&json!("4")).unwrap().is_f64());
    }

    #[test]
    fn test_rejects_non_numeric() {
        let filter = FloatFilter::new();
        for input in [
            json!("abc"),
            json!("1.2.3"),
            json!("1,200.50"),
            json!("1e"),
            json!(""),
            json!("."),
            json!(true),
            json!(null),
            json!([1.0]),
        ] {
            let messages = filter.coerce(&input).unwrap_err();
            assert_eq!(messages.len(), 1, "input {input}");
            assert_eq!(messages.count_of(MessageKind::Type), 1);
        }
    }

    #[test]
    fn test_custom_decimal_separator() {
        let filter = FloatFilter::new().decimal_separator(',').unwrap();
        assert_eq!(filter.coerce(&json!("2,75")), Ok(json!(2.75)));
        assert!(filter.coerce(&json!("2.75")).is_err());
    }

    #[test]
    fn test_invalid_decimal_separator() {
        assert!(FloatFilter::new().decimal_separator('7').is_err());
        assert!(FloatFilter::new().decimal_separator('e').is_err());
    }

    #[test]
    fn test_thousands_separator() {
        let filter = FloatFilter::new().allow_thousands_separator(true);
        assert_eq!(filter.coerce(&json!("1,200.50")), Ok(json!(1200.5)));
        assert_eq!(filter.coerce(&json!("12,345,678")), Ok(json!(12_345_678.0)));
        assert!(filter.coerce(&json!("1,20.5")).is_err());
        assert!(filter.coerce(&json!("1234,567")).is_err());
        assert!(filter.coerce(&json!(",123")).is_err());

        let european = FloatFilter::new()
            .decimal_separator(',')
            .unwrap()
            .allow_thousands_separator(true);
        assert_eq!(european.coerce(&json!("1.200,50")), Ok(json!(1200.5)));
    }

    #[test]
    fn test_strict() {
        let filter = FloatFilter::new().strict(true);
        assert_eq!(filter.coerce(&json!(1.5)), Ok(json!(1.5)));
        for input in [json!(1), json!("1.5")] {
            let messages = filter.coerce(&input).unwrap_err();
            assert!(messages.has_code("strict_type"), "{input}");
        }
    }

    #[test]
    fn test_range() {
        let filter = FloatFilter::new().range(0.0, 1.0).unwrap();
        assert!(filter.coerce(&json!(0.5)).is_ok());
        let messages = filter.coerce(&json!(1.5)).unwrap_err();
        assert_eq!(messages.count_of(MessageKind::Range), 1);
    }

    #[test]
    fn test_overflowing_string_is_rejected() {
        assert!(FloatFilter::new().coerce(&json!("1e400")).is_err());
    }
}
