//! Date, datetime and time filter

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::type_name;
use crate::foundation::{Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind};

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

static DATETIME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    let (date, time) = ("[0-9]{4}-[0-9]{2}-[0-9]{2}", "[0-9]{2}:[0-9]{2}:[0-9]{2}");
    Regex::new(&format!("^{date} {time}$")).unwrap()
});

static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap());

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Accepted layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[default]
    Date,
    /// `YYYY-MM-DD HH:MM:SS`
    Datetime,
    /// `HH:MM:SS`
    Time,
}

impl DateFormat {
    /// The layout as shown in messages.
    #[must_use]
    pub const fn layout(self) -> &'static str {
        match self {
            DateFormat::Date => "YYYY-MM-DD",
            DateFormat::Datetime => "YYYY-MM-DD HH:MM:SS",
            DateFormat::Time => "HH:MM:SS",
        }
    }

    fn shape(self) -> &'static Regex {
        match self {
            DateFormat::Date => &DATE_SHAPE,
            DateFormat::Datetime => &DATETIME_SHAPE,
            DateFormat::Time => &TIME_SHAPE,
        }
    }

    /// Parses `text` and renders it back in canonical form.
    fn canonicalize(self, text: &str) -> Option<String> {
        // %S accepts a leap second; wall-clock input never has one.
        let leap_free = |seconds: &str| seconds < "60";
        match self {
            DateFormat::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .map(|d| d.format(DATE_FORMAT).to_string()),
            DateFormat::Datetime => NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .ok()
                .filter(|_| leap_free(&text[text.len() - 2..]))
                .map(|d| d.format(DATETIME_FORMAT).to_string()),
            DateFormat::Time => NaiveTime::parse_from_str(text, TIME_FORMAT)
                .ok()
                .filter(|_| leap_free(&text[text.len() - 2..]))
                .map(|t| t.format(TIME_FORMAT).to_string()),
        }
    }
}

/// Options for [`DateFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOptions {
    /// Accepted layout.
    pub format: DateFormat,
}

/// Validates a date, datetime or time string.
///
/// Both the layout and calendar validity are checked, so `2009-02-30` is
/// rejected even though it has the right shape.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::{DateFilter, DateFormat};
/// use strainer_validator::foundation::Coerce;
///
/// let filter = DateFilter::new();
/// assert_eq!(filter.coerce(&json!("2009-02-28")), Ok(json!("2009-02-28")));
/// assert!(filter.coerce(&json!("2009-02-30")).is_err());
///
/// let time = DateFilter::with_format(DateFormat::Time);
/// assert!(time.coerce(&json!("23:59:59")).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateFilter {
    options: DateOptions,
}

impl DateFilter {
    /// Creates a filter for `YYYY-MM-DD` dates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter for the given layout.
    #[must_use]
    pub fn with_format(format: DateFormat) -> Self {
        Self {
            options: DateOptions { format },
        }
    }

    /// Creates a filter from options.
    pub fn from_options(options: DateOptions) -> Result<Self, FilterError> {
        Ok(Self { options })
    }

    /// Accepted layout.
    #[must_use]
    pub fn format(&self) -> DateFormat {
        self.options.format
    }
}

impl Coerce for DateFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        let Value::String(text) = input else {
            return Err(Message::type_mismatch("string", type_name(input)).into());
        };

        let format = self.options.format;
        if !format.shape().is_match(text) {
            return Err(Message::invalid_format(format.layout()).into());
        }

        format.canonicalize(text).map(Value::String).ok_or_else(|| {
            Message::new(
                MessageKind::Domain,
                "invalid_date",
                format!("{text} is not a real calendar value"),
            )
            .with_param("format", format.layout())
            .into()
        })
    }
}

impl Configurable for DateFilter {
    type Options = DateOptions;

    fn options(&self) -> &DateOptions {
        &self.options
    }

    fn apply_options(&mut self, options: DateOptions) -> Result<(), FilterError> {
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
    fn test_date() {
        let filter = DateFilter::new();
        assert_eq!(filter.coerce(&json!("2024-02-29")), Ok(json!("2024-02-29")));
        let messages = filter.coerce(&json!("2023-02-29")).unwrap_err();
        assert!(messages.has_code("invalid_date"));
        assert!(filter.coerce(&json!("2009-13-01")).is_err());
        let messages = filter.coerce(&json!("2009-2-3")).unwrap_err();
        assert!(messages.has_code("invalid_format"));
        assert!(filter.coerce(&json!("2009-02-03 10:00:00")).is_err());
    }

    #[test]
    fn test_datetime() {
        let filter = DateFilter::with_format(DateFormat::Datetime);
        assert_eq!(
            filter.coerce(&json!("2009-02-03 10:11:12")),
            Ok(json!("2009-02-03 10:11:12"))
        );
        assert!(filter.coerce(&json!("2009-02-03")).is_err());
        assert!(filter.coerce(&json!("2009-02-03 24:00:00")).is_err());
        assert!(filter.coerce(&json!("2009-02-03T10:11:12")).is_err());
    }

    #[test]
    fn test_time() {
        let filter = DateFilter::with_format(DateFormat::Time);
        assert_eq!(filter.coerce(&json!("00:00:00")), Ok(json!("00:00:00")));
        assert!(filter.coerce(&json!("23:60:00")).is_err());
        assert!(filter.coerce(&json!("23:59:60")).is_err());
        assert!(filter.coerce(&json!("7:00:00")).is_err());
    }

    #[test]
    fn test_non_string_input() {
        let filter = DateFilter::new();
        let inputs = [json!(20_090_203), json!(true), json!(["2009-02-03"])];
        for input in inputs {
            let messages = filter.coerce(&input).unwrap_err();
            assert_eq!(messages.len(), 1);
            assert_eq!(messages.count_of(MessageKind::Type), 1);
        }
    }

    #[test]
    fn test_format_option_by_name() {
        let mut filter = DateFilter::new();
        filter.set_option("format", json!("time")).unwrap();
        assert_eq!(filter.format(), DateFormat::Time);
        assert!(filter.set_option("format", json!("week")).is_err());
        assert_eq!(filter.get_option("format"), Some(json!("time")));
    }
}
