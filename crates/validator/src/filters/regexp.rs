//! Pattern filter

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::string::StringOptions;
use crate::foundation::{
    Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind, Messages,
};

/// Options for [`RegexpFilter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexpOptions {
    /// Pattern the string must match, bare (`^[a-z]+$`) or delimited with
    /// trailing flags (`/^[a-z]+$/i`).
    pub regexp: String,
    /// Type and length rules, as for [`StringFilter`](super::StringFilter).
    #[serde(flatten)]
    pub string: StringOptions,
}

impl RegexpOptions {
    /// Options matching `pattern` with default string rules.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            regexp: pattern.into(),
            string: StringOptions::default(),
        }
    }
}

const DELIMITERS: &[char] = &['/', '#', '~', '!', '@', '%', '`', ';'];

/// Trailing flags: `u` is accepted and ignored, the rest map to inline flags.
const FLAGS: &[char] = &['i', 'm', 's', 'x', 'U', 'u'];

/// Splits `/body/flags` into its body and flags.
///
/// Returns `None` when the text after the closing delimiter is not a flag
/// set, so `/usr/bin` reads as a bare pattern.
fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let delimiter = pattern.chars().next().filter(|c| DELIMITERS.contains(c))?;
    let rest = &pattern[delimiter.len_utf8()..];
    let end = rest.rfind(delimiter)?;
    let flags = &rest[end + delimiter.len_utf8()..];
    flags
        .chars()
        .all(|c| FLAGS.contains(&c))
        .then(|| (&rest[..end], flags))
}

fn compile(pattern: &str) -> Result<Regex, FilterError> {
    let invalid = |reason: String| FilterError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason,
    };

    if pattern.is_empty() {
        return Err(invalid("pattern is empty".to_owned()));
    }

    let (body, flags) = split_delimited(pattern).unwrap_or((pattern, ""));
    let inline: String = flags.chars().filter(|&flag| flag != 'u').collect();
    let source = if inline.is_empty() {
        body.to_owned()
    } else {
        format!("(?{inline}){body}")
    };
    Regex::new(&source).map_err(|e| invalid(e.to_string()))
}

/// Coerces input to a string that matches a pattern.
///
/// Applies every [`StringFilter`](super::StringFilter) rule first, then
/// matches the (possibly truncated) text. The match is unanchored unless
/// the pattern anchors itself.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::RegexpFilter;
/// use strainer_validator::foundation::Coerce;
///
/// let username = RegexpFilter::new("/^[a-z0-9_]+$/i").unwrap();
/// assert_eq!(username.coerce(&json!("Lupo_83")), Ok(json!("Lupo_83")));
/// assert!(username.coerce(&json!("no spaces")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RegexpFilter {
    options: RegexpOptions,
    regex: Regex,
}

impl RegexpFilter {
    /// Creates a filter for `pattern`.
    pub fn new(pattern: impl Into<String>) -> Result<Self, FilterError> {
        Self::from_options(RegexpOptions::new(pattern))
    }

    /// Creates a filter from options.
    pub fn from_options(options: RegexpOptions) -> Result<Self, FilterError> {
        options.string.check()?;
        let regex = compile(&options.regexp)?;
        Ok(Self { options, regex })
    }

    /// The compiled pattern.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Sets both length bounds.
    pub fn length(mut self, min: usize, max: usize) -> Result<Self, FilterError> {
        let mut string = self.options.string.clone();
        string.min_length = min;
        string.max_length = Some(max);
        string.check()?;
        self.options.string = string;
        Ok(self)
    }

    /// Truncates over-long input before matching.
    #[must_use = "builder methods must be chained or built"]
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.options.string.truncate = truncate;
        self
    }

    /// Sets strict typing.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.string.strict = strict;
        self
    }

    /// Sets the minimum length in place.
    pub fn set_min_length(&mut self, min: usize) -> Result<(), FilterError> {
        let mut string = self.options.string.clone();
        string.min_length = min;
        string.check()?;
        self.options.string = string;
        Ok(())
    }

    /// Sets the maximum length in place.
    pub fn set_max_length(&mut self, max: usize) -> Result<(), FilterError> {
        let mut string = self.options.string.clone();
        string.max_length = Some(max);
        string.check()?;
        self.options.string = string;
        Ok(())
    }

    /// Sets strict typing in place.
    pub fn set_strict(&mut self, strict: bool) {
        self.options.string.strict = strict;
    }
}

impl Coerce for RegexpFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        let mut messages = Messages::new();
        let Some(text) = self.options.string.read_text(input, &mut messages) else {
            return Err(messages);
        };

        if !self.regex.is_match(&text) {
            messages.push(
                Message::new(
                    MessageKind::Domain,
                    "pattern_mismatch",
                    "Value does not match the required pattern",
                )
                .with_param("pattern", self.options.regexp.clone()),
            );
        }
        messages.into_result(Value::String(text))
    }
}

impl Configurable for RegexpFilter {
    type Options = RegexpOptions;

    fn options(&self) -> &RegexpOptions {
        &self.options
    }

    fn apply_options(&mut self, options: RegexpOptions) -> Result<(), FilterError> {
        options.string.check()?;
        if options.regexp != self.options.regexp {
            self.regex = compile(&options.regexp)?;
        }
        self.options = options;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
