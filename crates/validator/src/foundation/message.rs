//! Failure messages produced by filters
//!
//! Every rule a filter checks reports its own [`Message`]; a single call can
//! therefore yield several of them, collected in call order by [`Messages`].
//!
//! All string fields use `Cow<'static, str>` so the common case of a static
//! code and text never allocates.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

// ============================================================================
// MESSAGE KIND
// ============================================================================

/// The family of rule a message reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// The input is the wrong primitive kind (e.g. an array where a string
    /// was expected, or a string under strict typing).
    Type,
    /// A string is too short or too long.
    Length,
    /// A number lies outside its configured bounds.
    Range,
    /// The value is well-typed but not acceptable: not in the enumerated
    /// set, not matching a pattern, or not in the required format.
    Domain,
}

impl MessageKind {
    /// Stable lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageKind::Type => "type",
            MessageKind::Length => "length",
            MessageKind::Range => "range",
            MessageKind::Domain => "domain",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MESSAGE
// ============================================================================

type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

/// One violated rule.
///
/// # Examples
///
/// ```
/// use strainer_validator::foundation::{Message, MessageKind};
///
/// let msg = Message::max_length(10, 18);
/// assert_eq!(msg.kind, MessageKind::Length);
/// assert_eq!(msg.param("max"), Some("10"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Machine-readable code, e.g. `"max_length"`, `"type_mismatch"`.
    pub code: Cow<'static, str>,

    /// Human-readable text in English.
    pub text: Cow<'static, str>,

    /// Rule family.
    pub kind: MessageKind,

    /// Ordered template parameters (typically 0-3).
    pub params: Params,
}

impl Message {
    /// Creates a message with a kind, code and text.
    pub fn new(
        kind: MessageKind,
        code: impl Into<Cow<'static, str>>,
        text: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
            kind,
            params: SmallVec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl Message {
    /// The input has the wrong primitive kind.
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();
        Self::new(
            MessageKind::Type,
            "type_mismatch",
            format!("Expected a value of type {expected}, got {actual}"),
        )
        .with_param("expected", expected)
        .with_param("actual", actual)
    }

    /// Strict typing rejected a value that would otherwise be coerced.
    pub fn strict_type(
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();
        Self::new(
            MessageKind::Type,
            "strict_type",
            format!("Strict mode requires a native {expected}, got {actual}"),
        )
        .with_param("expected", expected)
        .with_param("actual", actual)
    }

    /// A string shorter than its minimum length.
    pub fn min_length(min: usize, actual: usize) -> Self {
        Self::new(
            MessageKind::Length,
            "min_length",
            format!("Must be at least {min} characters long, got {actual}"),
        )
        .with_param("min", min.to_string())
        .with_param("actual", actual.to_string())
    }

    /// A string longer than its maximum length.
    pub fn max_length(max: usize, actual: usize) -> Self {
        Self::new(
            MessageKind::Length,
            "max_length",
            format!("Must be at most {max} characters long, got {actual}"),
        )
        .with_param("max", max.to_string())
        .with_param("actual", actual.to_string())
    }

    /// A number below its lower bound.
    pub fn below_range<T: fmt::Display>(min: T, actual: T) -> Self {
        Self::new(
            MessageKind::Range,
            "min_range",
            format!("Must be greater than or equal to {min}, got {actual}"),
        )
        .with_param("min", min.to_string())
        .with_param("actual", actual.to_string())
    }

    /// A number above its upper bound.
    pub fn above_range<T: fmt::Display>(max: T, actual: T) -> Self {
        Self::new(
            MessageKind::Range,
            "max_range",
            format!("Must be less than or equal to {max}, got {actual}"),
        )
        .with_param("max", max.to_string())
        .with_param("actual", actual.to_string())
    }

    /// A well-typed value in the wrong format.
    pub fn invalid_format(expected: impl Into<Cow<'static, str>>) -> Self {
        let expected = expected.into();
        Self::new(
            MessageKind::Domain,
            "invalid_format",
            format!("Value is not a valid {expected}"),
        )
        .with_param("expected", expected)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.kind, self.text)
    }
}

// ============================================================================
// MESSAGE LIST
// ============================================================================

/// Ordered messages of one `process` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Messages {
    messages: Vec<Message>,
}

impl Messages {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Appends a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if there are no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All messages in call order.
    #[must_use]
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates the messages in call order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// First message, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Message> {
        self.messages.first()
    }

    /// Counts messages of one kind.
    #[must_use]
    pub fn count_of(&self, kind: MessageKind) -> usize {
        self.messages.iter().filter(|m| m.kind == kind).count()
    }

    /// Returns true if any message has the given code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.messages.iter().any(|m| m.code == code)
    }

    /// Converts to a `Result`: `Ok(value)` when empty, `Err(self)` otherwise.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, Messages> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl From<Message> for Messages {
    fn from(message: Message) -> Self {
        Self {
            messages: vec![message],
        }
    }
}

impl FromIterator<Message> for Messages {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Messages {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Messages {}

// ============================================================================
// TESTS
// ============================================================================
