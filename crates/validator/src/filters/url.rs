//! URL filter

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::foundation::value::type_name;
use crate::foundation::{
    Coerce, CoerceResult, Configurable, FilterError, Message, MessageKind, Messages,
};

/// Schemes accepted by [`UrlFilter`].
pub const SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "sftp", "ws", "wss", "file", "mailto", "news", "telnet",
    "ssh", "git",
];

/// Schemes written without an authority (`mailto:user@host`).
const OPAQUE_SCHEMES: &[&str] = &["mailto", "news"];

/// Options for [`UrlFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlOptions {
    /// Reject URLs whose path is empty or `/`.
    pub path_required: bool,
    /// Reject URLs without a non-empty query string.
    pub query_required: bool,
}

/// Validates an absolute URL with a recognized scheme.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::UrlFilter;
/// use strainer_validator::foundation::Coerce;
///
/// let filter = UrlFilter::new();
/// assert!(filter.coerce(&json!("https://example.com")).is_ok());
/// assert!(filter.coerce(&json!("example.com")).is_err());
///
/// let with_path = UrlFilter::new().path_required(true);
/// assert!(with_path.coerce(&json!("https://example.com/")).is_err());
/// assert!(with_path.coerce(&json!("https://example.com/docs")).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlFilter {
    options: UrlOptions,
}

impl UrlFilter {
    /// Creates a URL filter with no component requirements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter from options.
    pub fn from_options(options: UrlOptions) -> Result<Self, FilterError> {
        Ok(Self { options })
    }

    /// Requires a path.
    #[must_use = "builder methods must be chained or built"]
    pub fn path_required(mut self, required: bool) -> Self {
        self.options.path_required = required;
        self
    }

    /// Requires a query string.
    #[must_use = "builder methods must be chained or built"]
    pub fn query_required(mut self, required: bool) -> Self {
        self.options.query_required = required;
        self
    }
}

/// Parses `text` as an absolute URL of a recognized scheme.
fn parse_absolute(text: &str) -> Option<Url> {
    if text.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    let url = Url::parse(text).ok()?;
    let scheme = url.scheme();
    if !SCHEMES.contains(&scheme) {
        return None;
    }
    if OPAQUE_SCHEMES.contains(&scheme) {
        return (!url.path().is_empty()).then_some(url);
    }

    let has_authority = text[scheme.len()..].starts_with("://");
    let has_host = url.host_str().is_some_and(|h| !h.is_empty());
    (has_authority && (has_host || scheme == "file")).then_some(url)
}

impl Coerce for UrlFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        let Value::String(text) = input else {
            return Err(Message::type_mismatch("string", type_name(input)).into());
        };
        let Some(url) = parse_absolute(text) else {
            return Err(Message::invalid_format("URL").into());
        };

        let mut messages = Messages::new();
        if self.options.path_required && matches!(url.path(), "" | "/") {
            messages.push(Message::new(
                MessageKind::Domain,
                "path_required",
                "URL must contain a path",
            ));
        }
        if self.options.query_required && url.query().is_none_or(str::is_empty) {
            messages.push(Message::new(
                MessageKind::Domain,
                "query_required",
                "URL must contain a query string",
            ));
        }
        messages.into_result(input.clone())
    }
}

impl Configurable for UrlFilter {
    type Options = UrlOptions;

    fn options(&self) -> &UrlOptions {
        &self.options
    }

    fn apply_options(&mut self, options: UrlOptions) -> Result<(), FilterError> {
        self.options = options;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
