//! Email address filter

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::type_name;
use crate::foundation::{Coerce, CoerceResult, Configurable, FilterError, Message};

static LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    let atom = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";
    Regex::new(&format!(r"^{atom}(?:\.{atom})*$")).unwrap()
});

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    let label = "[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";
    Regex::new(&format!(r"^{label}(?:\.{label})+$")).unwrap()
});

const MAX_LOCAL_LENGTH: usize = 64;
const MAX_ADDRESS_LENGTH: usize = 254;

/// Options for [`EmailFilter`]. The filter has none; the type exists so
/// every filter kind is configured the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailOptions {}

/// Validates an email address.
///
/// The local part is a dot-separated run of atom characters (no quoted
/// strings, no leading, trailing or doubled dots), at most 64 characters.
/// The domain is a dotted name of at least two labels. The whole address is
/// at most 254 characters.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::EmailFilter;
/// use strainer_validator::foundation::Coerce;
///
/// let filter = EmailFilter::new();
/// assert!(filter.coerce(&json!("lupo@example.com")).is_ok());
/// assert!(filter.coerce(&json!("lupo.example.com")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailFilter {
    options: EmailOptions,
}

impl EmailFilter {
    /// Creates an email filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter from options.
    pub fn from_options(options: EmailOptions) -> Result<Self, FilterError> {
        Ok(Self { options })
    }
}

fn is_email(address: &str) -> bool {
    if address.len() > MAX_ADDRESS_LENGTH {
        return false;
    }
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    local.len() <= MAX_LOCAL_LENGTH && LOCAL_PART.is_match(local) && DOMAIN.is_match(domain)
}

impl Coerce for EmailFilter {
    fn coerce(&self, input: &Value) -> CoerceResult {
        match input {
            Value::String(address) if is_email(address) => Ok(input.clone()),
            Value::String(_) => Err(Message::invalid_format("email address").into()),
            other => Err(Message::type_mismatch("string", type_name(other)).into()),
        }
    }
}

impl Configurable for EmailFilter {
    type Options = EmailOptions;

    fn options(&self) -> &EmailOptions {
        &self.options
    }

    fn apply_options(&mut self, options: EmailOptions) -> Result<(), FilterError> {
        self.options = options;
        Ok(())
    }
}
