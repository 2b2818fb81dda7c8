//! Configuration errors
//!
//! Filters never fail while processing a value; these errors come only from
//! constructors and option setters, and signal a programming mistake in how
//! a filter was configured.

/// A filter could not be configured as requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FilterError {
    /// The `regexp` option is not a valid regular expression.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An option value has the wrong shape for its name.
    #[error("invalid value for option `{name}`: {reason}")]
    InvalidOption {
        /// Option name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A lower bound is greater than its upper bound.
    #[error("invalid range: {min_name} ({min}) is greater than {max_name} ({max})")]
    InvalidRange {
        /// Name of the lower-bound option.
        min_name: &'static str,
        /// Name of the upper-bound option.
        max_name: &'static str,
        /// Lower bound, rendered.
        min: String,
        /// Upper bound, rendered.
        max: String,
    },
}

impl FilterError {
    /// Creates an [`FilterError::InvalidOption`].
    pub fn invalid_option(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidOption {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an [`FilterError::InvalidRange`].
    pub fn invalid_range(
        min_name: &'static str,
        max_name: &'static str,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::InvalidRange {
            min_name,
            max_name,
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FilterError::invalid_range("min_length", "max_length", 10, 5);
        assert_eq!(
            err.to_string(),
            "invalid range: min_length (10) is greater than max_length (5)"
        );

        let err = FilterError::invalid_option("strict", "expected a boolean");
        assert!(err.to_string().contains("`strict`"));
    }
}
