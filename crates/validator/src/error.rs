//! Validator errors and the failure policy

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::{FilterError, Messages};

// ============================================================================
// FAILURE POLICY
// ============================================================================

/// Family of error a caller wants a rejected value reported as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Input failed validation.
    #[default]
    Validation,
    /// The caller passed an argument it should not have.
    InvalidArgument,
    /// The value lies outside the accepted domain.
    Domain,
    /// A failure only detectable at run time.
    Runtime,
}

impl ErrorClass {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Validation => "validation",
            ErrorClass::InvalidArgument => "invalid_argument",
            ErrorClass::Domain => "domain",
            ErrorClass::Runtime => "runtime",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a [`Validator`](crate::validator::Validator) does when a value is
/// rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFailure {
    /// Return `false` in place of the value.
    #[default]
    ReturnFalse,
    /// Return [`ValidatorError::Rejected`] of the given class.
    Raise(ErrorClass),
}

// ============================================================================
// REJECTIONS
// ============================================================================

/// One rejected field and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRejection {
    /// Field name.
    pub field: String,
    /// Messages of the failed call, in order.
    pub messages: Messages,
}

impl fmt::Display for FieldRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.messages)
    }
}

/// Every field rejected by one validation call, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Rejected fields.
    pub fields: Vec<FieldRejection>,
}

impl Rejection {
    /// Messages recorded for `field`, if it was rejected.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&Messages> {
        self.fields
            .iter()
            .find(|r| r.field == field)
            .map(|r| &r.messages)
    }

    /// Names of the rejected fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|r| r.field.as_str())
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

// ============================================================================
// VALIDATOR ERROR
// ============================================================================

/// Errors returned by [`Validator`](crate::validator::Validator).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidatorError {
    /// A field name was empty or blank.
    #[error("invalid field name {name:?}: {reason}")]
    InvalidFieldName {
        /// The name as given.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// No filter is registered under this name.
    #[error("no filter registered for field `{0}`")]
    UnknownField(String),

    /// A value was rejected under [`OnFailure::Raise`].
    #[error("{class} error: {rejection}")]
    Rejected {
        /// Requested error family.
        class: ErrorClass,
        /// What was rejected.
        rejection: Rejection,
    },

    /// A field's filter could not be built from config.
    #[error("invalid filter for field `{field}`: {source}")]
    Config {
        /// Field name.
        field: String,
        /// Underlying error.
        #[source]
        source: FilterError,
    },
}

impl ValidatorError {
    /// The rejection, if this error reports rejected values.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ValidatorError::Rejected { rejection, .. } => Some(rejection),
            _ => None,
        }
    }

    /// The requested error family, if this error reports rejected values.
    #[must_use]
    pub fn class(&self) -> Option<ErrorClass> {
        match self {
            ValidatorError::Rejected { class, .. } => Some(*class),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
