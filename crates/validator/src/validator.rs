//! Field registry and record validation
//!
//! A [`Validator`] binds field names to [`Filter`]s. It validates one value
//! at a time with [`validate`](Validator::validate) or a whole record with
//! [`validate_all`](Validator::validate_all), and decides through its
//! [`OnFailure`] policy whether a rejection is returned as `false` or as an
//! error.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::{FieldConfig, ValidatorConfig};
use crate::error::{FieldRejection, OnFailure, Rejection, ValidatorError};
use crate::filter::Filter;
use crate::foundation::Messages;

#[derive(Debug, Clone)]
struct FieldEntry {
    filter: Filter,
    allows_null: bool,
}

impl FieldEntry {
    /// Runs the filter; `null` skips it when the field is nullable.
    fn run(&mut self, input: &Value) -> Result<Value, Messages> {
        if input.is_null() && self.allows_null {
            self.filter.clear_messages();
            return Ok(Value::Null);
        }

        let value = self.filter.process(input);
        if self.filter.messages().is_empty() {
            Ok(value)
        } else {
            Err(self.filter.messages().clone())
        }
    }
}

/// Named fields, each with a filter and a nullability flag.
///
/// Fields are kept in registration order; re-registering a name replaces
/// its filter in place.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::filters::{IntFilter, StringFilter};
/// use strainer_validator::validator::Validator;
///
/// let mut validator = Validator::new();
/// validator
///     .set_filter("name", StringFilter::new().length(1, 40).unwrap(), false)
///     .unwrap()
///     .set_filter("age", IntFilter::new().range(0, 130).unwrap(), true)
///     .unwrap();
///
/// assert_eq!(validator.validate("age", &json!("42")).unwrap(), json!(42));
/// assert_eq!(validator.validate("age", &json!(null)).unwrap(), json!(null));
/// assert_eq!(validator.validate("age", &json!(-1)).unwrap(), json!(false));
///
/// let record = json!({ "name": "Lupo", "age": "7" });
/// let clean = validator.validate_all(record.as_object().unwrap()).unwrap();
/// assert_eq!(clean, json!({ "name": "Lupo", "age": 7 }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    fields: IndexMap<String, FieldEntry>,
    on_failure: OnFailure,
}

impl Validator {
    /// Creates an empty validator that returns `false` on failure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_on_failure(mut self, on_failure: OnFailure) -> Self {
        self.on_failure = on_failure;
        self
    }

    /// Builds a validator from its declarative form.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ValidatorError> {
        let mut validator = Self::new().with_on_failure(config.on_failure);
        for (name, field) in &config.fields {
            let filter =
                Filter::from_config(&field.filter).map_err(|source| ValidatorError::Config {
                    field: name.clone(),
                    source,
                })?;
            validator.set_filter(name.as_str(), filter, field.allows_null)?;
        }
        Ok(validator)
    }

    /// Declarative form of this validator.
    #[must_use]
    pub fn to_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            fields: self
                .fields
                .iter()
                .map(|(name, entry)| {
                    let filter = entry.filter.config();
                    let field = FieldConfig::new(filter).allows_null(entry.allows_null);
                    (name.clone(), field)
                })
                .collect(),
            on_failure: self.on_failure,
        }
    }

    // ========================================================================
    // REGISTRY
    // ========================================================================

    /// Registers `filter` for `name`, replacing any previous filter.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidFieldName`] if `name` is empty or only
    /// whitespace.
    pub fn set_filter(
        &mut self,
        name: impl Into<String>,
        filter: impl Into<Filter>,
        allows_null: bool,
    ) -> Result<&mut Self, ValidatorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidatorError::InvalidFieldName {
                name,
                reason: "field name is empty",
            });
        }
        if name.trim().is_empty() {
            return Err(ValidatorError::InvalidFieldName {
                name,
                reason: "field name is blank",
            });
        }

        let filter = filter.into();
        tracing::debug!(
            field = %name,
            filter = filter.name(),
            allows_null,
            "registering field filter"
        );
        self.fields.insert(
            name,
            FieldEntry {
                filter,
                allows_null,
            },
        );
        Ok(self)
    }

    /// Removes a field, returning its filter.
    pub fn remove_filter(&mut self, name: &str) -> Option<Filter> {
        self.fields.shift_remove(name).map(|entry| entry.filter)
    }

    /// The filter registered for `name`.
    #[must_use]
    pub fn get_filter(&self, name: &str) -> Option<&Filter> {
        self.fields.get(name).map(|entry| &entry.filter)
    }

    /// Mutable access to the filter registered for `name`.
    pub fn get_filter_mut(&mut self, name: &str) -> Option<&mut Filter> {
        self.fields.get_mut(name).map(|entry| &mut entry.filter)
    }

    /// All fields and their filters, in registration order.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.fields
            .iter()
            .map(|(name, entry)| (name.as_str(), &entry.filter))
    }

    /// Whether `null` bypasses the filter of `name`. Unknown fields are not
    /// nullable.
    #[must_use]
    pub fn allows_null(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|entry| entry.allows_null)
    }

    /// Messages of the last validation of `name`.
    #[must_use]
    pub fn messages(&self, name: &str) -> Option<&Messages> {
        self.get_filter(name).map(Filter::messages)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Current failure policy.
    #[must_use]
    pub fn on_failure(&self) -> OnFailure {
        self.on_failure
    }

    /// Changes the failure policy.
    pub fn set_on_failure(&mut self, on_failure: OnFailure) {
        self.on_failure = on_failure;
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    /// Validates one value against the filter of `name`.
    ///
    /// Returns the coerced value, `null` for a `null` input on a nullable
    /// field, or `false` on rejection under [`OnFailure::ReturnFalse`].
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::UnknownField`] if `name` is not registered
    /// - [`ValidatorError::Rejected`] on rejection under [`OnFailure::Raise`]
    pub fn validate(&mut self, name: &str, value: &Value) -> Result<Value, ValidatorError> {
        let entry = self
            .fields
            .get_mut(name)
            .ok_or_else(|| ValidatorError::UnknownField(name.to_owned()))?;

        match entry.run(value) {
            Ok(coerced) => Ok(coerced),
            Err(messages) => {
                tracing::debug!(field = name, messages = messages.len(), "field rejected");
                self.reject(Rejection {
                    fields: vec![FieldRejection {
                        field: name.to_owned(),
                        messages,
                    }],
                })
            }
        }
    }

    /// Validates a whole record.
    ///
    /// Every registered field is checked, in registration order, with a
    /// missing entry read as `null`. If all pass, returns a copy of the
    /// record with each registered field replaced by its coerced value;
    /// entries with no registered filter are copied unchanged. If any fails,
    /// the whole record is rejected.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::Rejected`] listing every failed field, under
    /// [`OnFailure::Raise`].
    pub fn validate_all(&mut self, record: &Map<String, Value>) -> Result<Value, ValidatorError> {
        let mut output = record.clone();
        let mut rejection = Rejection::default();

        for (name, entry) in &mut self.fields {
            let input = record.get(name).unwrap_or(&Value::Null);
            match entry.run(input) {
                Ok(coerced) => {
                    output.insert(name.clone(), coerced);
                }
                Err(messages) => rejection.fields.push(FieldRejection {
                    field: name.clone(),
                    messages,
                }),
            }
        }

        if rejection.fields.is_empty() {
            return Ok(Value::Object(output));
        }

        tracing::debug!(
            rejected = rejection.fields.len(),
            fields = self.fields.len(),
            "record rejected"
        );
        self.reject(rejection)
    }

    fn reject(&self, rejection: Rejection) -> Result<Value, ValidatorError> {
        match self.on_failure {
            OnFailure::ReturnFalse => Ok(Value::Bool(false)),
            OnFailure::Raise(class) => Err(ValidatorError::Rejected { class, rejection }),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use crate::filters::{BoolFilter, EmailFilter, IntFilter, StringFilter};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn sample() -> Validator {
        let mut validator = Validator::new();
        validator
            .set_filter("a", StringFilter::new(), false)
            .unwrap()
            .set_filter("b", IntFilter::new(), false)
            .unwrap();
        validator
    }

    #[test]
    fn test_rejects_bad_field_names() {
        let mut validator = Validator::new();
        assert!(matches!(
            validator.set_filter("", IntFilter::new(), false),
            Err(ValidatorError::InvalidFieldName { .. })
        ));
        assert!(matches!(
            validator.set_filter("  ", IntFilter::new(), false),
            Err(ValidatorError::InvalidFieldName { .. })
        ));
        assert!(validator.is_empty());
    }

    #[test]
    fn test_registry_order_and_replacement() {
        let mut validator = sample();
        validator.set_filter("c", BoolFilter::new(), true).unwrap();
        validator
            .set_filter("a", EmailFilter::new(), false)
            .unwrap();

        let names: Vec<_> = validator.filters().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(validator.get_filter("a").map(Filter::name), Some("email"));
        assert!(validator.allows_null("c"));
        assert!(!validator.allows_null("a"));
        assert!(!validator.allows_null("missing"));

        assert!(validator.remove_filter("b").is_some());
        assert_eq!(validator.len(), 2);
        assert!(!validator.contains("b"));
    }

    #[test]
    fn test_validate_unknown_field() {
        let mut validator = sample();
        assert_eq!(
            validator.validate("zzz", &json!(1)),
            Err(ValidatorError::UnknownField("zzz".into()))
        );
    }

    #[test]
    fn test_validate_single_field() {
        let mut validator = sample();
        assert_eq!(validator.validate("b", &json!("12")).unwrap(), json!(12));
        assert_eq!(validator.validate("b", &json!("x")).unwrap(), json!(false));
        assert_eq!(validator.messages("b").map(Messages::len), Some(1));
    }

    #[test]
    fn test_null_bypass() {
        let mut validator = Validator::new();
        validator.set_filter("n", IntFilter::new(), true).unwrap();
        validator.set_filter("m", IntFilter::new(), false).unwrap();

        assert_eq!(validator.validate("n", &Value::Null).unwrap(), Value::Null);
        assert!(validator.messages("n").is_some_and(Messages::is_empty));
        assert_eq!(validator.validate("m", &Value::Null).unwrap(), json!(false));
    }

    #[test]
    fn test_validate_all_is_all_or_nothing() {
        let mut validator = sample();
        assert_eq!(
            validator.validate("a", &json!("ok string")).unwrap(),
            json!("ok string")
        );

        let result = validator
            .validate_all(&record(json!({"a": "ok string", "b": "not an int"})))
            .unwrap();
        assert_eq!(result, json!(false));
    }

    #[test]
    fn test_validate_all_coerces() {
        let mut validator = sample();
        let result = validator
            .validate_all(&record(json!({"a": 5, "b": "12", "extra": [1]})))
            .unwrap();
        assert_eq!(result, json!({"a": "5", "b": 12, "extra": [1]}));
    }

    #[test]
    fn test_validate_all_missing_fields_are_null() {
        let mut validator = sample();
        validator.set_filter("opt", IntFilter::new(), true).unwrap();

        let result = validator
            .validate_all(&record(json!({"a": "x", "b": 1})))
            .unwrap();
        assert_eq!(result, json!({"a": "x", "b": 1, "opt": null}));

        let result = validator.validate_all(&record(json!({"a": "x"}))).unwrap();
        assert_eq!(result, json!(false));
    }

    #[test]
    fn test_raise_policy() {
        let mut validator = sample().with_on_failure(OnFailure::Raise(ErrorClass::InvalidArgument));

        let err = validator.validate("b", &json!(1.5)).unwrap_err();
        assert_eq!(err.class(), Some(ErrorClass::InvalidArgument));

        let err = validator
            .validate_all(&record(json!({"a": [], "b": "x"})))
            .unwrap_err();
        let rejection = err.rejection().unwrap();
        assert_eq!(rejection.field_names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_config_round_trip() {
        let mut validator = sample().with_on_failure(OnFailure::Raise(ErrorClass::Domain));
        validator.set_filter("c", BoolFilter::new(), true).unwrap();

        let config = validator.to_config();
        let rebuilt = Validator::from_config(&config).unwrap();
        assert_eq!(rebuilt.to_config(), config);
        assert!(rebuilt.allows_null("c"));
        assert_eq!(rebuilt.on_failure(), OnFailure::Raise(ErrorClass::Domain));
    }
}
