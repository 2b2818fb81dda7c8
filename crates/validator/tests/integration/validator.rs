//! Record validation through the public API.

use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use strainer_validator::prelude::*;

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn signup() -> Validator {
    let username = RegexpFilter::new("/^[a-z0-9_]+$/i")
        .unwrap()
        .length(3, 20)
        .unwrap();
    let mut validator = Validator::new();
    validator
        .set_filter("username", username, false)
        .unwrap()
        .set_filter("email", EmailFilter::new(), false)
        .unwrap()
        .set_filter("age", IntFilter::new().range(13, 130).unwrap(), true)
        .unwrap()
        .set_filter("newsletter", BoolFilter::new(), true)
        .unwrap();
    validator
}

#[test]
fn all_or_nothing() {
    let mut validator = Validator::new();
    validator
        .set_filter("a", StringFilter::new(), false)
        .unwrap()
        .set_filter("b", IntFilter::new(), false)
        .unwrap();

    let value = validator.validate("a", &json!("ok string")).unwrap();
    assert_eq!(value, json!("ok string"));

    let record = object(json!({"a": "ok string", "b": "not an int"}));
    assert_eq!(validator.validate_all(&record).unwrap(), json!(false));
}

#[test]
fn accepted_record_is_coerced() {
    let mut validator = signup();
    let clean = validator
        .validate_all(&object(json!({
            "username": "Lupo_83",
            "email": "lupo@example.com",
            "age": "34",
            "newsletter": "yes",
            "referrer": "friend",
        })))
        .unwrap();

    assert_eq!(
        clean,
        json!({
            "username": "Lupo_83",
            "email": "lupo@example.com",
            "age": 34,
            "newsletter": true,
            "referrer": "friend",
        })
    );
}

#[test]
fn nullable_fields_may_be_missing() {
    let mut validator = signup();
    let record = object(json!({"username": "lupo", "email": "lupo@example.com"}));
    let clean = validator.validate_all(&record).unwrap();
    assert_eq!(clean["age"], Value::Null);
    assert_eq!(clean["newsletter"], Value::Null);
}

#[test]
fn per_field_messages_after_rejection() {
    let mut validator = signup();
    let result = validator
        .validate_all(&object(json!({
            "username": "x!",
            "email": "lupo@example.com",
            "age": 200,
        })))
        .unwrap();
    assert_eq!(result, json!(false));

    let username = validator.messages("username").unwrap();
    assert_eq!(username.len(), 2);
    assert!(username.has_code("min_length"));
    assert!(username.has_code("pattern_mismatch"));

    assert!(validator.messages("email").unwrap().is_empty());
    assert!(validator.messages("age").unwrap().has_code("max_range"));
}

#[test]
fn raise_policy_reports_every_failed_field() {
    let mut validator = signup().with_on_failure(OnFailure::Raise(ErrorClass::Validation));
    let record = object(json!({"username": "", "email": "nope", "age": "x"}));
    let err = validator.validate_all(&record).unwrap_err();

    let rejection = err.rejection().unwrap();
    assert_eq!(
        rejection.field_names().collect::<Vec<_>>(),
        ["username", "email", "age"]
    );
    let age = rejection.messages("age").unwrap();
    assert!(age.has_code("invalid_integer"));
}

#[test]
fn raise_policy_display() {
    let colours = EnumFilter::new([json!("red"), json!("blue")]);
    let mut validator = Validator::new().with_on_failure(OnFailure::Raise(ErrorClass::Domain));
    validator.set_filter("colour", colours, false).unwrap();

    let err = validator.validate("colour", &json!("green")).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"domain error: colour: not_in_enum (domain): Value is not one of the accepted values"
    );
}

#[test]
fn registering_through_filter_type() {
    let mut validator = Validator::new();
    let kind = FilterType::from(UrlFilter::new().query_required(true));
    validator
        .set_filter("callback", Filter::from(kind), false)
        .unwrap();

    let name = validator.get_filter("callback").map(Filter::name);
    assert_eq!(name, Some("url"));
    let value = validator
        .validate("callback", &json!("https://example.com/cb"))
        .unwrap();
    assert_eq!(value, json!(false));
}

#[test]
fn filters_can_be_tuned_after_registration() {
    let mut validator = Validator::new();
    validator
        .set_filter("bio", StringFilter::new(), false)
        .unwrap();
    validator
        .get_filter_mut("bio")
        .unwrap()
        .set_max_length(5)
        .unwrap();

    let value = validator.validate("bio", &json!("too long")).unwrap();
    assert_eq!(value, json!(false));
}
