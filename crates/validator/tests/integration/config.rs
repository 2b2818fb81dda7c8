//! Validators described in JSON.

use pretty_assertions::assert_eq;
use serde_json::json;
use strainer_validator::prelude::*;

const SIGNUP: &str = r#"{
    "fields": {
        "username": { "filter": {
            "type": "regexp", "regexp": "/^[a-z0-9_]+$/i", "min_length": 3, "max_length": 20
        } },
        "email":    { "filter": { "type": "email" } },
        "price":    { "filter": { "type": "float", "decimal_separator": ",", "min_range": 0.0 } },
        "born":     { "filter": { "type": "date" }, "allows_null": true },
        "server":   { "filter": { "type": "ip", "ipv4": true, "no_priv_range": true } },
        "tier":     { "filter": { "type": "enum", "enums": ["free", "pro"] } }
    },
    "on_failure": { "raise": "invalid_argument" }
}"#;

#[test]
fn builds_every_field_in_order() {
    let config = ValidatorConfig::from_json(SIGNUP).unwrap();
    let validator = Validator::from_config(&config).unwrap();

    let kinds: Vec<_> = validator
        .filters()
        .map(|(name, filter)| (name, filter.name()))
        .collect();
    assert_eq!(
        kinds,
        [
            ("username", "regexp"),
            ("email", "email"),
            ("price", "float"),
            ("born", "date"),
            ("server", "ip"),
            ("tier", "enum"),
        ]
    );
    assert!(validator.allows_null("born"));
    assert_eq!(
        validator.on_failure(),
        OnFailure::Raise(ErrorClass::InvalidArgument)
    );
}

#[test]
fn configured_validator_validates() {
    let config = ValidatorConfig::from_json(SIGNUP).unwrap();
    let mut validator = Validator::from_config(&config).unwrap();

    let clean = validator
        .validate_all(
            json!({
                "username": "lupo",
                "email": "lupo@example.com",
                "price": "9,50",
                "server": "8.8.4.4",
                "tier": "pro",
            })
            .as_object()
            .unwrap(),
        )
        .unwrap();
    assert_eq!(clean["price"], json!(9.5));
    assert_eq!(clean["born"], json!(null));

    let err = validator
        .validate("server", &json!("10.0.0.1"))
        .unwrap_err();
    assert_eq!(err.class(), Some(ErrorClass::InvalidArgument));
}

#[test]
fn invalid_filter_options_name_the_field() {
    let config = ValidatorConfig::from_json(
        r#"{ "fields": { "nick": { "filter": {
            "type": "string", "min_length": 9, "max_length": 3
        } } } }"#,
    )
    .unwrap();

    match Validator::from_config(&config) {
        Err(ValidatorError::Config { field, source }) => {
            assert_eq!(field, "nick");
            assert!(matches!(source, FilterError::InvalidRange { .. }));
        }
        other => panic!("expected a config error, got {other:?}"),
    }
}

#[test]
fn invalid_pattern_is_a_config_error() {
    let config = ValidatorConfig::from_json(
        r#"{ "fields": { "code": { "filter": { "type": "regexp", "regexp": "([a-z]" } } } }"#,
    )
    .unwrap();
    assert!(matches!(
        Validator::from_config(&config),
        Err(ValidatorError::Config {
            source: FilterError::InvalidPattern { .. },
            ..
        })
    ));
}

#[test]
fn filter_config_serializes_flat() {
    let filter = Filter::from(IntFilter::new().range(1, 5).unwrap().allow_hex(true));
    assert_eq!(
        serde_json::to_value(filter.config()).unwrap(),
        json!({
            "type": "int",
            "min_range": 1,
            "max_range": 5,
            "allow_hex": true,
            "allow_octal": false,
            "strict": false,
        })
    );
}
