//! Validating a sign-up form with strainer-validator
//!
//! Run with `RUST_LOG=debug` to see field registration and rejections.

use serde_json::json;
use strainer_validator::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Built in code
    let mut signup = Validator::new();
    signup
        .set_filter(
            "username",
            RegexpFilter::new("/^[a-z0-9_]+$/i")?.length(3, 20)?,
            false,
        )?
        .set_filter("email", EmailFilter::new(), false)?
        .set_filter("age", IntFilter::new().range(13, 130)?, true)?
        .set_filter("newsletter", BoolFilter::new(), true)?
        .set_filter(
            "plan",
            EnumFilter::new([json!("free"), json!("pro"), json!("team")]),
            false,
        )?;

    let good = json!({
        "username": "lupo_83",
        "email": "lupo@example.com",
        "age": "34",
        "newsletter": "on",
        "plan": "pro",
    });
    let clean = signup.validate_all(good.as_object().ok_or("not an object")?)?;
    println!("accepted: {clean}");

    let bad = json!({
        "username": "x",
        "email": "not-an-email",
        "age": 7,
        "plan": "enterprise",
    });
    let result = signup.validate_all(bad.as_object().ok_or("not an object")?)?;
    println!("rejected: {result}");
    for (field, _) in signup.filters() {
        if let Some(messages) = signup.messages(field).filter(|m| !m.is_empty()) {
            println!("  {field}: {messages}");
        }
    }

    // Same form from JSON, raising instead of returning false
    let config = ValidatorConfig::from_json(
        r#"{
            "fields": {
                "username": {
                    "filter": { "type": "regexp", "regexp": "/^[a-z0-9_]+$/i", "min_length": 3 }
                },
                "email": { "filter": { "type": "email" } },
                "homepage": {
                    "filter": { "type": "url", "path_required": false },
                    "allows_null": true
                }
            },
            "on_failure": { "raise": "validation" }
        }"#,
    )?;
    let mut strict_signup = Validator::from_config(&config)?;
    match strict_signup.validate("email", &json!("nobody@")) {
        Ok(value) => println!("unexpectedly accepted {value}"),
        Err(err) => println!("error: {err}"),
    }

    Ok(())
}
