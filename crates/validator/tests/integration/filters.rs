//! The `process` calling convention across every filter kind.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use strainer_validator::prelude::*;

fn process(filter: impl Into<Filter>, input: Value) -> (Value, Messages) {
    let mut filter = filter.into();
    let value = filter.process(&input);
    (value, filter.messages().clone())
}

// ============================================================================
// BOOL
// ============================================================================

#[test]
fn bool_strictness() {
    let (value, messages) = process(BoolFilter::new(), json!(1));
    assert_eq!(value, json!(true));
    assert!(messages.is_empty());

    let (value, messages) = process(BoolFilter::new().strict(true), json!(1));
    assert_eq!(value, Value::Null);
    assert_eq!(messages.len(), 1);
}

#[test]
fn bool_strict_repeated_calls_each_report_one_message() {
    let mut filter = Filter::from(BoolFilter::new().strict(true));
    let inputs = [json!(1), json!("1"), json!("true"), json!("on"), json!(0)];
    for input in &inputs {
        assert_eq!(filter.process(input), Value::Null);
        assert_eq!(filter.messages().len(), 1, "input {input}");
    }
}

#[test]
fn bool_failure_is_null_not_false() {
    for input in [json!(2), json!(0.0), json!("nah"), json!([]), json!({})] {
        let (value, messages) = process(BoolFilter::new(), input);
        assert_eq!(value, Value::Null);
        assert_eq!(messages.count_of(MessageKind::Type), 1);
    }
}

// ============================================================================
// NUMBERS
// ============================================================================

#[test]
fn int_round_trip() {
    let (value, messages) = process(IntFilter::new(), json!("12"));
    assert_eq!(value, json!(12));
    assert!(messages.is_empty());
    assert_eq!(value.as_i64().map(|i| i.to_string()).as_deref(), Some("12"));
}

#[test]
fn int_range_enforcement() {
    let filter = IntFilter::new().range(-5, 10).unwrap();

    let (value, messages) = process(filter.clone(), json!(-6));
    assert_eq!(value, json!(false));
    assert_eq!(messages.count_of(MessageKind::Range), 1);

    let (value, messages) = process(filter, json!(-5));
    assert_eq!(value, json!(-5));
    assert!(messages.is_empty());
}

#[test]
fn float_round_trip() {
    let (value, _) = process(FloatFilter::new(), json!("2.75"));
    assert_eq!(value, json!(2.75));
}

#[test]
fn float_separators() {
    let comma = FloatFilter::new().decimal_separator(',').unwrap();
    assert_eq!(process(comma.clone(), json!("2,5")).0, json!(2.5));
    assert_eq!(process(comma, json!("2.5")).0, json!(false));

    let (value, _) = process(FloatFilter::new(), json!("1,200.50"));
    assert_eq!(value, json!(false));
    let grouped = FloatFilter::new().allow_thousands_separator(true);
    assert_eq!(process(grouped, json!("1,200.50")).0, json!(1200.5));
}

// ============================================================================
// STRINGS
// ============================================================================

#[test]
fn string_length_enforcement() {
    let eighteen = "This is 18 chars..";
    assert_eq!(eighteen.chars().count(), 18);

    let limited = StringFilter::new().max_length(10).unwrap();
    let (value, messages) = process(limited.clone(), json!(eighteen));
    assert_eq!(value, json!(false));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages.count_of(MessageKind::Length), 1);

    let (value, messages) = process(limited.truncate(true), json!(eighteen));
    assert_eq!(value, json!("This is 18"));
    assert!(messages.is_empty());
}

#[test]
fn string_rejects_booleans_and_collections() {
    for input in [json!(false), json!([1, 2]), json!({"k": "v"})] {
        let (value, messages) = process(StringFilter::new(), input);
        assert_eq!(value, json!(false));
        assert_eq!(messages.len(), 1);
    }
}

#[test]
fn regexp_shares_string_rules() {
    let filter = RegexpFilter::new("/^[a-z]+$/")
        .unwrap()
        .length(0, 4)
        .unwrap();
    assert_eq!(process(filter.clone(), json!("abcd")).0, json!("abcd"));

    let (value, messages) = process(filter.clone(), json!("abcde"));
    assert_eq!(value, json!(false));
    assert!(messages.has_code("max_length"));

    let (_, messages) = process(filter.strict(true), json!(12));
    assert!(messages.has_code("strict_type"));
    assert!(messages.has_code("pattern_mismatch"));
}

#[test]
fn regexp_reads_paths_as_bare_patterns() {
    let filter = RegexpFilter::new("/usr/bin").unwrap();
    let (value, messages) = process(filter, json!("/usr/bin/env"));
    assert_eq!(value, json!("/usr/bin/env"));
    assert!(messages.is_empty());
}

// ============================================================================
// FORMATS
// ============================================================================

#[test]
fn date_formats() {
    let (value, _) = process(DateFilter::new(), json!("2009-02-28"));
    assert_eq!(value, json!("2009-02-28"));
    let (value, _) = process(DateFilter::new(), json!("2009-02-30"));
    assert_eq!(value, json!(false));

    let datetime = DateFilter::with_format(DateFormat::Datetime);
    let (value, _) = process(datetime, json!("2009-02-28 13:45:00"));
    assert_eq!(value, json!("2009-02-28 13:45:00"));

    let time = DateFilter::with_format(DateFormat::Time);
    assert_eq!(process(time, json!("25:00:00")).0, json!(false));
}

#[test]
fn email_url_ip_return_input() {
    let (value, _) = process(EmailFilter::new(), json!("a@b.co"));
    assert_eq!(value, json!("a@b.co"));

    let url = json!("http://example.com/x?y=1");
    assert_eq!(process(UrlFilter::new(), url.clone()).0, url);

    let (value, _) = process(IpFilter::new(), json!("10.1.2.3"));
    assert_eq!(value, json!("10.1.2.3"));
}

#[test]
fn url_requirements() {
    let filter = UrlFilter::new().path_required(true);
    let (value, _) = process(filter.clone(), json!("http://example.com/"));
    assert_eq!(value, json!(false));
    let (value, _) = process(filter, json!("http://example.com/a"));
    assert_eq!(value, json!("http://example.com/a"));

    let filter = UrlFilter::new().query_required(true);
    let (value, _) = process(filter, json!("http://example.com/a"));
    assert_eq!(value, json!(false));
}

#[test]
fn ip_ranges() {
    let filter = IpFilter::new().no_priv_range(true).no_res_range(true);
    for ip in [
        "10.0.0.1",
        "172.20.1.1",
        "192.168.5.5",
        "169.254.0.1",
        "240.0.0.1",
        "fe80::1",
    ] {
        assert_eq!(process(filter.clone(), json!(ip)).0, json!(false), "{ip}");
    }
    let (value, _) = process(filter, json!("93.184.216.34"));
    assert_eq!(value, json!("93.184.216.34"));
}

// ============================================================================
// ENUM
// ============================================================================

#[test]
fn enum_matching() {
    let filter = EnumFilter::new([
        json!(true),
        json!(1),
        json!(-2),
        json!(2.5),
        json!("test"),
        json!([1, 2]),
    ]);

    let (value, messages) = process(filter.clone(), json!(false));
    assert_eq!(value, json!(false));
    assert_eq!(messages.count_of(MessageKind::Domain), 1);

    let (value, messages) = process(filter, json!(true));
    assert_eq!(value, json!(true));
    assert!(messages.is_empty());
}

// ============================================================================
// OPTIONS
// ============================================================================

#[test]
fn unrecognized_options_are_ignored() {
    let mut filter = Filter::from(IntFilter::new());
    filter.set_option("decimal_separator", json!(",")).unwrap();
    assert_eq!(filter.get_option("decimal_separator"), None);
    assert_eq!(filter.process(&json!("4")), json!(4));
}

#[test]
fn options_reflect_setters() {
    let mut filter = Filter::from(StringFilter::new());
    filter.set_min_length(2).unwrap();
    filter.set_max_length(8).unwrap();
    filter.set_strict(true).unwrap();

    let expected = json!({
        "min_length": 2,
        "max_length": 8,
        "truncate": false,
        "strict": true,
    });
    assert_eq!(Value::Object(filter.options()), expected);
}
