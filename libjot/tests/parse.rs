//! End-to-end contract tests: grammar acceptance, option gating, the
//! rendered error format, and the file loader.

use std::io::Write;
use std::sync::Arc;

use libjot::{parse, parse_with_options, ParseOptions, Source, Value};

fn source(text: &str) -> Source {
    Source::from_string("input.json", text.to_string())
}

#[test]
fn test_strict_accepts_rfc_json_and_preserves_member_order() {
    let value = parse(&source(r#"{"a":1,"b":[1,2,3]}"#)).unwrap();
    let obj = value.as_object().unwrap();
    let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(obj["a"], Value::Number(1.0));
    let b: Vec<f64> = obj["b"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    assert_eq!(b, [1.0, 2.0, 3.0]);
}

#[test]
fn test_relaxed_forms_fail_strict_and_succeed_relaxed() {
    for text in ["+1e5", "'single'", ".5", "NaN"] {
        let s = source(text);
        assert!(parse(&s).is_err(), "{} should fail strict", text);
        assert!(
            parse_with_options(&s, ParseOptions::relaxed_options()).is_ok(),
            "{} should parse relaxed",
            text
        );
    }
}

#[test]
fn test_relaxed_values_come_back_right() {
    let s = source(r#"{"p": +1e5, "q": 'single', "r": .5, "s": NaN, "t": -Infinity}"#);
    let value = parse_with_options(&s, ParseOptions::relaxed_options()).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj["p"], Value::Number(1e5));
    assert_eq!(obj["q"].as_str(), Some("single"));
    assert_eq!(obj["r"], Value::Number(0.5));
    assert!(obj["s"].as_number().unwrap().is_nan());
    assert_eq!(obj["t"], Value::Number(f64::NEG_INFINITY));
}

#[test]
fn test_trailing_comma_error_points_at_the_closing_brace() {
    let s = source(r#"{"a":1,}"#);
    let err = parse(&s).unwrap_err();
    assert_eq!(err.location().char_index, 7);
    assert_eq!(err.to_string(), "input.json:1:8: expected string key");
}

#[test]
fn test_unterminated_string_error_points_at_end_of_buffer() {
    let s = source("\"abc");
    let err = parse(&s).unwrap_err();
    assert_eq!(err.location().char_index, 4);
    assert_eq!(err.to_string(), "input.json:1:5: unterminated string");
}

#[test]
fn test_rendered_location_is_one_based_and_tab_expanded() {
    let s = Source::from_string("cfg.json", "{\n\t\"a\": tru\n}".to_string());
    let err = parse(&s).unwrap_err();
    // The bad literal sits after a tab: byte column 6, visual column 13,
    // shown 1-based as 14.
    assert_eq!(err.to_string(), "cfg.json:2:14: invalid literal 'tru'");
}

#[test]
fn test_reparsing_one_source_with_different_options_is_independent() {
    let s = source("[.5]");
    let strict_err = parse(&s).unwrap_err();
    let relaxed_value = parse_with_options(&s, ParseOptions::relaxed_options()).unwrap();
    let strict_err_again = parse(&s).unwrap_err();
    assert_eq!(strict_err.to_string(), strict_err_again.to_string());
    assert_eq!(relaxed_value.as_array().unwrap()[0], Value::Number(0.5));
}

#[test]
fn test_shared_buffers_alias_one_allocation() {
    let shared: Arc<[u8]> = Arc::from(r#"{"n": 7}"#.as_bytes().to_vec());
    let a = Source::from_shared("a.json", Arc::clone(&shared));
    let b = Source::from_shared("b.json", Arc::clone(&shared));
    let va = parse(&a).unwrap();
    let vb = parse(&b).unwrap();
    assert_eq!(va, vb);
    assert_eq!(Arc::strong_count(&shared), 3);
}

#[test]
fn test_load_file_parses_like_an_owned_buffer() {
    let text = "{\n  \"x\": [1, 2],\n  \"y\": \"z\"\n}\n";
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();

    let mapped = Source::load_file(file.path()).unwrap();
    assert!(mapped.has_contents());
    assert_eq!(mapped.size(), text.len());
    assert_eq!(parse(&mapped).unwrap(), parse(&source(text)).unwrap());
}

#[test]
fn test_load_file_errors_carry_the_loaded_file_name() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"a\": }").unwrap();
    file.flush().unwrap();

    let mapped = Source::load_file(file.path()).unwrap();
    let err = parse(&mapped).unwrap_err();
    let expected = format!("{}:1:7: expected a value, found '}}'", file.path().display());
    assert_eq!(err.to_string(), expected);
}

#[test]
fn test_load_file_handles_empty_files() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let loaded = Source::load_file(file.path()).unwrap();
    assert!(loaded.has_contents());
    assert_eq!(loaded.size(), 0);
    let err = parse(&loaded).unwrap_err();
    assert_eq!(err.message(), "premature end of input");
}

#[test]
fn test_load_file_reports_missing_paths() {
    let err = Source::load_file("/no/such/file.json").unwrap_err();
    assert_eq!(err.path(), "/no/such/file.json");
    assert!(err.to_string().starts_with("/no/such/file.json: "));
}
