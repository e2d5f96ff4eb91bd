use neatfmt::{preprocess, FixKind, JsonFormatter, JsonValue};

#[test]
fn round_trip_preserves_value_and_key_order() {
    let input = r#"{"z":1,"a":[true,null,"s"],"m":{"k":2.5}}"#;
    let formatter = JsonFormatter::new();

    let first = formatter.parse(input).unwrap();
    let pretty = formatter.reformat(input).unwrap();
    let second = formatter.parse(&pretty).unwrap();
    assert_eq!(first, second);

    // "z" was first in the source and must stay first in the output.
    assert!(pretty.find("\"z\"").unwrap() < pretty.find("\"a\"").unwrap());
}

#[test]
fn number_lexemes_survive_the_round_trip() {
    let formatter = JsonFormatter::new();
    let output = formatter.minify(r#"[1e3, 1.50, -0]"#).unwrap();
    assert_eq!(output, "[1e3,1.50,-0]");
}

#[test]
fn preprocess_is_idempotent() {
    let inputs = [
        "{\"a\":1}",
        "\u{FEFF} [1, 2] ",
        r#"{\"a\":1}"#,
        "  plain text  ",
    ];
    for input in inputs {
        let once = preprocess(input);
        assert_eq!(preprocess(&once), once, "input: {:?}", input);
    }
}

#[test]
fn bom_and_bare_escape_are_recovered() {
    let input = "\u{FEFF}{\\\"a\\\":1}";
    assert_eq!(preprocess(input), r#"{"a":1}"#);

    let value = JsonFormatter::new().parse(input).unwrap();
    assert_eq!(value.get("a"), Some(&JsonValue::Number("1".into())));
}

#[test]
fn doubly_encoded_document_is_recovered() {
    // A JSON string whose content is itself a JSON object.
    let input = r#""{\"a\":1}""#;
    let value = JsonFormatter::new().parse(input).unwrap();
    assert!(value.is_object());
    assert_eq!(value.get("a"), Some(&JsonValue::Number("1".into())));
}

#[test]
fn doubly_encoded_garbage_keeps_the_string() {
    let value = JsonFormatter::new().parse(r#""not json""#).unwrap();
    assert_eq!(value.as_str(), Some("not json"));
}

#[test]
fn parse_error_includes_parser_message() {
    let err = JsonFormatter::new().parse("{\"a\" 1}").unwrap_err();
    assert!(err.message.contains("expected ':'"), "message: {}", err.message);
}

#[test]
fn normalize_newlines_fix_reports_its_work() {
    let report = JsonFormatter::new().fix("a\r\nb\rc\n", FixKind::NormalizeNewlines);
    assert_eq!(report.text, "a\nb\nc\n");
    assert!(report.log.iter().any(|line| line.contains("normalized")));
    // Still not JSON, and the report says so instead of discarding the text.
    assert!(report.error.is_some());
}

#[test]
fn fix_all_repairs_an_escaped_document() {
    let input = "\u{FEFF}  {\\\"a\\\":1}  ";
    let report = JsonFormatter::new().fix(input, FixKind::All);
    assert_eq!(report.text, r#"{"a":1}"#);
    assert!(report.error.is_none());
    assert!(report.log.iter().any(|line| line.contains("valid JSON")));
    assert!(report.log.iter().any(|line| line.contains("reduced")));
}

#[test]
fn single_step_logs_even_when_nothing_changed() {
    let report = JsonFormatter::new().fix("{\"a\":1}", FixKind::RemoveBom);
    assert!(report.log.iter().any(|line| line.contains("no byte-order mark")));
    assert!(report.error.is_none());
}

#[test]
fn fix_newlines_inside_keys_and_values() {
    let report = JsonFormatter::new().fix("{\"a\nb\": \"c\nd\"}", FixKind::FixNewlines);
    assert_eq!(report.text, "{\"ab\": \"cd\"}");
    assert!(report.error.is_none());
}

#[test]
fn blank_line_runs_collapse_to_one() {
    let report = JsonFormatter::new().fix("{\n\n\n\n\"a\": 1\n}", FixKind::RemoveEmptyLines);
    assert_eq!(report.text, "{\n\n\"a\": 1\n}");
    assert!(report.error.is_none());
}

#[test]
fn compress_option_switches_output_shape() {
    let mut formatter = JsonFormatter::new();
    formatter.options.compress = true;
    assert_eq!(formatter.reformat("{ \"a\": [1, 2] }").unwrap(), r#"{"a":[1,2]}"#);
}

#[test]
fn serialize_formats_rust_values() {
    let formatter = JsonFormatter::new();
    let output = formatter.serialize(&vec![1, 2]).unwrap();
    assert_eq!(output, "[\n    1,\n    2\n]");
}
