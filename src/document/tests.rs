// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use serde_json::json;

const USAGE_EXAMPLE: &str = r#"{ "${key1}":"John", "age":30, "city":"${city}", "hobbies": [], "nested": { "inner_key": "${inner_value}" } }"#;

fn keys_of(doc: &Document) -> Vec<String> {
    doc.keys().map(String::from).collect()
}

fn nested_too_deep() -> Value {
    let mut value = Value::Null;
    for _ in 0..MAX_DEPTH + 5 {
        let mut level = Mapping::new();
        level.insert("n".into(), value);
        value = Value::Object(level);
    }
    value
}

#[test]
fn test_usage_example_end_to_end() {
    let mut doc = Document::loads(USAGE_EXAMPLE).expect("Failed to load document");

    doc.set("city", "New York").expect("set city");
    doc.set("key1", "name").expect("set key1");
    doc.replace("age", "new_age", 25).expect("replace age");
    doc.append("hobbies", "Reading").expect("append 1");
    doc.append("hobbies", "Reading").expect("append 2");
    doc.append("hobbies", "Reading").expect("append 3");
    doc.set("inner_value", "NestedValue").expect("set inner_value");

    assert_eq!(doc.get("name"), Some(&Value::from("John")));
    assert_eq!(doc.get("new_age"), Some(&Value::Number(25.0)));
    assert_eq!(doc.get("city"), Some(&Value::from("New York")));
    assert!(doc.get("age").is_none());

    let hobbies: Vec<String> = doc.get_as("hobbies").expect("hobbies should be a list");
    assert_eq!(hobbies, vec!["Reading", "Reading", "Reading"]);

    let snapshot = doc.dumps().expect("dumps");
    assert_eq!(snapshot["nested"], json!({"inner_key": "NestedValue"}));

    assert_eq!(keys_of(&doc), vec!["name", "new_age", "city", "hobbies", "nested"]);
    assert!(doc.placeholders().is_empty());
}

// ===== set =====

#[test]
fn test_set_unknown_variable_leaves_tree_unchanged() {
    let mut doc = Document::loads(USAGE_EXAMPLE).unwrap();
    let before = doc.clone();

    doc.set("not_there", "value").unwrap();

    assert_eq!(doc, before);
    assert_eq!(keys_of(&doc), keys_of(&before));
}

#[test]
fn test_set_never_touches_escaped_token() {
    let mut doc = Document::loads(r#"{"literal": "\${x}", "mixed": "\${x} / ${x}", "\${x}": "k"}"#).unwrap();

    doc.set("x", "v").unwrap();

    assert_eq!(doc.get("literal").and_then(Value::as_str), Some(r"\${x}"));
    assert_eq!(doc.get("mixed").and_then(Value::as_str), Some(r"\${x} / v"));
    assert_eq!(doc.get(r"\${x}").and_then(Value::as_str), Some("k"));
}

#[test]
fn test_set_reaches_every_depth() {
    let input = r#"{
        "outer": {"inner": {"deep": "${v}", "${v}_key": "x"}},
        "list": [{"a": "${v}"}, [{"b": "pre-${v}-post"}]],
        "top": "${v}${v}"
    }"#;
    let mut doc = Document::loads(input).unwrap();

    doc.set("v", "ok").unwrap();

    let snapshot = doc.dumps().unwrap();
    assert_eq!(snapshot["outer"], json!({"inner": {"deep": "ok", "ok_key": "x"}}));
    assert_eq!(snapshot["list"], json!([{"a": "ok"}, [{"b": "pre-ok-post"}]]));
    assert_eq!(snapshot["top"], json!("okok"));
}

#[test]
fn test_set_skips_strings_directly_inside_arrays() {
    let mut doc = Document::loads(r#"{"names": ["${who}", {"n": "${who}"}]}"#).unwrap();

    doc.set("who", "me").unwrap();

    assert_eq!(
        doc.get("names"),
        Some(&Value::Array(vec![
            Value::from("${who}"),
            Value::Object(Mapping::from_iter([("n".to_string(), Value::from("me"))])),
        ]))
    );
}

#[test]
fn test_set_resolves_key_from_sibling_before_variable() {
    let mut doc = Document::loads(r#"{"a": "first", "${a}": "${a}"}"#).unwrap();

    doc.set("a", "second").unwrap();

    // the key resolved against its sibling, so the value was left for a later call
    assert_eq!(keys_of(&doc), vec!["a", "first"]);
    assert_eq!(doc.get("first").and_then(Value::as_str), Some("${a}"));
    assert_eq!(doc.get("a").and_then(Value::as_str), Some("first"));
}

#[test]
fn test_set_keeps_keys_of_object_values() {
    let mut doc = Document::loads(r#"{"k": "v", "${k}": {"x": 1}}"#).unwrap();

    doc.set("k", "z").unwrap();

    assert!(doc.contains_key("${k}"));
}

#[test]
fn test_set_uses_text_form_of_value() {
    let mut doc = Document::loads(r#"{"n": "${n}", "f": "${f}", "b": "${b}", "z": "${z}"}"#).unwrap();

    doc.set("n", 25).unwrap();
    doc.set("f", 2.5).unwrap();
    doc.set("b", true).unwrap();
    doc.set("z", ()).unwrap();

    assert_eq!(doc.get_as::<String>("n").unwrap(), "25");
    assert_eq!(doc.get_as::<String>("f").unwrap(), "2.5");
    assert_eq!(doc.get_as::<String>("b").unwrap(), "true");
    assert_eq!(doc.get_as::<String>("z").unwrap(), "null");
}

#[test]
fn test_set_key_referencing_number_or_bool_fails_without_commit() {
    let mut doc =
        Document::loads(r#"{"port": 8080, "p_${port}": "v", "flag": false, "f_${flag}": "w"}"#).unwrap();
    let before = doc.clone();

    match doc.set("other", "x").unwrap_err() {
        AsonError::SetOperation { code, .. } => assert_eq!(code, Some(501)),
        other => panic!("Expected SetOperation, got {:?}", other),
    }
    assert_eq!(doc, before);
    assert_eq!(keys_of(&doc), vec!["port", "p_${port}", "flag", "f_${flag}"]);
}

#[test]
fn test_set_key_referencing_container_fails_without_commit() {
    let mut doc = Document::loads(r#"{"list": [], "${list}": "x", "v": "${v}"}"#).unwrap();
    let before = doc.clone();

    let err = doc.set("v", "1").unwrap_err();

    match &err {
        AsonError::SetOperation { message, code, .. } => {
            assert_eq!(*code, Some(501));
            assert!(message.contains("'set'"));
        }
        other => panic!("Expected SetOperation, got {:?}", other),
    }
    assert_eq!(doc, before);
}

#[test]
fn test_set_on_overly_deep_tree_fails() {
    let mut doc = Document::new();
    doc.set_item("deep", nested_too_deep());
    let before = doc.clone();

    let err = doc.set("x", "y").unwrap_err();
    assert_eq!(err.code(), Some(501));
    assert_eq!(doc, before);
}

// ===== replace =====

#[test]
fn test_replace_preserves_position() {
    let mut doc = Document::loads(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();

    doc.replace("b", "B", 20).unwrap();

    assert_eq!(keys_of(&doc), vec!["a", "B", "c"]);
    assert_eq!(doc.get_as::<i64>("B").unwrap(), 20);
}

#[test]
fn test_replace_applies_at_every_nesting_level() {
    let mut doc = Document::loads(r#"{"id": 1, "child": {"name": "c", "id": 2, "leaf": {"id": 3}}}"#).unwrap();

    doc.replace("id", "key", 0).unwrap();

    let snapshot = doc.dumps().unwrap();
    assert_eq!(
        snapshot,
        json!({"key": 0, "child": {"name": "c", "key": 0, "leaf": {"key": 0}}})
    );
    let child: Mapping = doc.get_as("child").unwrap();
    assert_eq!(child.keys().collect::<Vec<_>>(), vec!["name", "key", "leaf"]);
}

#[test]
fn test_replace_inside_array_substitutes_instead_of_renaming() {
    let mut doc = Document::loads(r#"{"items": [{"old": "${old}", "keep": 1}]}"#).unwrap();

    doc.replace("old", "new", 5).unwrap();

    // objects inside arrays receive set("old", "new"), not a rename
    assert_eq!(doc.dumps().unwrap(), json!({"items": [{"old": "new", "keep": 1}]}));
}

#[test]
fn test_replace_onto_existing_key_keeps_earlier_position() {
    let mut doc = Document::loads(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();

    doc.replace("b", "a", 9).unwrap();

    assert_eq!(keys_of(&doc), vec!["a", "c"]);
    assert_eq!(doc.get_as::<i64>("a").unwrap(), 9);
}

#[test]
fn test_replace_missing_key_is_noop() {
    let mut doc = Document::loads(USAGE_EXAMPLE).unwrap();
    let before = doc.clone();

    doc.replace("nope", "still_nope", 1).unwrap();

    assert_eq!(doc, before);
}

#[test]
fn test_replace_on_overly_deep_tree_fails() {
    let mut doc = Document::new();
    doc.set_item("deep", nested_too_deep());

    match doc.replace("x", "y", 1).unwrap_err() {
        AsonError::ReplaceOperation { code, .. } => assert_eq!(code, Some(502)),
        other => panic!("Expected ReplaceOperation, got {:?}", other),
    }
}

// ===== append =====

#[test]
fn test_append_keeps_existing_elements() {
    let mut doc = Document::loads(r#"{"xs": [1, "two", {"three": 3}]}"#).unwrap();

    doc.append("xs", vec![4]).unwrap();

    assert_eq!(doc.dumps().unwrap(), json!({"xs": [1, "two", {"three": 3}, [4]]}));
}

#[test]
fn test_append_missing_or_scalar_key_is_noop() {
    let mut doc = Document::loads(r#"{"name": "x", "n": 1}"#).unwrap();
    let before = doc.clone();

    doc.append("missing_key", "v").expect("append must not fail for a missing key");
    doc.append("name", "v").expect("append must not fail for a string");
    doc.append("n", "v").expect("append must not fail for a number");

    assert_eq!(doc, before);
}

#[test]
fn test_append_into_object_looks_for_same_key_inside() {
    let mut doc = Document::loads(r#"{"tags": {"tags": ["a"], "other": []}}"#).unwrap();

    doc.append("tags", "b").unwrap();

    assert_eq!(doc.dumps().unwrap(), json!({"tags": {"tags": ["a", "b"], "other": []}}));
}

#[test]
fn test_append_into_object_without_same_key_is_noop() {
    let mut doc = Document::loads(r#"{"tags": {"other": []}}"#).unwrap();
    let before = doc.clone();

    doc.append("tags", "b").unwrap();

    assert_eq!(doc, before);
}

#[test]
fn test_append_on_overly_deep_chain_fails() {
    let mut value = Value::Array(vec![]);
    for _ in 0..MAX_DEPTH + 5 {
        let mut level = Mapping::new();
        level.insert("k".into(), value);
        value = Value::Object(level);
    }
    let mut doc = Document::new();
    doc.set_item("k", value);
    let before = doc.clone();

    match doc.append("k", 1).unwrap_err() {
        AsonError::AppendOperation { code, .. } => assert_eq!(code, Some(503)),
        other => panic!("Expected AppendOperation, got {:?}", other),
    }
    assert_eq!(doc, before);
}

// ===== dumps / loads =====

#[test]
fn test_dumps_snapshot_is_independent() {
    let mut doc = Document::loads(r#"{"xs": [], "n": 30}"#).unwrap();
    let snapshot = doc.dumps().unwrap();

    doc.append("xs", 1).unwrap();
    doc.set_item("n", 31);

    assert_eq!(snapshot, json!({"xs": [], "n": 30}));
    assert!(snapshot["n"].is_i64());
}

#[test]
fn test_dumps_rejects_non_finite_numbers() {
    let mut doc = Document::new();
    doc.set_item("inf", f64::INFINITY);

    match doc.dumps().unwrap_err() {
        AsonError::DumpsOperation { code, message, .. } => {
            assert_eq!(code, Some(504));
            assert!(message.contains("'dumps'"));
        }
        other => panic!("Expected DumpsOperation, got {:?}", other),
    }
}

#[test]
fn test_literal_round_trip() {
    let input = r#"{"s": "text", "n": -12.75, "i": 7, "b": false, "z": null, "xs": [[], {}, [1, [2]]], "o": {"k": {"j": "v"}}}"#;
    let doc = Document::loads(input).unwrap();

    let compact = Document::loads(&doc.dumps_literal()).unwrap();
    let pretty = Document::loads(&doc.dumps_pretty()).unwrap();

    assert_eq!(compact, doc);
    assert_eq!(pretty, doc);
    assert_eq!(keys_of(&compact), keys_of(&doc));
}

#[test]
fn test_loads_wraps_syntax_errors() {
    for bad in [r#"{"a": }"#, r#"{"a": 1"#, "", "[1]", r#"{"a": "open}"#, r#"{"a": os.system}"#] {
        match Document::loads(bad) {
            Err(AsonError::LoadsOperation { code, message, .. }) => {
                assert_eq!(code, Some(505));
                assert!(message.contains("'loads'"), "message was: {}", message);
            }
            other => panic!("Expected LoadsOperation for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_loads_rejects_out_of_range_number() {
    match Document::loads(r#"{"n": 1e400}"#) {
        Err(AsonError::LoadsOperation { code, .. }) => assert_eq!(code, Some(505)),
        other => panic!("Expected LoadsOperation, got {:?}", other),
    }
}

#[test]
fn test_wrapped_error_reports_only_outer_code() {
    let mut doc = Document::new();
    doc.set_item("bad", f64::INFINITY);

    let err = doc.dumps().unwrap_err();
    let text = err.to_string();
    assert_eq!(err.code(), Some(504));
    assert_eq!(text.matches("Code:").count(), 1, "text was: {}", text);
    assert!(text.ends_with("Code: 504"), "text was: {}", text);
    assert!(text.contains("has no JSON representation"));
    assert_eq!(err.hint(), Some("Replace NaN or infinite numbers before dumping"));
}

#[test]
fn test_from_str() {
    let doc: Document = r#"{"a": 1}"#.parse().unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.to_string(), r#"{"a": 1}"#);
}

// ===== access =====

#[test]
fn test_get_and_get_item() {
    let doc = Document::loads(r#"{"present": 1}"#).unwrap();

    assert_eq!(doc.get("present"), Some(&Value::Number(1.0)));
    assert!(doc.get("absent").is_none());
    assert_eq!(doc.get_item("present").unwrap(), &Value::Number(1.0));

    match doc.get_item("absent").unwrap_err() {
        AsonError::GetItemOperation { code, message, .. } => {
            assert_eq!(code, Some(506));
            assert!(message.contains("absent"));
        }
        other => panic!("Expected GetItemOperation, got {:?}", other),
    }
}

#[test]
fn test_set_item_creates_or_overwrites() {
    let mut doc = Document::loads(r#"{"a": 1, "b": 2}"#).unwrap();

    doc.set_item("a", "one");
    doc.set_item("c", vec!["x", "y"]);

    assert_eq!(keys_of(&doc), vec!["a", "b", "c"]);
    assert_eq!(doc.get_as::<String>("a").unwrap(), "one");
    assert_eq!(doc.get_as::<Vec<String>>("c").unwrap(), vec!["x", "y"]);
}

#[test]
fn test_remove_keeps_order() {
    let mut doc = Document::loads(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();

    assert_eq!(doc.remove("b"), Some(Value::Number(2.0)));
    assert_eq!(doc.remove("b"), None);
    assert_eq!(keys_of(&doc), vec!["a", "c"]);
}

#[test]
fn test_get_as_conversions() {
    let doc = Document::loads(r#"{"s": "x", "n": 3, "f": 1.5, "b": true, "z": null, "o": {"k": 1}}"#).unwrap();

    assert_eq!(doc.get_as::<f64>("f").unwrap(), 1.5);
    assert_eq!(doc.get_as::<u32>("n").unwrap(), 3);
    assert!(doc.get_as::<bool>("b").unwrap());
    assert_eq!(doc.get_as::<Option<String>>("z").unwrap(), None);
    assert_eq!(doc.get_as::<Option<String>>("s").unwrap(), Some("x".into()));
    assert_eq!(doc.get_as::<Mapping>("o").unwrap().len(), 1);

    match doc.get_as::<i64>("f").unwrap_err() {
        AsonError::TypeError { code, .. } => assert_eq!(code, Some(403)),
        other => panic!("Expected TypeError, got {:?}", other),
    }
    match doc.get_as::<String>("n").unwrap_err() {
        AsonError::TypeError { code, .. } => assert_eq!(code, Some(401)),
        other => panic!("Expected TypeError, got {:?}", other),
    }
    assert_eq!(doc.get_as::<String>("missing").unwrap_err().code(), Some(506));
}

#[test]
fn test_placeholders_lists_unresolved_names() {
    let doc = Document::loads(r#"{"${a}": "${b}", "xs": ["${c}", {"d": "${a} \${e}"}]}"#).unwrap();
    assert_eq!(doc.placeholders(), vec!["a", "b", "c"]);
}

// ===== files =====

#[test]
fn test_write_and_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.ason");

    let mut doc = Document::loads(USAGE_EXAMPLE).unwrap();
    doc.set("city", "Oslo").unwrap();
    doc.write_file(&path).expect("write_file");

    let back = Document::from_file(&path).expect("from_file");
    assert_eq!(back, doc);
    assert_eq!(keys_of(&back), keys_of(&doc));
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = Document::from_file(dir.path().join("nope.ason")).unwrap_err();
    match err {
        AsonError::FileError { code, .. } => assert_eq!(code, Some(301)),
        other => panic!("Expected FileError, got {:?}", other),
    }
}

#[test]
fn test_from_file_with_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("primary.ason");
    let fallback = dir.path().join("fallback.ason");
    std::fs::write(&fallback, r#"{"source": "fallback"}"#).unwrap();

    let doc = Document::from_file_with_fallback(&primary, &fallback).unwrap();
    assert_eq!(doc.get_as::<String>("source").unwrap(), "fallback");

    std::fs::write(&primary, r#"{"source": "primary"}"#).unwrap();
    let doc = Document::from_file_with_fallback(&primary, &fallback).unwrap();
    assert_eq!(doc.get_as::<String>("source").unwrap(), "primary");

    let missing = dir.path().join("missing.ason");
    let err = Document::from_file_with_fallback(&missing, &missing).unwrap_err();
    assert_eq!(err.code(), Some(302));
}

#[test]
fn test_from_file_with_fallback_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("broken.ason");
    let fallback = dir.path().join("fallback.ason");
    std::fs::write(&primary, "{ not valid").unwrap();
    std::fs::write(&fallback, r#"{"ok": true}"#).unwrap();

    let err = Document::from_file_with_fallback(&primary, &fallback).unwrap_err();
    assert_eq!(err.code(), Some(505));
}
