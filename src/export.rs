// Author: Dustin Pilgrim
// License: MIT

use std::fs;

use crate::ast::{format_number, Document, Mapping, Value};
use crate::document::check_depth;
use crate::AsonError;

/// Export an ASON document to pretty-printed JSON, keeping key order.
///
/// Strings keep any `${name}` placeholders verbatim. Numbers that are not finite
/// have no JSON form and make the export fail.
///
/// # Examples
/// ```
/// use ason::{Document, export};
///
/// let doc = Document::loads(r#"{ "name": "${user}", "age": 30 }"#).unwrap();
/// let json = export::export_document_to_json(&doc).unwrap();
/// assert!(json.contains("\"age\": 30"));
/// ```
pub fn export_document_to_json(doc: &Document) -> Result<String, AsonError> {
    serde_json::to_string_pretty(doc).map_err(|e| AsonError::DumpsOperation {
        message: format!("An error occurred during 'dumps' operation: {}", e),
        hint: Some("Replace NaN or infinite numbers before exporting".into()),
        code: Some(504),
    })
}

/// Export an ASON file directly to JSON.
///
/// # Errors
/// Returns error if the file can't be read or contains invalid ASON syntax.
pub fn export_ason_file(path: &str) -> Result<String, AsonError> {
    let input = fs::read_to_string(path).map_err(|e| AsonError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.to_string(),
        hint: None,
        code: Some(301),
    })?;

    let doc = Document::loads(&input)?;
    export_document_to_json(&doc)
}

/// Literal text for a whole document, readable by `Document::loads`.
pub fn export_document_to_literal(doc: &Document, pretty: bool) -> String {
    let mut out = String::new();
    write_mapping(&mut out, &doc.entries, pretty, 0);
    out
}

pub(crate) fn value_to_literal(value: &Value, pretty: bool) -> String {
    let mut out = String::new();
    write_value(&mut out, value, pretty, 0);
    out
}

fn write_value(out: &mut String, value: &Value, pretty: bool, indent: usize) {
    match value {
        Value::String(s) => write_string(out, s),
        // non-finite numbers have no literal form
        Value::Number(n) if !n.is_finite() => out.push_str("null"),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                separator(out, i, pretty, indent + 1);
                write_value(out, item, pretty, indent + 1);
            }
            close(out, ']', pretty, indent);
        }
        Value::Object(items) => write_mapping(out, items, pretty, indent),
    }
}

fn write_mapping(out: &mut String, items: &Mapping, pretty: bool, indent: usize) {
    if items.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (i, (key, value)) in items.iter().enumerate() {
        separator(out, i, pretty, indent + 1);
        write_string(out, key);
        out.push_str(": ");
        write_value(out, value, pretty, indent + 1);
    }
    close(out, '}', pretty, indent);
}

fn separator(out: &mut String, index: usize, pretty: bool, indent: usize) {
    if index > 0 {
        out.push(',');
        if !pretty {
            out.push(' ');
        }
    }
    if pretty {
        out.push('\n');
        out.push_str(&"  ".repeat(indent));
    }
}

fn close(out: &mut String, bracket: char, pretty: bool, indent: usize) {
    if pretty {
        out.push('\n');
        out.push_str(&"  ".repeat(indent));
    }
    out.push(bracket);
}

/// JSON string quoting. Backslashes are doubled, so `\${x}` reads back as the escape token.
fn write_string(out: &mut String, s: &str) {
    out.push_str(&serde_json::Value::String(s.to_owned()).to_string());
}

/// Plain JSON snapshot used by `Document::dumps`.
pub(crate) fn mapping_to_json(items: &Mapping, depth: usize) -> Result<serde_json::Value, AsonError> {
    check_depth(depth)?;
    let mut map = serde_json::Map::new();
    for (key, value) in items {
        map.insert(key.clone(), value_to_json(value, depth + 1)?);
    }
    Ok(serde_json::Value::Object(map))
}

fn value_to_json(value: &Value, depth: usize) -> Result<serde_json::Value, AsonError> {
    Ok(match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
            serde_json::Value::from(*n as i64)
        }
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .ok_or_else(|| AsonError::TypeError {
                message: format!("Number {} has no JSON representation", n),
                hint: Some("Replace NaN or infinite numbers before dumping".into()),
                code: Some(408),
            })?,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Null => serde_json::Value::Null,
        Value::Array(items) => {
            check_depth(depth)?;
            serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| value_to_json(item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        }
        Value::Object(items) => mapping_to_json(items, depth)?,
    })
}
