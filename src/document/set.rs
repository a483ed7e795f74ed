use super::*;
use crate::resolver::{resolve_key_placeholders, VariablePattern};

impl Document {
    /// Substitute every `${variable}` with the text form of `value`, at every depth.
    ///
    /// For each string-valued entry, placeholders inside the key are first resolved
    /// against the sibling entries of the same mapping. If that rewrote the key, the
    /// entry is left alone for this call; otherwise `${variable}` is replaced in both
    /// key and value. Nested objects are recursed into (their keys stay as they are),
    /// and inside arrays only objects and arrays are visited, so string elements
    /// are never touched. Unknown placeholders and escaped `\${...}` tokens stay literal.
    ///
    /// The tree is rebuilt and only replaced on success.
    ///
    /// # Example
    /// ```
    /// use ason::Document;
    ///
    /// let mut doc = Document::loads(r#"{ "city": "${city}" }"#).unwrap();
    /// doc.set("city", "New York").unwrap();
    /// assert_eq!(doc.get("city").and_then(|v| v.as_str()), Some("New York"));
    /// ```
    pub fn set(&mut self, variable: &str, value: impl Into<Value>) -> Result<(), AsonError> {
        let text = value.into().to_placeholder_text();
        let updated = VariablePattern::new(variable)
            .and_then(|pattern| set_mapping(&self.entries, &pattern, &text, 0))
            .map_err(|e| Operation::Set.fail(&e))?;
        self.entries = updated;
        Ok(())
    }
}

pub(super) fn set_mapping(
    entries: &Mapping,
    pattern: &VariablePattern,
    text: &str,
    depth: usize,
) -> Result<Mapping, AsonError> {
    check_depth(depth)?;
    let mut updated = Mapping::with_capacity(entries.len());

    for (key, value) in entries {
        match value {
            Value::String(s) => {
                let resolved_key = resolve_key_placeholders(key, entries)?;
                if resolved_key != *key {
                    updated.insert(resolved_key, value.clone());
                } else {
                    updated.insert(
                        pattern.substitute(key, text),
                        Value::String(pattern.substitute(s, text)),
                    );
                }
            }
            Value::Object(nested) => {
                updated.insert(key.clone(), Value::Object(set_mapping(nested, pattern, text, depth + 1)?));
            }
            Value::Array(_) => {
                updated.insert(key.clone(), set_nested(value, pattern, text, depth + 1)?);
            }
            other => {
                updated.insert(key.clone(), other.clone());
            }
        }
    }

    Ok(updated)
}

/// Sequence element handling shared by `set` and `replace`: objects get a full
/// `set`, arrays are walked element-wise, scalars pass through unchanged.
pub(super) fn set_nested(
    item: &Value,
    pattern: &VariablePattern,
    text: &str,
    depth: usize,
) -> Result<Value, AsonError> {
    check_depth(depth)?;
    match item {
        Value::Object(nested) => Ok(Value::Object(set_mapping(nested, pattern, text, depth)?)),
        Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|sub| set_nested(sub, pattern, text, depth + 1))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        other => Ok(other.clone()),
    }
}
