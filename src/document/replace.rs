use super::*;
use super::set::set_nested;
use crate::resolver::VariablePattern;

impl Document {
    /// Rename `old_key` to `new_key` and give it `new_value`, at every depth, keeping its position.
    ///
    /// Objects are searched recursively. Objects inside arrays are not renamed; they
    /// receive `set(old_key, new_key)` instead, the same element handling `set` uses.
    /// If `new_key` already exists among the siblings, the rewritten entry takes the
    /// earlier of the two positions.
    pub fn replace(&mut self, old_key: &str, new_key: &str, new_value: impl Into<Value>) -> Result<(), AsonError> {
        let new_value = new_value.into();
        let updated = VariablePattern::new(old_key)
            .and_then(|pattern| {
                replace_mapping(&self.entries, old_key, new_key, &new_value, &pattern, 0)
            })
            .map_err(|e| Operation::Replace.fail(&e))?;
        self.entries = updated;
        Ok(())
    }
}

fn replace_mapping(
    entries: &Mapping,
    old_key: &str,
    new_key: &str,
    new_value: &Value,
    pattern: &VariablePattern,
    depth: usize,
) -> Result<Mapping, AsonError> {
    check_depth(depth)?;
    let mut updated = Mapping::with_capacity(entries.len());

    for (key, value) in entries {
        if key == old_key {
            updated.insert(new_key.to_string(), new_value.clone());
            continue;
        }

        match value {
            Value::Object(nested) => {
                let rebuilt = replace_mapping(nested, old_key, new_key, new_value, pattern, depth + 1)?;
                updated.insert(key.clone(), Value::Object(rebuilt));
            }
            Value::Array(_) => {
                updated.insert(key.clone(), set_nested(value, pattern, new_key, depth + 1)?);
            }
            other => {
                updated.insert(key.clone(), other.clone());
            }
        }
    }

    Ok(updated)
}
