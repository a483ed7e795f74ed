use super::*;

impl Document {
    /// Push `value` onto the array stored under `key`.
    ///
    /// When `key` holds an object, the append is retried inside that object under
    /// the same key name. Any other case logs a warning and leaves the document as is.
    pub fn append(&mut self, key: &str, value: impl Into<Value>) -> Result<(), AsonError> {
        let mut updated = self.entries.clone();
        append_to(&mut updated, key, value.into(), 0).map_err(|e| Operation::Append.fail(&e))?;
        self.entries = updated;
        Ok(())
    }
}

fn append_to(entries: &mut Mapping, key: &str, value: Value, depth: usize) -> Result<(), AsonError> {
    check_depth(depth)?;
    match entries.get_mut(key) {
        Some(Value::Array(items)) => items.push(value),
        Some(Value::Object(nested)) => append_to(nested, key, value, depth + 1)?,
        _ => log::warn!("'{}' is not a list or nested type. Cannot append value.", key),
    }
    Ok(())
}
