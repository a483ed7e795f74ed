use super::*;
use crate::resolver::placeholder_names;

impl Document {
    /// Top-level lookup; `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Top-level lookup that treats a missing key as an error.
    ///
    /// # Errors
    /// Returns `AsonError::GetItemOperation` if `key` is absent.
    pub fn get_item(&self, key: &str) -> Result<&Value, AsonError> {
        self.entries.get(key).ok_or_else(|| {
            Operation::GetItem.fail(&AsonError::RuntimeError {
                message: format!("Key '{}' not found", key),
                hint: Some(format!("Available keys: {}", self.key_list())),
                code: Some(304),
            })
        })
    }

    /// Insert or overwrite a top-level entry. A new key goes to the end; an
    /// existing key keeps its position.
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a typed top-level value.
    ///
    /// # Examples
    /// ```
    /// use ason::Document;
    ///
    /// let doc = Document::loads(r#"{ "port": 8080, "tags": ["a", "b"] }"#).unwrap();
    /// let port: u32 = doc.get_as("port").unwrap();
    /// let tags: Vec<String> = doc.get_as("tags").unwrap();
    /// assert_eq!(port, 8080);
    /// assert_eq!(tags, vec!["a", "b"]);
    /// ```
    ///
    /// # Errors
    /// `GetItemOperation` if the key is absent, `TypeError` if the value doesn't convert.
    pub fn get_as<T>(&self, key: &str) -> Result<T, AsonError>
    where
        T: TryFrom<Value, Error = AsonError>,
    {
        let value = self.get_item(key)?;
        T::try_from(value.clone())
    }

    /// Remove a top-level entry, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &Mapping {
        &self.entries
    }

    pub fn into_entries(self) -> Mapping {
        self.entries
    }

    /// Names of placeholders still present anywhere in the tree (keys and string
    /// values, arrays included), deduplicated in order of first appearance.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_mapping(&self.entries, &mut names);
        names
    }

    fn key_list(&self) -> String {
        self.entries.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn collect_mapping(entries: &Mapping, names: &mut Vec<String>) {
    for (key, value) in entries {
        push_names(key, names);
        collect_value(value, names);
    }
}

fn collect_value(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::String(s) => push_names(s, names),
        Value::Object(nested) => collect_mapping(nested, names),
        Value::Array(items) => items.iter().for_each(|item| collect_value(item, names)),
        _ => {}
    }
}

fn push_names(text: &str, names: &mut Vec<String>) {
    for name in placeholder_names(text) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
}
