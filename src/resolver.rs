// Author: Dustin Pilgrim
// License: MIT

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ast::{Mapping, Value};
use crate::AsonError;

/// Any `${name}` token. Group 1 captures a leading backslash, which marks the
/// token as escaped (`\${name}`) and exempts it from substitution.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\\)?\$\{(\w+)\}").expect("placeholder pattern is valid")
});

/// Matcher for one exact `${variable}` token, compiled once per `set` call.
#[derive(Debug, Clone)]
pub struct VariablePattern {
    regex: Regex,
}

impl VariablePattern {
    pub fn new(variable: &str) -> Result<Self, AsonError> {
        let pattern = format!(r"(\\)?\$\{{{}\}}", regex::escape(variable));
        let regex = Regex::new(&pattern).map_err(|e| AsonError::PlaceholderResolution {
            message: format!("Cannot build a matcher for variable '{}': {}", variable, e),
            hint: Some("Use a shorter variable name".into()),
            code: Some(508),
        })?;
        Ok(Self { regex })
    }

    /// Replace every unescaped `${variable}` in `text`. The replacement is inserted literally.
    pub fn substitute(&self, text: &str, replacement: &str) -> String {
        self.regex
            .replace_all(text, |caps: &Captures| {
                if caps.get(1).is_some() {
                    caps[0].to_string()
                } else {
                    replacement.to_string()
                }
            })
            .into_owned()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex
            .captures_iter(text)
            .any(|caps| caps.get(1).is_none())
    }
}

/// Resolve `${name}` tokens inside a key against the values of its sibling entries.
///
/// Names that are absent (or hold `null`) stay as literal text. Any other
/// non-string sibling fails the resolution.
pub fn resolve_key_placeholders(key: &str, siblings: &Mapping) -> Result<String, AsonError> {
    let mut failure = None;

    let resolved = PLACEHOLDER.replace_all(key, |caps: &Captures| {
        if caps.get(1).is_some() {
            return caps[0].to_string();
        }

        match siblings.get(&caps[2]) {
            None | Some(Value::Null) => caps[0].to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(value) => {
                failure.get_or_insert_with(|| AsonError::PlaceholderResolution {
                    message: format!(
                        "Placeholder '${{{}}}' in key '{}' refers to a {} value",
                        &caps[2],
                        key,
                        value.type_name()
                    ),
                    hint: Some("Only string siblings can be substituted into a key".into()),
                    code: Some(507),
                });
                caps[0].to_string()
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(resolved.into_owned()),
    }
}

/// Names of all unescaped placeholders in `text`, in order of appearance.
pub fn placeholder_names(text: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(text)
        .filter(|caps| caps.get(1).is_none())
        .map(|caps| caps[2].to_string())
        .collect()
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;

    fn siblings(pairs: &[(&str, Value)]) -> Mapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_substitute_exact_token() {
        let pattern = VariablePattern::new("city").unwrap();
        assert_eq!(pattern.substitute("${city}, ${city}!", "Oslo"), "Oslo, Oslo!");
        assert_eq!(pattern.substitute("${cityname}", "Oslo"), "${cityname}");
        assert_eq!(pattern.substitute("no tokens", "Oslo"), "no tokens");
    }

    #[test]
    fn test_substitute_skips_escaped_token() {
        let pattern = VariablePattern::new("x").unwrap();
        assert_eq!(pattern.substitute(r"\${x} and ${x}", "1"), r"\${x} and 1");
        assert!(!pattern.is_match(r"\${x}"));
        assert!(pattern.is_match(r"\${x}${x}"));
    }

    #[test]
    fn test_substitute_inserts_replacement_literally() {
        let pattern = VariablePattern::new("v").unwrap();
        assert_eq!(pattern.substitute("${v}", "$1 ${0}"), "$1 ${0}");
    }

    #[test]
    fn test_variable_with_regex_metacharacters() {
        let pattern = VariablePattern::new("a.b").unwrap();
        assert_eq!(pattern.substitute("${a.b} ${axb}", "ok"), "ok ${axb}");
    }

    #[test]
    fn test_resolve_key_against_siblings() {
        let map = siblings(&[
            ("key1", Value::from("name")),
            ("port", Value::from(8080)),
            ("flag", Value::from(false)),
        ]);
        assert_eq!(resolve_key_placeholders("${key1}", &map).unwrap(), "name");
        for key in ["p_${port}", "f_${flag}"] {
            match resolve_key_placeholders(key, &map).unwrap_err() {
                AsonError::PlaceholderResolution { code, .. } => assert_eq!(code, Some(507)),
                other => panic!("Expected PlaceholderResolution for {}, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_resolve_key_leaves_unknown_and_null() {
        let map = siblings(&[("gone", Value::Null)]);
        assert_eq!(resolve_key_placeholders("${missing}", &map).unwrap(), "${missing}");
        assert_eq!(resolve_key_placeholders("${gone}", &map).unwrap(), "${gone}");
    }

    #[test]
    fn test_resolve_key_respects_escape() {
        let map = siblings(&[("x", Value::from("y"))]);
        assert_eq!(resolve_key_placeholders(r"\${x}", &map).unwrap(), r"\${x}");
    }

    #[test]
    fn test_resolve_key_rejects_container_sibling() {
        let map = siblings(&[("list", Value::Array(vec![]))]);
        let err = resolve_key_placeholders("${list}", &map).unwrap_err();
        match err {
            AsonError::PlaceholderResolution { code, .. } => assert_eq!(code, Some(507)),
            other => panic!("Expected PlaceholderResolution, got {:?}", other),
        }
    }

    #[test]
    fn test_placeholder_names() {
        assert_eq!(
            placeholder_names(r"${a} \${b} ${c_1}"),
            vec!["a".to_string(), "c_1".to_string()]
        );
    }
}
