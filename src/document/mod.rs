// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::ast::{Document, Mapping, Value, MAX_DEPTH};
use crate::export;
use crate::parser;
use crate::AsonError;

mod access;
mod append;
mod conversion;
mod replace;
mod set;

/// Public entry points, used to tag internal faults with the operation that hit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Set,
    Replace,
    Append,
    Dumps,
    Loads,
    GetItem,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Set => "set",
            Operation::Replace => "replace",
            Operation::Append => "append",
            Operation::Dumps => "dumps",
            Operation::Loads => "loads",
            Operation::GetItem => "get_item",
        }
    }

    /// Wrap `cause` in this operation's error variant, keeping its hint. Only the
    /// outer code is reported.
    pub(crate) fn fail(self, cause: &AsonError) -> AsonError {
        let message = format!("An error occurred during '{}' operation: {}", self.name(), cause.summary());
        let hint = cause.hint().map(str::to_owned);
        match self {
            Operation::Set => AsonError::SetOperation { message, hint, code: Some(501) },
            Operation::Replace => AsonError::ReplaceOperation { message, hint, code: Some(502) },
            Operation::Append => AsonError::AppendOperation { message, hint, code: Some(503) },
            Operation::Dumps => AsonError::DumpsOperation { message, hint, code: Some(504) },
            Operation::Loads => AsonError::LoadsOperation { message, hint, code: Some(505) },
            Operation::GetItem => AsonError::GetItemOperation { message, hint, code: Some(506) },
        }
    }
}

/// Guard shared by the recursive walks.
pub(crate) fn check_depth(depth: usize) -> Result<(), AsonError> {
    if depth > MAX_DEPTH {
        return Err(AsonError::RuntimeError {
            message: format!("Document nesting exceeds {} levels", MAX_DEPTH),
            hint: Some("Flatten the structure".into()),
            code: Some(509),
        });
    }
    Ok(())
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from its literal text.
    ///
    /// # Example
    /// ```
    /// use ason::Document;
    ///
    /// let doc = Document::loads(r#"{ "name": "${user}", "tags": [] }"#).unwrap();
    /// assert_eq!(doc.len(), 2);
    /// ```
    pub fn loads(text: &str) -> Result<Self, AsonError> {
        let doc = parser::Parser::new(text)
            .and_then(|mut parser| parser.parse_document())
            .map_err(|e| Operation::Loads.fail(&e))?;
        log::debug!("loaded document with {} top-level entries", doc.entries.len());
        Ok(doc)
    }

    /// Plain nested snapshot of the current state. Key order is not preserved
    /// and integral numbers come out as JSON integers.
    pub fn dumps(&self) -> Result<serde_json::Value, AsonError> {
        export::mapping_to_json(&self.entries, 0).map_err(|e| Operation::Dumps.fail(&e))
    }

    /// Compact literal text that `loads` reads back, keys in document order.
    pub fn dumps_literal(&self) -> String {
        export::export_document_to_literal(self, false)
    }

    /// Like [`Document::dumps_literal`], indented by two spaces per level.
    pub fn dumps_pretty(&self) -> String {
        export::export_document_to_literal(self, true)
    }

    /// Load a document from a file. A leading `~/` is expanded to the home directory.
    ///
    /// # Example
    /// ```ignore
    /// let doc = Document::from_file("~/.config/app/settings.ason")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AsonError> {
        let raw = path.as_ref().to_string_lossy().to_string();
        let resolved = expand_home(&raw)?;

        let content = fs::read_to_string(&resolved).map_err(|e| AsonError::FileError {
            message: format!("Failed to read file: {}", e),
            path: resolved.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        Self::loads(&content)
    }

    /// Load from the primary path, falling back to a second path if the first cannot be read.
    ///
    /// Parse errors in the primary file are returned as is; only file errors trigger the fallback.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, AsonError> {
        match Self::from_file(&primary) {
            Ok(doc) => Ok(doc),
            Err(AsonError::FileError { .. }) => {
                log::debug!(
                    "primary document '{}' unavailable, trying '{}'",
                    primary.as_ref().display(),
                    fallback.as_ref().display()
                );
                Self::from_file(&fallback).map_err(|e| match e {
                    AsonError::FileError { message, .. } => AsonError::FileError {
                        message: format!(
                            "Failed to load document from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the files exists".into()),
                        code: Some(302),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Write the pretty literal form to `path`.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AsonError> {
        let raw = path.as_ref().to_string_lossy().to_string();
        let resolved = expand_home(&raw)?;

        let mut text = self.dumps_pretty();
        text.push('\n');
        fs::write(&resolved, text).map_err(|e| AsonError::FileError {
            message: format!("Failed to write file: {}", e),
            path: resolved.to_string_lossy().to_string(),
            hint: Some("Check that the directory exists and is writable".into()),
            code: Some(303),
        })
    }
}

impl FromStr for Document {
    type Err = AsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::loads(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dumps_literal())
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Document { entries: iter.into_iter().collect::<Mapping>() }
    }
}

fn expand_home(raw_path: &str) -> Result<PathBuf, AsonError> {
    if let Some(rest) = raw_path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| AsonError::FileError {
            message: "Could not determine home directory for ~ expansion".into(),
            path: raw_path.to_string(),
            hint: Some("Set HOME or use an absolute path".into()),
            code: Some(300),
        })?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(raw_path))
}

#[cfg(test)]
mod tests;
