//! Plugin manifest parsing.
//!
//! A manifest is a JSON object sitting in a scanned plugin location. The
//! discovery engine looks up a family-specific *export key* inside it:
//!
//! - `null` — the manifest explicitly opts out of exporting anything;
//! - a string — a single exported implementation name;
//! - an array of strings — several exported implementation names;
//! - absent — the engine falls back to matching the candidate's own name.
//!
//! Any other shape is a malformed manifest and is reported to the caller
//! as an error; the discovery engine turns that into a non-fatal warning.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use descry_core::{Error, Result};

/// File name that marks a subdirectory as a plugin candidate.
pub const DIR_MANIFEST: &str = "plugin.json";

/// What a manifest declares for a given export key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSpec {
    /// The manifest explicitly exports nothing (`"key": null`).
    OptOut,

    /// A single implementation name.
    One(String),

    /// An ordered list of implementation names.
    Many(Vec<String>),
}

/// A parsed plugin manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    doc: Map<String, Value>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Manifest`] if the text is not valid JSON or the
    /// top level is not an object.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::manifest(format!("invalid JSON: {e}")))?;
        match value {
            Value::Object(doc) => Ok(Self { doc }),
            other => Err(Error::manifest(format!(
                "top level must be an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Load and parse a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Manifest`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Resolve the export declaration for `export_key`.
    ///
    /// Returns `Ok(None)` when the key is absent (the caller should fall
    /// back to name matching).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Manifest`] when the key is present but its value
    /// has an unsupported shape.
    pub fn export_spec(&self, export_key: &str) -> Result<Option<ExportSpec>> {
        let Some(value) = self.doc.get(export_key) else {
            return Ok(None);
        };
        match value {
            Value::Null => Ok(Some(ExportSpec::OptOut)),
            Value::String(name) => Ok(Some(ExportSpec::One(name.clone()))),
            Value::Array(items) => {
                let mut names = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(name) => names.push(name.clone()),
                        other => {
                            return Err(Error::manifest(format!(
                                "'{export_key}' entries must be strings, got {}",
                                json_type_name(other)
                            )));
                        }
                    }
                }
                Ok(Some(ExportSpec::Many(names)))
            }
            other => Err(Error::manifest(format!(
                "'{export_key}' must be null, a string, or an array of strings, got {}",
                json_type_name(other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const KEY: &str = "descriptor_element";

    #[test]
    fn test_parse_object() {
        let manifest = Manifest::parse(r#"{"descriptor_element": "memory"}"#).unwrap();
        assert_eq!(
            manifest.export_spec(KEY).unwrap(),
            Some(ExportSpec::One("memory".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(Manifest::parse("[1, 2]").is_err());
        assert!(Manifest::parse("\"just a string\"").is_err());
        assert!(Manifest::parse("not json at all {{").is_err());
    }

    #[test]
    fn test_export_spec_opt_out() {
        let manifest = Manifest::parse(r#"{"descriptor_element": null}"#).unwrap();
        assert_eq!(manifest.export_spec(KEY).unwrap(), Some(ExportSpec::OptOut));
    }

    #[test]
    fn test_export_spec_many() {
        let manifest = Manifest::parse(r#"{"descriptor_element": ["a", "b"]}"#).unwrap();
        assert_eq!(
            manifest.export_spec(KEY).unwrap(),
            Some(ExportSpec::Many(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_export_spec_absent_key() {
        let manifest = Manifest::parse(r#"{"unrelated": true}"#).unwrap();
        assert_eq!(manifest.export_spec(KEY).unwrap(), None);
    }

    #[test]
    fn test_export_spec_bad_shape() {
        let manifest = Manifest::parse(r#"{"descriptor_element": 42}"#).unwrap();
        assert!(manifest.export_spec(KEY).is_err());

        let manifest = Manifest::parse(r#"{"descriptor_element": {"name": "x"}}"#).unwrap();
        assert!(manifest.export_spec(KEY).is_err());
    }

    #[test]
    fn test_export_spec_bad_array_entry() {
        let manifest = Manifest::parse(r#"{"descriptor_element": ["ok", 7]}"#).unwrap();
        assert!(manifest.export_spec(KEY).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/plugin.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
