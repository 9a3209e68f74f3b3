//! Declared configuration schemas.
//!
//! Pluggable implementations declare their construction parameters as data:
//! a [`ConfigSchema`] is an ordered list of [`ConfigParam`]s, each carrying
//! a name and a JSON default value. Default configurations are derived from
//! the schema, and caller overrides are merged onto those defaults with
//! [`ConfigSchema::merge`].
//!
//! The identity parameters of a descriptor (`type_label`, `uuid`) are never
//! part of configuration — they are supplied at call time. Declaring either
//! of them in a schema is rejected when the schema is built.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Configuration keys that are reserved for call-time identity arguments
/// and may never appear in a schema.
pub const RESERVED_KEYS: [&str; 2] = ["type_label", "uuid"];

/// A single declared configuration parameter.
///
/// Serializable for diagnostics; schemas are only ever *built* in code,
/// through the validating builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigParam {
    /// Parameter name, used as the configuration map key.
    pub name: String,

    /// JSON default value.
    pub default: Value,
}

impl ConfigParam {
    /// Create a new parameter declaration.
    pub fn new(name: impl Into<String>, default: Value) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

/// A declared configuration schema: the full set of parameters an
/// implementation accepts, with their defaults.
///
/// Built via [`ConfigSchema::builder`]; an empty schema (no parameters) is
/// a valid and common case.
///
/// # Example
///
/// ```
/// use descry_core::ConfigSchema;
/// use serde_json::json;
///
/// let schema = ConfigSchema::builder()
///     .param("cache_dir", json!(null))
///     .param("read_only", json!(false))
///     .build()?;
///
/// let defaults = schema.defaults();
/// assert_eq!(defaults.get("read_only"), Some(&json!(false)));
/// # Ok::<(), descry_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigSchema {
    params: Vec<ConfigParam>,
}

impl ConfigSchema {
    /// Start building a schema.
    pub fn builder() -> ConfigSchemaBuilder {
        ConfigSchemaBuilder { params: Vec::new() }
    }

    /// A schema with no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The declared parameters, in declaration order.
    pub fn params(&self) -> &[ConfigParam] {
        &self.params
    }

    /// Whether a parameter with the given name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }

    /// The default configuration map derived from the declared parameters.
    ///
    /// Contains exactly the declared parameter names; reserved identity
    /// keys can never appear here.
    pub fn defaults(&self) -> Map<String, Value> {
        self.params
            .iter()
            .map(|p| (p.name.clone(), p.default.clone()))
            .collect()
    }

    /// Merge caller-supplied overrides onto the schema defaults.
    ///
    /// Caller keys replace defaults; keys omitted by the caller retain the
    /// declared default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an override key is not declared in the
    /// schema.
    pub fn merge(&self, overrides: &Map<String, Value>) -> Result<Map<String, Value>> {
        let mut merged = self.defaults();
        for (key, value) in overrides {
            if !self.contains(key) {
                return Err(Error::config(format!(
                    "unknown configuration key '{key}'"
                )));
            }
            merged.insert(key.clone(), value.clone());
        }
        Ok(merged)
    }
}

/// Builder for [`ConfigSchema`].
///
/// Validation (reserved keys, duplicates) happens in [`build`], so
/// parameter declaration stays chainable.
///
/// [`build`]: ConfigSchemaBuilder::build
#[derive(Debug, Default)]
pub struct ConfigSchemaBuilder {
    params: Vec<ConfigParam>,
}

impl ConfigSchemaBuilder {
    /// Declare a parameter with its default value.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, default: Value) -> Self {
        self.params.push(ConfigParam::new(name, default));
        self
    }

    /// Finish the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a parameter uses a reserved identity
    /// key or a name is declared twice.
    pub fn build(self) -> Result<ConfigSchema> {
        for (i, param) in self.params.iter().enumerate() {
            if RESERVED_KEYS.contains(&param.name.as_str()) {
                return Err(Error::config(format!(
                    "'{}' is a reserved identity key and cannot be a configuration parameter",
                    param.name
                )));
            }
            if self.params[..i].iter().any(|p| p.name == param.name) {
                return Err(Error::config(format!(
                    "configuration parameter '{}' declared twice",
                    param.name
                )));
            }
        }
        Ok(ConfigSchema {
            params: self.params,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> ConfigSchema {
        ConfigSchema::builder()
            .param("cache_dir", json!(null))
            .param("read_only", json!(false))
            .param("batch_size", json!(64))
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_schema() {
        let schema = ConfigSchema::empty();
        assert!(schema.params().is_empty());
        assert!(schema.defaults().is_empty());
    }

    #[test]
    fn test_defaults_contain_declared_params() {
        let defaults = sample_schema().defaults();
        assert_eq!(defaults.len(), 3);
        assert_eq!(defaults.get("cache_dir"), Some(&json!(null)));
        assert_eq!(defaults.get("read_only"), Some(&json!(false)));
        assert_eq!(defaults.get("batch_size"), Some(&json!(64)));
    }

    #[test]
    fn test_defaults_never_contain_identity_keys() {
        let defaults = sample_schema().defaults();
        for key in RESERVED_KEYS {
            assert!(!defaults.contains_key(key));
        }
    }

    #[test]
    fn test_reserved_key_rejected() {
        for key in RESERVED_KEYS {
            let result = ConfigSchema::builder().param(key, json!(null)).build();
            assert!(result.is_err(), "reserved key '{key}' must be rejected");
        }
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let result = ConfigSchema::builder()
            .param("cache_dir", json!(null))
            .param("cache_dir", json!("/tmp"))
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_merge_overrides_win() {
        let schema = sample_schema();
        let mut overrides = Map::new();
        overrides.insert("read_only".to_string(), json!(true));

        let merged = schema.merge(&overrides).unwrap();
        assert_eq!(merged.get("read_only"), Some(&json!(true)));
        // Omitted keys keep their defaults.
        assert_eq!(merged.get("batch_size"), Some(&json!(64)));
        assert_eq!(merged.get("cache_dir"), Some(&json!(null)));
    }

    #[test]
    fn test_merge_empty_overrides_yields_defaults() {
        let schema = sample_schema();
        let merged = schema.merge(&Map::new()).unwrap();
        assert_eq!(merged, schema.defaults());
    }

    #[test]
    fn test_merge_unknown_key_rejected() {
        let schema = sample_schema();
        let mut overrides = Map::new();
        overrides.insert("no_such_param".to_string(), json!(1));

        let result = schema.merge(&overrides);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_merge_identity_key_rejected() {
        // Identity keys are undeclarable, so merging them fails like any
        // unknown key.
        let schema = sample_schema();
        let mut overrides = Map::new();
        overrides.insert("uuid".to_string(), json!("abc"));

        assert!(schema.merge(&overrides).is_err());
    }
}
