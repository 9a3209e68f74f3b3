//! Element factories: the configuration round-trip surface.
//!
//! A factory declares its configuration parameters as a
//! [`ConfigSchema`] and constructs elements from a fully-merged
//! configuration map plus call-time identity arguments. Identity
//! (`type_label`, `uuid`) never travels through configuration.

use serde_json::{Map, Value};
use uuid::Uuid;

use descry_core::{ConfigSchema, Result};
use descry_plugin::PluginFactory;

use crate::element::DescriptorElement;

/// Factory for one descriptor element implementation.
///
/// This is the capability trait registered with the element family's
/// [`PluginRegistry`](descry_plugin::PluginRegistry); [`PluginFactory`]
/// supplies the registration name and the usability gate.
///
/// The two provided methods implement the configuration round-trip:
/// `default_config` derives defaults from the declared schema, and
/// `from_config` merges caller overrides onto those defaults before
/// constructing. Implementors only supply [`schema`](Self::schema) and
/// [`build`](Self::build).
pub trait ElementFactory: PluginFactory {
    /// The declared configuration schema.
    fn schema(&self) -> ConfigSchema;

    /// Construct an element from a fully-merged configuration.
    ///
    /// `config` is guaranteed by [`from_config`](Self::from_config) to
    /// contain exactly the declared parameter keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`](descry_core::Error::Construction)
    /// when a parameter value is unusable (wrong JSON type, out of range).
    fn build(
        &self,
        config: &Map<String, Value>,
        type_label: &str,
        uuid: Uuid,
    ) -> Result<Box<dyn DescriptorElement>>;

    /// The default configuration derived from the schema.
    ///
    /// Contains only declared parameter keys — never `type_label` or
    /// `uuid`.
    fn default_config(&self) -> Map<String, Value> {
        self.schema().defaults()
    }

    /// Merge `overrides` onto the defaults and construct.
    ///
    /// Caller-supplied keys override defaults; omitted keys keep their
    /// declared default. This is the sole supported deserialization path;
    /// identity is always supplied here, at call time.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for undeclared override keys, or a
    /// construction error from [`build`](Self::build).
    fn from_config(
        &self,
        overrides: &Map<String, Value>,
        type_label: &str,
        uuid: Uuid,
    ) -> Result<Box<dyn DescriptorElement>> {
        let merged = self.schema().merge(overrides)?;
        self.build(&merged, type_label, uuid)
    }
}
