//! Typed plugin registration.
//!
//! Implementations of a capability family are registered explicitly at
//! startup into a [`PluginRegistry`], keyed by factory name. The registry
//! is the population that discovery selects from: a manifest can only
//! export names that were registered, so every discovered implementation
//! is guaranteed (by the trait bound, at compile time) to satisfy the
//! family's capability.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use descry_core::{Error, Result};

/// Base trait for pluggable implementation factories.
///
/// Capability families define their own factory trait with this as a
/// supertrait; the registry and discovery engine only need the name and
/// the usability gate.
pub trait PluginFactory: Send + Sync {
    /// The implementation name, used as the registration key.
    fn name(&self) -> &str;

    /// Whether this implementation is usable in the current environment
    /// (e.g. its runtime dependencies are present). Unusable factories are
    /// skipped by discovery with a warning.
    fn is_usable(&self) -> bool {
        true
    }
}

/// Explicit registration table for one capability family.
///
/// `F` is the family's factory trait object type, e.g.
/// `PluginRegistry<dyn ElementFactory>`.
pub struct PluginRegistry<F: ?Sized> {
    family: String,
    factories: BTreeMap<String, Arc<F>>,
}

// Manual impls: the derived versions would require `F: Clone`/`F: Debug`,
// which trait objects don't provide.
impl<F: ?Sized> Clone for PluginRegistry<F> {
    fn clone(&self) -> Self {
        Self {
            family: self.family.clone(),
            factories: self.factories.clone(),
        }
    }
}

impl<F: ?Sized> fmt::Debug for PluginRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("family", &self.family)
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<F: PluginFactory + ?Sized> PluginRegistry<F> {
    /// Create an empty registry for the given family name.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            factories: BTreeMap::new(),
        }
    }

    /// The capability family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Register a factory under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registry`] if the name is already registered, or
    /// if it equals the family name itself — the family name denotes the
    /// abstract capability, never a concrete implementation.
    pub fn register(&mut self, factory: Arc<F>) -> Result<()> {
        let name = factory.name().to_string();
        if name == self.family {
            return Err(Error::registry(format!(
                "'{name}' is the family name and cannot be registered as an implementation"
            )));
        }
        if self.factories.contains_key(&name) {
            return Err(Error::registry(format!(
                "'{name}' is already registered in family '{}'",
                self.family
            )));
        }
        log::debug!("registered '{name}' in family '{}'", self.family);
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Look up a registered factory by name.
    pub fn get(&self, name: &str) -> Option<Arc<F>> {
        self.factories.get(name).cloned()
    }

    /// Registered names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Remove all registrations.
    pub fn clear(&mut self) {
        self.factories.clear();
    }
}
