//! Discovery wiring for the descriptor element family.
//!
//! The family's fixed discovery parameters live here, along with the
//! convenience entry point that answers "which element implementations
//! are known right now?".

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use descry_core::Result;
use descry_plugin::{DiscoveryEngine, DiscoverySpec, PluginRegistry};

use crate::factory::ElementFactory;
use crate::memory::MemoryElementFactory;

/// Capability family name for descriptor elements.
pub const ELEMENT_FAMILY: &str = "descriptor-element";

/// Environment variable naming additional element plugin locations.
pub const ELEMENT_PATH_ENV: &str = "DESCRY_ELEMENT_PATH";

/// Manifest key holding element export declarations.
pub const ELEMENT_EXPORT_KEY: &str = "descriptor_element";

/// Registration table for element factories.
pub type ElementRegistry = PluginRegistry<dyn ElementFactory>;

/// A registry pre-populated with the built-in implementations.
///
/// # Errors
///
/// Returns a registry error only if a built-in registration conflicts,
/// which would be a bug.
pub fn default_registry() -> Result<ElementRegistry> {
    let mut registry = ElementRegistry::new(ELEMENT_FAMILY);
    registry.register(Arc::new(MemoryElementFactory))?;
    Ok(registry)
}

/// The element family's discovery spec for a given plugin directory.
pub fn element_spec(base_dir: impl AsRef<Path>) -> DiscoverySpec {
    DiscoverySpec::new(
        ELEMENT_FAMILY,
        base_dir.as_ref(),
        ELEMENT_PATH_ENV,
        ELEMENT_EXPORT_KEY,
    )
}

/// Discover the enabled element implementations under `base_dir` (plus
/// any locations named by [`ELEMENT_PATH_ENV`]).
///
/// Returns a name → factory map; an empty map means no implementations
/// are enabled there. Instantiate via
/// [`ElementFactory::from_config`](crate::ElementFactory::from_config).
pub fn element_factories(
    engine: &mut DiscoveryEngine,
    registry: &ElementRegistry,
    base_dir: impl AsRef<Path>,
) -> BTreeMap<String, Arc<dyn ElementFactory>> {
    engine.discover(&element_spec(base_dir), registry)
}
