//! Descriptor element contract and element plugin discovery.
//!
//! A descriptor element is an identified numeric feature vector produced
//! by some upstream generation process. This crate defines:
//!
//! - the [`DescriptorElement`] value contract (identity, equality,
//!   hashing, vector presence/read/overwrite),
//! - the [`ElementFactory`] configuration round-trip (declared schema →
//!   defaults → merged overrides → construction, with identity supplied
//!   at call time),
//! - the element capability family's discovery wiring on top of
//!   `descry-plugin`, and
//! - [`MemoryElement`], the always-available in-memory implementation.
//!
//! Storage-backed implementations live in their own crates; they
//! implement [`ElementFactory`], get registered into an
//! [`ElementRegistry`], and are enabled per deployment through plugin
//! manifests.
//!
//! # Example
//!
//! ```
//! use descry_element::{default_registry, DescriptorElement, ElementFactory};
//! use serde_json::Map;
//! use uuid::Uuid;
//!
//! let registry = default_registry()?;
//! let factory = registry.get("memory").expect("built-in");
//!
//! let mut element = factory.from_config(&Map::new(), "cnn", Uuid::new_v4())?;
//! assert!(!element.has_vector());
//!
//! element.set_vector(vec![0.1, 0.2, 0.3]);
//! assert_eq!(element.vector(), Some(vec![0.1, 0.2, 0.3]));
//! # Ok::<(), descry_core::Error>(())
//! ```

pub mod discover;
pub mod element;
pub mod factory;
pub mod memory;

// Re-exports — contract
pub use element::{DescriptorElement, ElementIdentity, elements_equal, vectors_equal};

// Re-exports — configuration round-trip
pub use factory::ElementFactory;

// Re-exports — built-in implementation
pub use memory::{MemoryElement, MemoryElementFactory};

// Re-exports — discovery wiring
pub use discover::{
    ELEMENT_EXPORT_KEY, ELEMENT_FAMILY, ELEMENT_PATH_ENV, ElementRegistry, default_registry,
    element_factories, element_spec,
};
