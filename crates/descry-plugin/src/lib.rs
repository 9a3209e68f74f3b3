//! Generic plugin registry and discovery for Descry.
//!
//! This crate provides the extension mechanism shared by all Descry
//! capability families: an explicit, typed registration table plus a
//! manifest-driven discovery engine that decides which registered
//! implementations are enabled at a given set of locations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       descry-plugin                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PluginFactory trait (name + usability gate)                │
//! │  PluginRegistry<F>  (family's name → Arc<F> table)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  DiscoverySpec (family, base dir, env var, export key)      │
//! │  DiscoveryEngine (manifest scan, validate, aggregate)       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Manifest / ExportSpec (JSON export declarations)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations are registered in code at startup; manifests on disk
//! only *select* among registered names (opt-out, single export, list
//! export, or module-name fallback). Nothing is ever loaded or executed
//! from the scanned directories, and a malformed manifest costs exactly
//! one warning.

pub mod discover;
pub mod manifest;
pub mod registry;

// Re-exports — discovery
pub use discover::{DiscoveryEngine, DiscoverySpec};

// Re-exports — manifests
pub use manifest::{DIR_MANIFEST, ExportSpec, Manifest};

// Re-exports — registration
pub use registry::{PluginFactory, PluginRegistry};
