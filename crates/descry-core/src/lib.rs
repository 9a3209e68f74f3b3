//! Descry Core — shared error types and configuration schemas.
//!
//! This crate provides the foundational types used across all Descry
//! crates. It has no internal Descry dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: Declared configuration schemas and merge semantics

pub mod config;
pub mod error;

// Re-export key types at crate root for convenience
pub use config::{ConfigParam, ConfigSchema, ConfigSchemaBuilder, RESERVED_KEYS};
pub use error::{Error, Result};
