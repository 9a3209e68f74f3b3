//! In-memory descriptor element.
//!
//! The always-available reference implementation: the vector lives
//! directly in the value, nothing is cached or persisted. Useful for
//! tests and for pipelines that never touch storage.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};
use uuid::Uuid;

use descry_core::{ConfigSchema, Result};
use descry_plugin::PluginFactory;

use crate::element::{DescriptorElement, elements_equal};
use crate::factory::ElementFactory;

/// Descriptor element storing its vector in memory.
#[derive(Debug, Clone)]
pub struct MemoryElement {
    type_label: String,
    uuid: Uuid,
    vector: Option<Vec<f32>>,
}

impl MemoryElement {
    /// Create an element with no stored vector.
    pub fn new(type_label: impl Into<String>, uuid: Uuid) -> Self {
        Self {
            type_label: type_label.into(),
            uuid,
            vector: None,
        }
    }
}

impl DescriptorElement for MemoryElement {
    fn type_label(&self) -> &str {
        &self.type_label
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn has_vector(&self) -> bool {
        self.vector.is_some()
    }

    fn vector(&self) -> Option<Vec<f32>> {
        self.vector.clone()
    }

    fn set_vector(&mut self, vector: Vec<f32>) {
        self.vector = Some(vector);
    }

    fn config(&self) -> Map<String, Value> {
        Map::new()
    }
}

// Concrete comparisons follow the contract's semantics exactly.
impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        elements_equal(self, other)
    }
}

impl Hash for MemoryElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_label.hash(state);
        self.uuid.hash(state);
    }
}

impl fmt::Display for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MemoryElement{{type: {}, uuid: {}}}",
            self.type_label, self.uuid
        )
    }
}

/// Factory for [`MemoryElement`]. Registered as `"memory"`; takes no
/// configuration.
#[derive(Debug, Default)]
pub struct MemoryElementFactory;

impl PluginFactory for MemoryElementFactory {
    fn name(&self) -> &str {
        "memory"
    }
}

impl ElementFactory for MemoryElementFactory {
    fn schema(&self) -> ConfigSchema {
        ConfigSchema::empty()
    }

    fn build(
        &self,
        _config: &Map<String, Value>,
        type_label: &str,
        uuid: Uuid,
    ) -> Result<Box<dyn DescriptorElement>> {
        Ok(Box::new(MemoryElement::new(type_label, uuid)))
    }
}
