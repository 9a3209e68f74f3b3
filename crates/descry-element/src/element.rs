//! The descriptor element contract.
//!
//! A descriptor element is an identified numeric feature vector: a fixed
//! `(type_label, uuid)` identity plus a mutable, possibly-absent `f32`
//! vector payload. Concrete implementations decide how the vector is
//! physically stored; this module only defines identity, equality,
//! hashing, and the presence/read/overwrite operations.
//!
//! # Equality and hashing
//!
//! Hashing combines `type_label` and `uuid`. Equality compares the type
//! label and the vector contents — the uuid is deliberately *not* part of
//! equality. This asymmetry is part of the contract: two elements with the
//! same type and elementwise-equal vectors are equal even when they
//! describe different entities, while two same-identity elements with
//! different vectors are unequal.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Abstract descriptor vector container.
///
/// Implementations may cache or lazily load the vector; `vector()`
/// returning `None` is the one and only "no vector stored" signal and is
/// never an error. Mutation follows last-writer-wins; callers sharing an
/// element across threads serialize `set_vector` themselves.
pub trait DescriptorElement: Send + Sync {
    /// Label of the generation process that produced (or will produce)
    /// this vector. Fixed at construction.
    fn type_label(&self) -> &str;

    /// Unique id of the entity this vector describes. Fixed at
    /// construction.
    fn uuid(&self) -> Uuid;

    /// Whether a vector is currently stored. Distinguishes "no vector"
    /// from a stored-but-empty vector.
    fn has_vector(&self) -> bool;

    /// The stored vector, or `None` when nothing is stored.
    fn vector(&self) -> Option<Vec<f32>>;

    /// Unconditionally overwrite any stored vector.
    fn set_vector(&mut self, vector: Vec<f32>);

    /// The element's current construction configuration, suitable for
    /// [`ElementFactory::from_config`](crate::ElementFactory::from_config).
    /// Never contains identity keys.
    fn config(&self) -> Map<String, Value>;

    /// The hashing identity of this element.
    fn identity(&self) -> ElementIdentity {
        ElementIdentity::new(self.type_label(), self.uuid())
    }
}

/// The `(type_label, uuid)` pair that identifies an element for hashing.
///
/// Use this as a map key when collecting elements; unlike element
/// equality, identity equality does include the uuid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementIdentity {
    /// Generation-family label.
    pub type_label: String,

    /// Described-entity id.
    pub uuid: Uuid,
}

impl ElementIdentity {
    /// Create an identity value.
    pub fn new(type_label: impl Into<String>, uuid: Uuid) -> Self {
        Self {
            type_label: type_label.into(),
            uuid,
        }
    }
}

impl fmt::Display for ElementIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_label, self.uuid)
    }
}

/// Elementwise vector equality: same presence, same length, every
/// corresponding element equal.
///
/// `None`/`None` is equal; present-but-empty differs from absent. `f32`
/// comparison is used directly, so NaN components never compare equal.
pub fn vectors_equal(a: Option<&[f32]>, b: Option<&[f32]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y),
        _ => false,
    }
}

/// Element equality: equal type labels AND elementwise-equal vectors.
/// The uuid does not participate.
pub fn elements_equal(a: &dyn DescriptorElement, b: &dyn DescriptorElement) -> bool {
    a.type_label() == b.type_label()
        && vectors_equal(a.vector().as_deref(), b.vector().as_deref())
}

impl PartialEq for dyn DescriptorElement + '_ {
    fn eq(&self, other: &Self) -> bool {
        elements_equal(self, other)
    }
}

impl Hash for dyn DescriptorElement + '_ {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_label().hash(state);
        self.uuid().hash(state);
    }
}

impl fmt::Display for dyn DescriptorElement + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DescriptorElement{{type: {}, uuid: {}}}",
            self.type_label(),
            self.uuid()
        )
    }
}
