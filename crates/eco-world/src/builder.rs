//! Declaring fields and their starting values.

use eco_core::FieldId;

use crate::world::Slot;
use crate::{FieldKind, FieldSpec, Schema, SharedWorld, Value, WorldError, WorldResult};

/// Collects field declarations for a [`SharedWorld`].
///
/// ```rust
/// use eco_world::WorldBuilder;
///
/// let mut b = WorldBuilder::new();
/// let height  = b.add_float("height", 5.0).unwrap();
/// let rabbits = b.add_count("rabbits", 1).unwrap();
/// let world = b.build();
///
/// let snap = world.snapshot();
/// assert_eq!(snap.float(height), 5.0);
/// assert_eq!(snap.count(rabbits), 1);
/// ```
#[derive(Default)]
pub struct WorldBuilder {
    schema:  Schema,
    initial: Vec<Value>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a floating-point field with its starting value.
    pub fn add_float(&mut self, name: &str, initial: f64) -> WorldResult<FieldId> {
        self.add(name, Value::Float(initial))
    }

    /// Declare a population-count field with its starting value.
    pub fn add_count(&mut self, name: &str, initial: u64) -> WorldResult<FieldId> {
        self.add(name, Value::Count(initial))
    }

    /// Declare a field whose kind follows `initial`.
    pub fn add(&mut self, name: &str, initial: Value) -> WorldResult<FieldId> {
        if self.schema.contains_name(name) {
            return Err(WorldError::DuplicateField(name.to_owned()));
        }
        let id = FieldId::from_index(self.initial.len()).ok_or(WorldError::TooManyFields)?;
        let kind: FieldKind = initial.kind();
        self.schema.push(FieldSpec { name: name.to_owned(), kind }, id);
        self.initial.push(initial);
        Ok(id)
    }

    /// Freeze the schema.  The month counter starts at zero and no field has
    /// an owner yet.
    pub fn build(self) -> SharedWorld {
        let slots = self.initial.into_iter().map(Slot::new).collect();
        SharedWorld::from_parts(self.schema, slots)
    }
}
