//! Owned, read-only copy of the world taken at the start of a compute phase.

use std::sync::Arc;

use eco_core::{FieldId, Month};

use crate::{Schema, Value};

/// A frozen copy of [`SharedWorld`][crate::SharedWorld].
///
/// Agents take one snapshot per tick and read only from it during compute,
/// so nothing committed later in the same tick can leak into their
/// next-state calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    month:   Month,
    schema:  Arc<Schema>,
    values:  Vec<Value>,
    written: Vec<Option<Month>>,
}

impl WorldSnapshot {
    pub(crate) fn new(
        month:   Month,
        schema:  Arc<Schema>,
        values:  Vec<Value>,
        written: Vec<Option<Month>>,
    ) -> Self {
        Self { month, schema, values, written }
    }

    /// Month counter at the time of the snapshot.
    #[inline]
    pub fn month(&self) -> Month {
        self.month
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// # Panics
    /// Panics if `field` is not part of this world's schema.  Inside a tick
    /// function the agent loop contains the panic; elsewhere use
    /// [`try_get`][Self::try_get].
    #[inline]
    pub fn get(&self, field: FieldId) -> Value {
        self.values[field.index()]
    }

    /// `None` if `field` belongs to some other world.
    #[inline]
    pub fn try_get(&self, field: FieldId) -> Option<Value> {
        self.values.get(field.index()).copied()
    }

    #[inline]
    pub fn float(&self, field: FieldId) -> f64 {
        self.get(field).as_f64()
    }

    #[inline]
    pub fn count(&self, field: FieldId) -> u64 {
        self.get(field).as_count()
    }

    pub fn by_name(&self, name: &str) -> Option<Value> {
        self.schema.id_of(name).map(|id| self.get(id))
    }

    /// Month of the tick that committed the value, or `None` for an
    /// initial value.
    pub fn written_in(&self, field: FieldId) -> Option<Month> {
        self.written.get(field.index()).copied().flatten()
    }

    /// Values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.schema.names().zip(self.values.iter().copied())
    }
}
