//! Field declarations shared by the world and its snapshots.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use eco_core::FieldId;

use crate::FieldKind;

/// Name and storage type of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// The ordered list of fields in a world.  Immutable once the world is built.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    index:  HashMap<String, FieldId>,
}

impl Schema {
    pub(crate) fn push(&mut self, spec: FieldSpec, id: FieldId) {
        self.index.insert(spec.name.clone(), id);
        self.fields.push(spec);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldSpec> {
        self.fields.get(field.index())
    }

    /// Look a field up by name.
    pub fn id_of(&self, name: &str) -> Option<FieldId> {
        self.index.get(name).copied()
    }

    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// `(FieldId, &FieldSpec)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldSpec)> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, spec)| (FieldId(i as u16), spec))
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}
