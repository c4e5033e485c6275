//! Field values and the writes that carry an agent's next state.

use std::fmt;

use eco_core::FieldId;

/// Storage type of a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Environmental quantity (height, temperature, …).
    Float,
    /// Non-negative population count.
    Count,
}

/// A field value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    Float(f64),
    Count(u64),
}

impl Value {
    #[inline]
    pub fn kind(self) -> FieldKind {
        match self {
            Value::Float(_) => FieldKind::Float,
            Value::Count(_) => FieldKind::Count,
        }
    }

    /// The value as a float; counts convert exactly up to 2^53.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Float(v) => v,
            Value::Count(n) => n as f64,
        }
    }

    /// The value as a count; floats are truncated and clamped at zero.
    #[inline]
    pub fn as_count(self) -> u64 {
        match self {
            Value::Float(v) => v.max(0.0) as u64,
            Value::Count(n) => n,
        }
    }

    /// Raw bits for slot storage.
    #[inline]
    pub(crate) fn to_bits(self) -> u64 {
        match self {
            Value::Float(v) => v.to_bits(),
            Value::Count(n) => n,
        }
    }

    #[inline]
    pub(crate) fn from_bits(kind: FieldKind, bits: u64) -> Value {
        match kind {
            FieldKind::Float => Value::Float(f64::from_bits(bits)),
            FieldKind::Count => Value::Count(bits),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{v:.3}"),
            Value::Count(n) => write!(f, "{n}"),
        }
    }
}

/// One private "next value" produced in the compute phase and applied to
/// the world in the commit phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldWrite {
    pub field: FieldId,
    pub value: Value,
}

impl FieldWrite {
    #[inline]
    pub fn float(field: FieldId, value: f64) -> Self {
        Self { field, value: Value::Float(value) }
    }

    #[inline]
    pub fn count(field: FieldId, value: u64) -> Self {
        Self { field, value: Value::Count(value) }
    }
}
