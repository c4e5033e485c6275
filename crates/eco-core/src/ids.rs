//! Typed identifiers for team members and world fields.
//!
//! Both ids are dense indices: `AgentId(k)` is the k-th member registered
//! with the driver (and the k-th barrier slot), `FieldId(k)` is the k-th
//! variable declared in the world schema.  They are `Copy + Ord + Hash` so
//! they work as map keys and in sorted collections.

use std::fmt;

/// Generate a typed id wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Build an id from a `Vec` position.
            ///
            /// Returns `None` when `n` does not fit the inner integer.
            #[inline]
            pub fn from_index(n: usize) -> Option<$name> {
                <$inner>::try_from(n).ok().map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// A member of the team.  Doubles as the member's barrier slot.
    pub struct AgentId(u32);
}

typed_id! {
    /// A variable in the shared world schema.
    /// `u16` is plenty: a world holds a handful of environmental variables.
    pub struct FieldId(u16);
}
