//! The `TickFunction` trait — the extension point for domain formulas.

use eco_core::{FieldId, RandomSource};
use eco_world::FieldWrite;

use crate::TickContext;

/// Pluggable next-state computation for one team member.
///
/// A tick function reads the previous tick's committed values through
/// [`TickContext`] and returns the writes this member will commit.  It must
/// not touch the shared world itself; the agent loop applies the returned
/// writes after the compute barrier.
///
/// # Ownership
///
/// [`writes`][Self::writes] lists every field the function may return a
/// write for.  The driver turns that list into exclusive commit ownership
/// and refuses to start a team in which two members claim the same field.
///
/// # Thread safety
///
/// Each member runs on its own thread, and tick functions of different
/// members run at the same time, so implementations must be
/// `Send + Sync`.  Randomness comes only from the `rng` argument.
///
/// # Example
///
/// ```rust,ignore
/// struct Grow { height: FieldId }
///
/// impl TickFunction for Grow {
///     fn writes(&self) -> Vec<FieldId> { vec![self.height] }
///
///     fn compute(&self, ctx: &TickContext<'_>, _rng: &mut dyn RandomSource) -> Vec<FieldWrite> {
///         vec![FieldWrite::float(self.height, ctx.snapshot.float(self.height) + 1.0)]
///     }
/// }
/// ```
pub trait TickFunction: Send + Sync + 'static {
    /// Short label used in logs and reports.
    fn name(&self) -> &str {
        "agent"
    }

    /// Fields this member owns.
    fn writes(&self) -> Vec<FieldId>;

    /// Compute the next values for this member's fields.
    fn compute(&self, ctx: &TickContext<'_>, rng: &mut dyn RandomSource) -> Vec<FieldWrite>;
}

/// A member that owns nothing and computes nothing.  The usual tick function
/// for a pure watcher.
pub struct IdleTick;

impl TickFunction for IdleTick {
    fn name(&self) -> &str {
        "idle"
    }

    fn writes(&self) -> Vec<FieldId> {
        vec![]
    }

    fn compute(&self, _ctx: &TickContext<'_>, _rng: &mut dyn RandomSource) -> Vec<FieldWrite> {
        vec![]
    }
}

/// A [`TickFunction`] built from a closure.  See [`from_fn`].
pub struct FnTick<F> {
    writes:  Vec<FieldId>,
    compute: F,
}

/// Wrap a closure as a tick function owning `writes`.
pub fn from_fn<F>(writes: Vec<FieldId>, compute: F) -> FnTick<F>
where
    F: Fn(&TickContext<'_>, &mut dyn RandomSource) -> Vec<FieldWrite> + Send + Sync + 'static,
{
    FnTick { writes, compute }
}

impl<F> TickFunction for FnTick<F>
where
    F: Fn(&TickContext<'_>, &mut dyn RandomSource) -> Vec<FieldWrite> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "fn"
    }

    fn writes(&self) -> Vec<FieldId> {
        self.writes.clone()
    }

    fn compute(&self, ctx: &TickContext<'_>, rng: &mut dyn RandomSource) -> Vec<FieldWrite> {
        (self.compute)(ctx, rng)
    }
}
