use eco_agent::{TickContext, TickFunction};
use eco_core::{FieldId, RandomSource};
use eco_world::FieldWrite;

use crate::EcologyParams;

/// Owns `foxes` and `hunted`.
///
/// Each tick every fox makes `hunt_attempts` tries, each succeeding with
/// `hunt_chance`; the catch is capped by the rabbits alive in the snapshot
/// and committed as `hunted`.  The population reacts to the *previous*
/// catch: one more fox when every fox ate, one fewer when none did.
/// Extinct foxes stay extinct.
pub struct Foxes {
    pub foxes:   FieldId,
    pub hunted:  FieldId,
    pub rabbits: FieldId,
    params:      EcologyParams,
}

impl Foxes {
    pub fn new(foxes: FieldId, hunted: FieldId, rabbits: FieldId, params: EcologyParams) -> Self {
        Self { foxes, hunted, rabbits, params }
    }

    pub fn next_population(&self, foxes: u64, last_hunted: u64) -> u64 {
        if foxes == 0 {
            0
        } else if last_hunted >= foxes {
            foxes.saturating_add(1).min(self.params.max_foxes)
        } else if last_hunted == 0 {
            foxes - 1
        } else {
            foxes
        }
    }

    /// Rabbits caught this month.  Stops drawing once every rabbit is
    /// caught.
    pub fn hunt(&self, foxes: u64, rabbits: u64, rng: &mut dyn RandomSource) -> u64 {
        let tries = foxes.saturating_mul(u64::from(self.params.hunt_attempts));
        let mut caught = 0;
        for _ in 0..tries {
            if caught == rabbits {
                break;
            }
            if rng.chance(self.params.hunt_chance) {
                caught += 1;
            }
        }
        caught
    }
}

impl TickFunction for Foxes {
    fn name(&self) -> &str {
        "foxes"
    }

    fn writes(&self) -> Vec<FieldId> {
        vec![self.foxes, self.hunted]
    }

    fn compute(&self, ctx: &TickContext<'_>, rng: &mut dyn RandomSource) -> Vec<FieldWrite> {
        let s = ctx.snapshot;
        let foxes = s.count(self.foxes);
        let hunted = self.hunt(foxes, s.count(self.rabbits), rng);
        vec![
            FieldWrite::count(self.foxes, self.next_population(foxes, s.count(self.hunted))),
            FieldWrite::count(self.hunted, hunted),
        ]
    }
}
