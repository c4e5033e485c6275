use eco_agent::{TickContext, TickFunction};
use eco_core::{FieldId, RandomSource};
use eco_world::FieldWrite;

/// Owns `rabbits`.  The population steps one toward the carrying capacity
/// (whole inches of grass), then loses whatever the foxes caught last tick.
pub struct Rabbits {
    pub rabbits: FieldId,
    pub height:  FieldId,
    /// `hunted` field of the fox agent, when foxes are in the team.
    pub hunted:  Option<FieldId>,
}

impl Rabbits {
    pub fn new(rabbits: FieldId, height: FieldId, hunted: Option<FieldId>) -> Self {
        Self { rabbits, height, hunted }
    }

    pub fn next_population(rabbits: u64, height: f64, hunted: u64) -> u64 {
        // `as` saturates: NaN and negatives give 0.
        let capacity = height.floor() as u64;
        let stepped = match rabbits.cmp(&capacity) {
            std::cmp::Ordering::Less    => rabbits + 1,
            std::cmp::Ordering::Greater => rabbits - 1,
            std::cmp::Ordering::Equal   => rabbits,
        };
        stepped.saturating_sub(hunted)
    }
}

impl TickFunction for Rabbits {
    fn name(&self) -> &str {
        "rabbits"
    }

    fn writes(&self) -> Vec<FieldId> {
        vec![self.rabbits]
    }

    fn compute(&self, ctx: &TickContext<'_>, _rng: &mut dyn RandomSource) -> Vec<FieldWrite> {
        let s = ctx.snapshot;
        let hunted = self.hunted.map_or(0, |f| s.count(f));
        let next = Self::next_population(s.count(self.rabbits), s.float(self.height), hunted);
        vec![FieldWrite::count(self.rabbits, next)]
    }
}
