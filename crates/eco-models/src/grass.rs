use eco_agent::{TickContext, TickFunction};
use eco_core::{FieldId, RandomSource};
use eco_world::FieldWrite;

use crate::EcologyParams;

/// Owns `height`.  Grows by a bell-curve weather factor and is eaten down
/// by the rabbits, never below zero.
pub struct RyeGrass {
    pub height:  FieldId,
    pub temp:    FieldId,
    pub precip:  FieldId,
    pub rabbits: FieldId,
    params:      EcologyParams,
}

impl RyeGrass {
    pub fn new(height: FieldId, temp: FieldId, precip: FieldId, rabbits: FieldId, params: EcologyParams) -> Self {
        Self { height, temp, precip, rabbits, params }
    }

    /// `exp(-((x - mid) / tolerance)²)`: 1 at the ideal value, falling off
    /// on both sides.
    pub fn factor(x: f64, mid: f64, tolerance: f64) -> f64 {
        let d = (x - mid) / tolerance;
        (-(d * d)).exp()
    }

    pub fn next_height(&self, height: f64, temp: f64, precip: f64, rabbits: u64) -> f64 {
        let p = &self.params;
        let growth = Self::factor(temp, p.mid_temp, p.tolerance)
            * Self::factor(precip, p.mid_precip, p.tolerance)
            * p.grows_per_month;
        (height + growth - rabbits as f64 * p.eats_per_month).max(0.0)
    }
}

impl TickFunction for RyeGrass {
    fn name(&self) -> &str {
        "rye-grass"
    }

    fn writes(&self) -> Vec<FieldId> {
        vec![self.height]
    }

    fn compute(&self, ctx: &TickContext<'_>, _rng: &mut dyn RandomSource) -> Vec<FieldWrite> {
        let s = ctx.snapshot;
        let next = self.next_height(
            s.float(self.height),
            s.float(self.temp),
            s.float(self.precip),
            s.count(self.rabbits),
        );
        vec![FieldWrite::float(self.height, next)]
    }
}
