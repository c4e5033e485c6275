//! Seasonal weather with uniform noise.

use eco_agent::{TickContext, TickFunction};
use eco_core::{FieldId, Month, RandomSource};
use eco_world::FieldWrite;

use crate::EcologyParams;

/// Owns `temp` and `precip`.  In the tick for month m it computes the
/// weather of month m+1, so the grass in month m+1 grows under it.
pub struct Weather {
    pub temp:   FieldId,
    pub precip: FieldId,
    params:     EcologyParams,
}

impl Weather {
    pub fn new(temp: FieldId, precip: FieldId, params: EcologyParams) -> Self {
        Self { temp, precip, params }
    }

    /// Temperature and precipitation for `month`.
    ///
    /// The season peaks mid-month: month-of-year `k` sits at angle
    /// `30·k + 15` degrees.  Precipitation never goes below zero.
    pub fn sample(params: &EcologyParams, month: Month, rng: &mut dyn RandomSource) -> (f64, f64) {
        let ang = (30.0 * f64::from(month.of_year()) + 15.0).to_radians();

        let temp = params.avg_temp - params.amp_temp * ang.cos()
            + rng.uniform(-params.random_temp, params.random_temp);

        let precip = params.avg_precip + params.amp_precip * ang.sin()
            + rng.uniform(-params.random_precip, params.random_precip);

        (temp, precip.max(0.0))
    }
}

impl TickFunction for Weather {
    fn name(&self) -> &str {
        "weather"
    }

    fn writes(&self) -> Vec<FieldId> {
        vec![self.temp, self.precip]
    }

    fn compute(&self, ctx: &TickContext<'_>, rng: &mut dyn RandomSource) -> Vec<FieldWrite> {
        let (temp, precip) = Self::sample(&self.params, ctx.month().next(), rng);
        vec![
            FieldWrite::float(self.temp, temp),
            FieldWrite::float(self.precip, precip),
        ]
    }
}
