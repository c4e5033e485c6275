//! Ecological constants and the starting state of the meadow.

use crate::{ModelError, ModelResult};

/// Upper bound on [`EcologyParams::hunt_attempts`].
pub const MAX_HUNT_ATTEMPTS: u32 = 1_000;

/// Upper bound on [`EcologyParams::max_foxes`].
pub const FOX_CEILING: u64 = 100_000;

// ── EcologyParams ─────────────────────────────────────────────────────────────

/// Every constant the tick functions use.
///
/// Defaults reproduce the classic rye-grass/rabbit exercise; the predator
/// block is only read when foxes are part of the team.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EcologyParams {
    /// Inches of grass growth per month under ideal weather.
    pub grows_per_month: f64,
    /// Inches of grass one rabbit eats per month.
    pub eats_per_month:  f64,

    pub avg_precip:    f64,
    pub amp_precip:    f64,
    /// Uniform noise added to precipitation, ±.
    pub random_precip: f64,

    pub avg_temp:    f64,
    pub amp_temp:    f64,
    /// Uniform noise added to temperature, ±.
    pub random_temp: f64,

    /// Temperature at which grass grows fastest.
    pub mid_temp:   f64,
    /// Precipitation at which grass grows fastest.
    pub mid_precip: f64,
    /// Width of the bell curves around `mid_temp` / `mid_precip`.
    pub tolerance:  f64,

    /// Hunts each fox makes per month.
    pub hunt_attempts: u32,
    /// Probability that one hunt catches a rabbit.
    pub hunt_chance:   f64,
    pub max_foxes:     u64,
}

impl Default for EcologyParams {
    fn default() -> Self {
        Self {
            grows_per_month: 20.0,
            eats_per_month:  1.0,
            avg_precip:      12.0,
            amp_precip:      4.0,
            random_precip:   2.0,
            avg_temp:        60.0,
            amp_temp:        20.0,
            random_temp:     10.0,
            mid_temp:        60.0,
            mid_precip:      14.0,
            tolerance:       10.0,
            hunt_attempts:   2,
            hunt_chance:     0.25,
            max_foxes:       8,
        }
    }
}

impl EcologyParams {
    /// Reject values the formulas cannot use.
    pub fn validate(&self) -> ModelResult<()> {
        let non_negative = [
            ("grows_per_month", self.grows_per_month),
            ("eats_per_month",  self.eats_per_month),
            ("amp_precip",      self.amp_precip),
            ("random_precip",   self.random_precip),
            ("amp_temp",        self.amp_temp),
            ("random_temp",     self.random_temp),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidParam { name, value });
            }
        }
        for (name, value) in [
            ("avg_precip", self.avg_precip),
            ("avg_temp",   self.avg_temp),
            ("mid_temp",   self.mid_temp),
            ("mid_precip", self.mid_precip),
        ] {
            if !value.is_finite() {
                return Err(ModelError::InvalidParam { name, value });
            }
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ModelError::InvalidParam { name: "tolerance", value: self.tolerance });
        }
        if self.hunt_attempts > MAX_HUNT_ATTEMPTS {
            return Err(ModelError::InvalidParam {
                name:  "hunt_attempts",
                value: f64::from(self.hunt_attempts),
            });
        }
        if self.max_foxes > FOX_CEILING {
            return Err(ModelError::InvalidParam { name: "max_foxes", value: self.max_foxes as f64 });
        }
        if !(0.0..=1.0).contains(&self.hunt_chance) {
            return Err(ModelError::InvalidParam { name: "hunt_chance", value: self.hunt_chance });
        }
        Ok(())
    }
}

// ── InitialState ──────────────────────────────────────────────────────────────

/// World values at month 0.  Weather is not listed: the first month's
/// weather is sampled from the run seed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InitialState {
    /// Grass height in inches.
    pub height:    f64,
    pub rabbits:   u64,
    /// Include the fox agent and its `foxes` / `hunted` fields.
    pub predators: bool,
    pub foxes:     u64,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            height:    5.0,
            rabbits:   1,
            predators: true,
            foxes:     1,
        }
    }
}

impl InitialState {
    pub fn validate(&self, params: &EcologyParams) -> ModelResult<()> {
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(ModelError::InvalidInitial { name: "height", value: self.height });
        }
        if self.predators && self.foxes > params.max_foxes {
            return Err(ModelError::InvalidInitial { name: "foxes", value: self.foxes as f64 });
        }
        Ok(())
    }
}
