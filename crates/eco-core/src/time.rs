//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Month` counter starting at 0.  The
//! mapping to a calendar is held in `Calendar`:
//!
//!   year          = start_year + month / 12
//!   month_of_year = month % 12
//!
//! Using an integer month as the canonical time unit means the stopping
//! predicate (`month < horizon`) is exact and every team member evaluates it
//! to the same answer from the same counter.

use std::fmt;

use crate::{EcoError, EcoResult};

// ── Month ─────────────────────────────────────────────────────────────────────

/// An absolute month index since the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Month(pub u64);

impl Month {
    pub const ZERO: Month = Month(0);

    /// The month after `self`.
    #[inline]
    pub fn next(self) -> Month {
        Month(self.0 + 1)
    }

    /// Position within the year, `0..12`.
    #[inline]
    pub fn of_year(self) -> u32 {
        (self.0 % 12) as u32
    }
}

impl std::ops::Add<u64> for Month {
    type Output = Month;
    #[inline]
    fn add(self, rhs: u64) -> Month {
        Month(self.0 + rhs)
    }
}

impl std::ops::Sub for Month {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Month) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

// ── Calendar ──────────────────────────────────────────────────────────────────

/// Converts month indices into calendar years.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calendar {
    /// Calendar year of `Month(0)`.
    pub start_year: i32,
}

impl Calendar {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Calendar year containing `month`.
    #[inline]
    pub fn year(&self, month: Month) -> i32 {
        self.start_year + (month.0 / 12) as i32
    }

    /// The horizon that stops the run on the first month of `end_year`
    /// (exclusive).  Years before `start_year` give a zero horizon.
    pub fn horizon_for_year(&self, end_year: i32) -> Month {
        let years = (end_year - self.start_year).max(0) as u64;
        Month(years * 12)
    }

    /// `(year, month_of_year)` for `month`.
    #[inline]
    pub fn split(&self, month: Month) -> (i32, u32) {
        (self.year(month), month.of_year())
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Calendar::new(2023)
    }
}

// ── BarrierKind ───────────────────────────────────────────────────────────────

/// Which rendezvous implementation the driver builds for the team.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BarrierKind {
    /// Lock plus spin-waits.
    #[default]
    Spin,
    /// Lock plus condition variable; blocks instead of spinning.
    Condvar,
}

impl std::str::FromStr for BarrierKind {
    type Err = EcoError;

    fn from_str(s: &str) -> EcoResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "spin"    => Ok(BarrierKind::Spin),
            "condvar" => Ok(BarrierKind::Condvar),
            other     => Err(EcoError::Parse(format!("unknown barrier kind `{other}`"))),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the driver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of agents in the team.  Fixed for the run; must be ≥ 1 and
    /// must match the number of agents registered with the driver.
    pub team_size: usize,

    /// The run stops once the month counter reaches this value (exclusive).
    /// 72 months covers 2023–2028.
    pub horizon: Month,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Calendar year of month 0.
    pub start_year: i32,

    /// Rendezvous implementation used by the team.
    pub barrier: BarrierKind,

    /// If set, the driver gives up on a team whose barrier has not completed
    /// a round for this many milliseconds.
    pub watchdog_ms: Option<u64>,

    /// Record every barrier crossing per agent so phase alignment can be
    /// checked after the run.
    pub trace_phases: bool,
}

impl SimConfig {
    /// The month at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_month(&self) -> Month {
        self.horizon
    }

    /// Calendar for this run.
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.start_year)
    }

    /// Reject configurations that can never run.
    pub fn validate(&self) -> EcoResult<()> {
        if self.team_size == 0 {
            return Err(EcoError::Config("team size must be at least 1".into()));
        }
        if u32::try_from(self.team_size).is_err() {
            return Err(EcoError::Config(format!("team size {} is too large", self.team_size)));
        }
        if self.watchdog_ms == Some(0) {
            return Err(EcoError::Config("watchdog_ms must be positive".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            team_size:    3,
            horizon:      Month(72),
            seed:         0,
            start_year:   2023,
            barrier:      BarrierKind::Spin,
            watchdog_ms:  None,
            trace_phases: false,
        }
    }
}
