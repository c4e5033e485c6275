//! Plain data row written by output backends.

use eco_core::Calendar;
use eco_world::{Value, WorldSnapshot};

/// The world after one tick's commits, tagged with its calendar position.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month:         u64,
    pub year:          i32,
    /// 0 = January.
    pub month_of_year: u32,
    /// One value per schema field, in schema order.
    pub values:        Vec<Value>,
}

impl MonthRow {
    pub fn from_snapshot(snapshot: &WorldSnapshot, calendar: &Calendar) -> Self {
        let (year, month_of_year) = calendar.split(snapshot.month());
        Self {
            month: snapshot.month().0,
            year,
            month_of_year,
            values: snapshot.values().to_vec(),
        }
    }
}
