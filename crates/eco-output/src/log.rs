use std::fmt;

use eco_agent::Observer;
use eco_core::{Calendar, Month};
use eco_world::WorldSnapshot;
use tracing::info;

/// Logs each month at `info`: calendar position plus every field as
/// `name=value`.
pub struct LogObserver {
    calendar: Calendar,
    months:   u64,
}

impl LogObserver {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar, months: 0 }
    }

    /// Months logged so far.
    pub fn months(&self) -> u64 {
        self.months
    }
}

impl Observer for LogObserver {
    fn on_month(&mut self, snapshot: &WorldSnapshot) {
        let (year, month_of_year) = self.calendar.split(snapshot.month());
        info!(
            month = snapshot.month().0,
            year,
            month_of_year,
            state = %Fields(snapshot),
            "month committed"
        );
        self.months += 1;
    }

    fn on_sim_end(&mut self, final_month: Month) {
        info!(final_month = final_month.0, months = self.months, "simulation finished");
    }
}

/// `temp=41.203 precip=13.118 …`
struct Fields<'a>(&'a WorldSnapshot);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
