//! `eco-output` — what the watcher does with each month.
//!
//! | Type                  | Role                                                      |
//! |-----------------------|-----------------------------------------------------------|
//! | [`OutputWriter`]      | backend trait: header, one row per month, finish          |
//! | [`CsvWriter`]         | writes `ecosystem.csv`                                    |
//! | [`ReportObserver`]    | adapts any `OutputWriter` to `eco_agent::Observer`        |
//! | [`LogObserver`]       | one `tracing` event per month                             |
//!
//! Observers compose as tuples, so a run can log and write at once:
//!
//! ```rust,ignore
//! use eco_output::{CsvWriter, LogObserver, ReportObserver};
//!
//! let csv = ReportObserver::new(CsvWriter::new(Path::new("./out"))?, config.calendar());
//! let observer = (LogObserver::new(config.calendar()), csv);
//! let mut report = SimBuilder::new(config, world, observer).build()?.run()?;
//! if let Some(e) = report.observer.1.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod log;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use log::LogObserver;
pub use observer::ReportObserver;
pub use row::MonthRow;
pub use writer::OutputWriter;
