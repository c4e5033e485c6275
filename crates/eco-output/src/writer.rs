//! The `OutputWriter` trait implemented by all backend writers.

use eco_world::Schema;

use crate::{MonthRow, OutputResult};

/// A sink for monthly world state.
///
/// Called from the watcher thread only, during the observation phase.
/// Errors are stored by [`ReportObserver`][crate::ReportObserver] and
/// retrieved with its `take_error`, so a failing disk never stalls the team.
pub trait OutputWriter: Send + 'static {
    /// Called once, before the first row, with the world's field layout.
    fn write_header(&mut self, schema: &Schema) -> OutputResult<()>;

    /// Write one month.
    fn write_month(&mut self, row: &MonthRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
