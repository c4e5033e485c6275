//! `ReportObserver<W>` — bridges `Observer` to an `OutputWriter`.

use eco_agent::Observer;
use eco_core::{Calendar, Month};
use eco_world::WorldSnapshot;

use crate::row::MonthRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`Observer`] that writes every month to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `Observer` methods
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error] on the observer handed back in the
/// report.
pub struct ReportObserver<W: OutputWriter> {
    writer:         W,
    calendar:       Calendar,
    header_written: bool,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W, calendar: Calendar) -> Self {
        Self {
            writer,
            calendar,
            header_written: false,
            last_error:     None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> Observer for ReportObserver<W> {
    fn on_month(&mut self, snapshot: &WorldSnapshot) {
        if !self.header_written {
            self.header_written = true;
            let result = self.writer.write_header(snapshot.schema());
            self.store_err(result);
        }
        let row = MonthRow::from_snapshot(snapshot, &self.calendar);
        let result = self.writer.write_month(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_month: Month) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
