//! Integration tests for eco-output.

use eco_world::{SharedWorld, WorldBuilder};

/// `height` (float) and `rabbits` (count), clock owned by agent 0.
fn small_world() -> SharedWorld {
    let mut b = WorldBuilder::new();
    b.add_float("height", 5.0).unwrap();
    b.add_count("rabbits", 1).unwrap();
    let mut world = b.build();
    world.assign_clock(eco_core::AgentId(0)).unwrap();
    world
}

#[cfg(test)]
mod csv_tests {
    use eco_core::Calendar;
    use eco_world::Value;
    use tempfile::TempDir;

    use super::small_world;
    use crate::csv::{CsvWriter, FILE_NAME};
    use crate::row::MonthRow;
    use crate::writer::OutputWriter;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_file_created() {
        let dir = tmp();
        let w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(FILE_NAME).exists());
        assert_eq!(w.path(), dir.path().join("ecosystem.csv"));
    }

    #[test]
    fn csv_header_lists_calendar_then_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_header(small_world().schema()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(FILE_NAME)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["month", "year", "month_of_year", "height", "rabbits"]);
    }

    #[test]
    fn csv_month_rows() {
        let dir = tmp();
        let world = small_world();
        let calendar = Calendar::new(2023);
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_header(world.schema()).unwrap();
        for _ in 0..14 {
            w.write_month(&MonthRow::from_snapshot(&world.snapshot(), &calendar)).unwrap();
            world.advance_month(eco_core::AgentId(0)).unwrap();
        }
        w.finish().unwrap();
        assert_eq!(w.rows(), 14);

        let mut rdr = csv::Reader::from_path(dir.path().join(FILE_NAME)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 14);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][1], "2023");
        assert_eq!(&rows[0][3], "5");
        assert_eq!(&rows[0][4], "1");
        assert_eq!(&rows[13][0], "13");
        assert_eq!(&rows[13][1], "2024"); // month 13 = February 2024
        assert_eq!(&rows[13][2], "1");
    }

    #[test]
    fn csv_floats_keep_full_precision() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = MonthRow { month: 0, year: 2023, month_of_year: 0, values: vec![Value::Float(0.123456789)] };
        w.write_month(&row).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(dir.path().join(FILE_NAME))
            .unwrap();
        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(&rec[3], "0.123456789");
    }

    #[test]
    fn csv_rejects_wrong_width() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_header(small_world().schema()).unwrap();
        let row = MonthRow { month: 0, year: 2023, month_of_year: 0, values: vec![Value::Count(1)] };
        assert!(matches!(w.write_month(&row), Err(OutputError::RowWidth { expected: 2, got: 1 })));
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use eco_agent::Observer;
    use eco_core::{Calendar, Month};
    use eco_world::Schema;

    use super::small_world;
    use crate::{MonthRow, OutputError, OutputResult, OutputWriter, ReportObserver};

    /// Records calls; fails every write after `fail_after` rows.
    #[derive(Default)]
    struct Recorder {
        headers:    usize,
        rows:       Vec<MonthRow>,
        finishes:   usize,
        fail_after: Option<usize>,
    }

    impl OutputWriter for Recorder {
        fn write_header(&mut self, _schema: &Schema) -> OutputResult<()> {
            self.headers += 1;
            Ok(())
        }

        fn write_month(&mut self, row: &MonthRow) -> OutputResult<()> {
            if self.fail_after.is_some_and(|n| self.rows.len() >= n) {
                return Err(OutputError::RowWidth { expected: 0, got: self.rows.len() });
            }
            self.rows.push(row.clone());
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn header_once_then_one_row_per_month() {
        let world = small_world();
        let mut obs = ReportObserver::new(Recorder::default(), Calendar::new(2000));
        for _ in 0..3 {
            obs.on_month(&world.snapshot());
            world.advance_month(eco_core::AgentId(0)).unwrap();
        }
        obs.on_sim_end(Month(3));
        assert!(obs.take_error().is_none());

        let rec = obs.into_writer();
        assert_eq!(rec.headers, 1);
        assert_eq!(rec.finishes, 1);
        assert_eq!(rec.rows.iter().map(|r| r.month).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(rec.rows[0].year, 2000);
    }

    #[test]
    fn keeps_first_error_only() {
        let world = small_world();
        let writer = Recorder { fail_after: Some(1), ..Recorder::default() };
        let mut obs = ReportObserver::new(writer, Calendar::default());
        for _ in 0..4 {
            obs.on_month(&world.snapshot());
        }
        match obs.take_error() {
            Some(OutputError::RowWidth { got, .. }) => assert_eq!(got, 1),
            other => panic!("expected first stored error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());
        assert_eq!(obs.writer().rows.len(), 1);
    }
}

#[cfg(test)]
mod integration_tests {
    use eco_agent::from_fn;
    use eco_core::{Month, SimConfig};
    use eco_sim::SimBuilder;
    use eco_world::{FieldWrite, WorldBuilder};

    use crate::csv::FILE_NAME;
    use crate::{CsvWriter, LogObserver, ReportObserver};

    #[test]
    fn simulated_year_lands_in_csv() {
        let mut b = WorldBuilder::new();
        let height = b.add_float("height", 1.0).unwrap();
        let config = SimConfig { team_size: 2, horizon: Month(12), seed: 3, ..SimConfig::default() };

        let dir = tempfile::tempdir().unwrap();
        let csv = ReportObserver::new(CsvWriter::new(dir.path()).unwrap(), config.calendar());
        let observer = (LogObserver::new(config.calendar()), csv);

        let mut report = SimBuilder::new(config, b.build(), observer)
            .agent(from_fn(vec![height], move |ctx, _| {
                vec![FieldWrite::float(height, ctx.snapshot.float(height) * 2.0)]
            }))
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.observer.0.months(), 12);
        assert!(report.observer.1.take_error().is_none());
        assert_eq!(report.observer.1.writer().rows(), 12);

        let mut rdr = csv::Reader::from_path(dir.path().join(FILE_NAME)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 12);
        // Row for month m holds the value committed during tick m.
        assert_eq!(&rows[0][3], "2");
        assert_eq!(&rows[11][3], "4096");
    }
}
