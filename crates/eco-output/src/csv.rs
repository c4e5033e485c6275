//! CSV output backend.
//!
//! Creates `ecosystem.csv` in the configured output directory with columns
//! `month,year,month_of_year` followed by one column per world field.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use eco_world::{Schema, Value};

use crate::writer::OutputWriter;
use crate::{MonthRow, OutputError, OutputResult};

/// File name created inside the output directory.
pub const FILE_NAME: &str = "ecosystem.csv";

/// Writes one CSV row per simulated month.
pub struct CsvWriter {
    path:     PathBuf,
    out:      Writer<File>,
    width:    Option<usize>,
    rows:     u64,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) `ecosystem.csv` in `dir`.  The header is written
    /// once the schema is known.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let path = dir.join(FILE_NAME);
        let out = Writer::from_path(&path)?;
        Ok(Self {
            path,
            out,
            width:    None,
            rows:     0,
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self, schema: &Schema) -> OutputResult<()> {
        let mut header = vec!["month", "year", "month_of_year"];
        header.extend(schema.names());
        self.out.write_record(&header)?;
        self.width = Some(schema.len());
        Ok(())
    }

    fn write_month(&mut self, row: &MonthRow) -> OutputResult<()> {
        if let Some(expected) = self.width {
            if expected != row.values.len() {
                return Err(OutputError::RowWidth { expected, got: row.values.len() });
            }
        }

        let mut record = Vec::with_capacity(3 + row.values.len());
        record.push(row.month.to_string());
        record.push(row.year.to_string());
        record.push(row.month_of_year.to_string());
        // Full precision, unlike `Value`'s display form.
        record.extend(row.values.iter().map(|v| match v {
            Value::Float(x) => x.to_string(),
            Value::Count(n) => n.to_string(),
        }));
        self.out.write_record(&record)?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
