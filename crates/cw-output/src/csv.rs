//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `cursor_trace.csv`
//! - `point_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EventRow, OutputResult, TraceRow};
use crate::writer::OutputWriter;

pub const TRACE_FILE: &str = "cursor_trace.csv";
pub const EVENTS_FILE: &str = "point_events.csv";

/// Writes traversal output to two CSV files.
pub struct CsvWriter {
    trace:    Writer<File>,
    events:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trace = Writer::from_path(dir.join(TRACE_FILE))?;
        trace.write_record(["tick", "time_secs", "distance", "section", "phase"])?;

        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record(["tick", "point", "forward"])?;

        Ok(Self {
            trace,
            events,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trace(&mut self, row: &TraceRow) -> OutputResult<()> {
        self.trace.write_record(&[
            row.tick.to_string(),
            format!("{:.6}", row.time_secs),
            row.distance.to_string(),
            row.section.to_string(),
            row.phase.to_string(),
        ])?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.point.to_string(),
                (row.forward as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
