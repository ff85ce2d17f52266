//! `cw-output` — trace output for curvewalk drivers.
//!
//! | Writer        | Files created                                 |
//! |---------------|-----------------------------------------------|
//! | [`CsvWriter`] | `cursor_trace.csv`, `point_events.csv`        |
//!
//! Writers implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `cw_drive::DriverObserver`.  Point events reach the
//! observer through an [`EventSink`] subscribed to the engine.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cw_output::{CsvWriter, EventSink, TraceObserver};
//!
//! let sink = EventSink::new();
//! driver.engine.subscribe(Box::new(sink.clone()));
//! let mut obs = TraceObserver::new(CsvWriter::new(Path::new("./output"))?).with_events(sink);
//! driver.run(600, 1.0 / 60.0, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod sink;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{EventRow, TraceRow};
pub use sink::EventSink;
pub use writer::OutputWriter;
