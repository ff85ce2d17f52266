//! `TraceObserver<W>` — bridges `DriverObserver` to an `OutputWriter`.

use tracing::warn;

use cw_core::Tick;
use cw_curve::{CurveMath, FieldResolver};
use cw_drive::DriverObserver;
use cw_traverse::TraversalEngine;

use crate::row::{EventRow, TraceRow};
use crate::writer::OutputWriter;
use crate::{EventSink, OutputError};

/// A [`DriverObserver`] that writes one trace row per tick, plus the point
/// events captured by an attached [`EventSink`], to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `DriverObserver`
/// methods have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:     W,
    events:     Option<EventSink>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, events: None, last_error: None }
    }

    /// Also write the events collected by `sink`.  The sink must be
    /// subscribed to the engine separately.
    pub fn with_events(mut self, sink: EventSink) -> Self {
        self.events = Some(sink);
        self
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> DriverObserver for TraceObserver<W> {
    // Rows are written from `on_sample` because the section column needs
    // the curve.
    fn on_sample(
        &mut self,
        tick:    Tick,
        engine:  &TraversalEngine,
        curve:   &dyn CurveMath,
        _fields: &dyn FieldResolver,
    ) {
        let row = TraceRow {
            tick:      tick.0,
            time_secs: engine.now().secs(),
            distance:  engine.distance(),
            section:   engine.section(curve) as u32,
            phase:     engine.phase().as_str(),
        };
        let result = self.writer.write_trace(&row);
        self.store_err(result);

        let Some(sink) = &self.events else { return };
        let rows: Vec<EventRow> = sink
            .drain()
            .into_iter()
            .map(|e| EventRow { tick: tick.0, point: e.point.0, forward: e.forward })
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_events(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
