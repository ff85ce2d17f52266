//! The `OutputWriter` trait implemented by backend writers.

use crate::{EventRow, OutputResult, TraceRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait OutputWriter {
    /// Write one cursor trace row.
    fn write_trace(&mut self, row: &TraceRow) -> OutputResult<()>;

    /// Write a batch of point events.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
