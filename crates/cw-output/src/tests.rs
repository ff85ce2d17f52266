//! Integration tests for cw-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, EVENTS_FILE, TRACE_FILE};
    use crate::row::{EventRow, TraceRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn trace_row(tick: u64) -> TraceRow {
        TraceRow {
            tick,
            time_secs: tick as f64 * 0.5,
            distance:  tick as f32,
            section:   0,
            phase:     "moving",
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(TRACE_FILE).exists());
        assert!(dir.path().join(EVENTS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(TRACE_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "time_secs", "distance", "section", "phase"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join(EVENTS_FILE)).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "point", "forward"]);
    }

    #[test]
    fn csv_trace_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_trace(&trace_row(3)).unwrap();
        w.write_trace(&trace_row(4)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(TRACE_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "3");          // tick
        assert_eq!(&rows[0][1], "1.500000");   // time_secs
        assert_eq!(&rows[0][2], "3");          // distance
        assert_eq!(&rows[1][4], "moving");
    }

    #[test]
    fn csv_event_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[
            EventRow { tick: 2, point: 1, forward: true },
            EventRow { tick: 2, point: 0, forward: false },
        ])
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(EVENTS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "1");
        assert_eq!(&rows[0][2], "1");
        assert_eq!(&rows[1][2], "0");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }
}

// ── EventSink ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sink_tests {
    use cw_core::PointIndex;
    use cw_traverse::{PointObserver, PointReached};

    use crate::EventSink;

    #[test]
    fn clones_share_one_buffer() {
        let sink = EventSink::new();
        let mut subscribed = sink.clone();
        subscribed.on_point_reached(PointReached { point: PointIndex(4), forward: true });

        assert_eq!(sink.len(), 1);
        let drained = sink.drain();
        assert_eq!(drained, vec![PointReached { point: PointIndex(4), forward: true }]);
        assert!(subscribed.is_empty());
    }
}

// ── TraceObserver ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use cw_core::{OverflowControl, TraversalConfig};
    use cw_curve::{ArcTable, NoFields};
    use cw_drive::DriverBuilder;

    use crate::{EventRow, EventSink, OutputError, OutputResult, OutputWriter, TraceObserver, TraceRow};

    /// In-memory writer; optionally fails every trace write.
    #[derive(Default)]
    struct VecWriter {
        trace:    Vec<TraceRow>,
        events:   Vec<EventRow>,
        finished: u32,
        fail:     bool,
    }

    impl OutputWriter for VecWriter {
        fn write_trace(&mut self, row: &TraceRow) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.trace.push(*row);
            Ok(())
        }

        fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
            self.events.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn one_trace_row_per_tick() {
        let mut driver = DriverBuilder::new(ArcTable::open(&[0.0, 5.0, 10.0]).unwrap(), NoFields)
            .config(TraversalConfig::default().with_speed(2.0))
            .build()
            .unwrap();
        let mut obs = TraceObserver::new(VecWriter::default());
        driver.run(3, 1.0, &mut obs).unwrap();

        assert!(obs.take_error().is_none());
        let w = obs.into_writer();
        assert_eq!(w.trace.len(), 3);
        assert_eq!(w.trace[0].tick, 0);
        assert_eq!(w.trace[2].distance, 6.0);
        assert_eq!(w.trace[2].section, 1);
        assert_eq!(w.trace[2].time_secs, 3.0);
        assert_eq!(w.finished, 1);
    }

    #[test]
    fn events_tagged_with_their_tick() {
        let mut driver = DriverBuilder::new(ArcTable::closed(&[0.0, 4.0, 7.0], 10.0).unwrap(), NoFields)
            .config(TraversalConfig::default().with_speed(3.0).with_overflow(OverflowControl::Cycle))
            .build()
            .unwrap();
        let sink = EventSink::new();
        driver.engine.subscribe(Box::new(sink.clone()));
        let mut obs = TraceObserver::new(VecWriter::default()).with_events(sink);
        driver.run(4, 1.0, &mut obs).unwrap();

        // 3, 6, 9, 12 → 2: points 1, 2, then the seam.
        let w = obs.into_writer();
        assert_eq!(
            w.events,
            vec![
                EventRow { tick: 1, point: 1, forward: true },
                EventRow { tick: 2, point: 2, forward: true },
                EventRow { tick: 3, point: 0, forward: true },
            ]
        );
        assert_eq!(w.trace[3].distance, 2.0);
    }

    #[test]
    fn first_write_error_is_kept() {
        let mut driver = DriverBuilder::new(ArcTable::open(&[0.0, 10.0]).unwrap(), NoFields)
            .build()
            .unwrap();
        let mut obs = TraceObserver::new(VecWriter { fail: true, ..VecWriter::default() });
        driver.run(2, 0.1, &mut obs).unwrap();

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }
}
