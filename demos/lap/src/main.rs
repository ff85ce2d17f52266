//! lap — smallest end-to-end example for the curvewalk engine.
//!
//! Drives a cursor around a closed six-point circuit for 30 simulated
//! seconds at 60 frames per second.  Speed comes from the per-point `pace`
//! field, the pit box holds the cursor for two seconds, and a follower
//! reads the `scale` field at the cursor.
//!
//! ```text
//! cargo run -p lap                      # built-in configuration
//! cargo run -p lap -- config.json       # TraversalConfig as JSON
//! RUST_LOG=cw_traverse=debug cargo run -p lap
//! ```

mod track;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cw_core::{OverflowControl, Tick, TraversalConfig};
use cw_curve::{CurveMath, FieldResolver};
use cw_drive::{DriverBuilder, DriverObserver, FieldFollower};
use cw_output::{CsvWriter, EventSink, OutputWriter, TraceObserver};
use cw_traverse::{TickOutcome, TraversalEngine};

use track::build_track;

// ── Constants ─────────────────────────────────────────────────────────────────

const FRAME_DT:   f32 = 1.0 / 60.0;
const RUN_SECS:   u64 = 30;
const OUTPUT_DIR: &str = "output/lap";

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:      TraceObserver<W>,
    trace_rows: usize,
    dwells:     usize,
    last_phase: &'static str,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, trace_rows: 0, dwells: 0, last_phase: "moving" }
    }
}

impl<W: OutputWriter> DriverObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, outcome: TickOutcome, engine: &TraversalEngine) {
        self.trace_rows += 1;
        let phase = engine.phase().as_str();
        if matches!(outcome, TickOutcome::Dwelling(_)) && self.last_phase != "delayed" {
            self.dwells += 1;
        }
        self.last_phase = phase;
    }

    fn on_sample(
        &mut self,
        tick:   Tick,
        engine: &TraversalEngine,
        curve:  &dyn CurveMath,
        fields: &dyn FieldResolver,
    ) {
        self.inner.on_sample(tick, engine, curve, fields);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config() -> Result<TraversalConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
            Ok(config)
        }
        None => Ok(TraversalConfig::default()
            .with_speed_field("pace")
            .with_delay_field("wait")
            .with_overflow(OverflowControl::Cycle)),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lap=info,cw_drive=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== lap — curvewalk cursor demo ===");

    // 1. Build the track.
    let track = build_track()?;
    println!(
        "Track: {} points, length {}, {}",
        track.point_count(),
        track.total_length(),
        if track.is_closed() { "closed" } else { "open" },
    );

    // 2. Configuration.
    let config = load_config()?;
    info!(
        speed = config.speed,
        speed_field = ?config.speed_field,
        delay_field = ?config.delay_field,
        overflow = %config.overflow,
        scheduling = %config.scheduling,
        "configuration loaded"
    );

    // 3. Build the driver.
    let mut driver = DriverBuilder::new(track.clone(), track).config(config).build()?;

    // 4. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let sink = EventSink::new();
    driver.engine.subscribe(Box::new(sink.clone()));
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let counting = CountingObserver::new(TraceObserver::new(writer).with_events(sink));
    let mut obs = (counting, FieldFollower::new("scale"));

    // 5. Run.
    let frames = (RUN_SECS as f32 / FRAME_DT).round() as u64;
    let t0 = Instant::now();
    driver.run(frames, FRAME_DT, &mut obs)?;
    let elapsed = t0.elapsed();

    let (mut counting, scale) = obs;
    if let Some(e) = counting.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Run complete in {:.3} s ({frames} frames)", elapsed.as_secs_f64());
    println!("  cursor_trace.csv : {} rows", counting.trace_rows);
    println!("  dwells started   : {}", counting.dwells);
    println!();
    println!("Final state");
    println!("{}", "-".repeat(25));
    println!("{:<14} {:>10.3}", "distance", driver.engine.distance());
    println!("{:<14} {:>10.3}", "ratio", driver.engine.distance_ratio(&driver.curve));
    println!("{:<14} {:>10}", "section", driver.engine.section(&driver.curve));
    println!("{:<14} {:>10}", "phase", driver.engine.phase().as_str());
    println!("{:<14} {:>10.3}", "scale", scale.value_or(1.0));

    Ok(())
}
