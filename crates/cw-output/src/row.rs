//! Plain data row types written by output backends.

/// The cursor after one engine tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub tick:      u64,
    /// Engine clock after the tick, in simulated seconds.
    pub time_secs: f64,
    pub distance:  f32,
    pub section:   u32,
    /// `moving`, `delayed` or `stopped`.
    pub phase:     &'static str,
}

/// One point crossing, tagged with the tick it happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub tick:    u64,
    pub point:   u32,
    pub forward: bool,
}
