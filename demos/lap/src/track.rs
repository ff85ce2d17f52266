//! Shared demo track definition.
//!
//! A closed six-point loop shaped like a small race circuit: two straights
//! joined by hairpins.  Points carry three fields:
//!
//! - `pace`  — target speed in units per second
//! - `wait`  — dwell at the point in seconds (the pit box only)
//! - `scale` — size of the object riding the cursor

use cw_curve::{ArcTable, ArcTableBuilder, CurveResult};

/// Build the demo circuit.  Total length 100.
pub fn build_track() -> CurveResult<ArcTable> {
    let mut b = ArcTableBuilder::with_capacity(6);

    let start_line   = b.add_section(0.0);
    let back_turn    = b.add_section(30.0);
    let hairpin      = b.add_section(10.0);
    let back_stretch = b.add_section(8.0);
    let pit_box      = b.add_section(30.0);
    let last_turn    = b.add_section(12.0);
    b.close(10.0);

    b.field_value(start_line,   "pace",  12.0)
        .field_value(back_turn,    "pace",   6.0)
        .field_value(hairpin,      "pace",   3.0)
        .field_value(back_stretch, "pace",  12.0)
        .field_value(pit_box,      "pace",   4.0)
        .field_value(last_turn,    "pace",   6.0);

    b.field_value(pit_box, "wait", 2.0);
    for p in [start_line, back_turn, hairpin, back_stretch, last_turn] {
        b.field_value(p, "wait", 0.0);
    }

    b.field_value(start_line,   "scale", 1.0)
        .field_value(back_turn,    "scale", 0.8)
        .field_value(hairpin,      "scale", 0.6)
        .field_value(back_stretch, "scale", 1.0)
        .field_value(pit_box,      "scale", 1.2)
        .field_value(last_turn,    "scale", 0.8);

    b.build()
}
