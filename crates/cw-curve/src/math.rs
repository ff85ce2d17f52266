//! The two capability traits the traversal engine consumes.
//!
//! # Section convention
//!
//! A curve with `n` points has `n - 1` sections when open and `n` sections
//! when closed; the extra closed section runs from point `n - 1` back to
//! point 0 (the seam).  Section `i` starts at point `i`.
//! [`CurveMath::section_index_at`] returns the largest section whose start
//! offset is `<= distance`, clamped into the valid section range.

use cw_core::{FieldId, PointIndex};

// ── CurveMath ─────────────────────────────────────────────────────────────────

/// Arc-length queries against a precomputed curve.
///
/// Implementations own the geometry; the engine treats them as read-only
/// for the duration of a tick.  Between ticks the curve may change freely
/// (points added or moved, total length stretched).
pub trait CurveMath {
    /// Total arc length, including the closing section of a closed curve.
    fn total_length(&self) -> f32;

    /// Section containing `distance` (see the module docs).
    fn section_index_at(&self, distance: f32) -> usize;

    /// Arc length from the curve start to `point`.
    fn arc_offset(&self, point: PointIndex) -> f32;

    fn point_count(&self) -> usize;

    fn is_closed(&self) -> bool;

    /// Number of sections: `point_count - 1` open, `point_count` closed.
    #[inline]
    fn section_count(&self) -> usize {
        let n = self.point_count();
        if self.is_closed() { n } else { n.saturating_sub(1) }
    }
}

// ── FieldResolver ─────────────────────────────────────────────────────────────

/// Per-point scalar lookup by field name.
///
/// Returns `None` when the field does not exist or has no value on the
/// point; callers decide what to fall back to.
pub trait FieldResolver {
    fn float(&self, point: PointIndex, field: &FieldId) -> Option<f32>;
}

/// A [`FieldResolver`] with no fields at all.
///
/// Useful for curves that only drive the cursor with constant speed and
/// delay.
pub struct NoFields;

impl FieldResolver for NoFields {
    fn float(&self, _point: PointIndex, _field: &FieldId) -> Option<f32> {
        None
    }
}
