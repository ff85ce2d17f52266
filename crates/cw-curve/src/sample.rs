//! Field interpolation at an arbitrary cursor distance.
//!
//! Dependents of the cursor (scale, roll, tint, …) read a per-point field
//! and blend linearly between the two points bounding the cursor's section.

use cw_core::{EPSILON, FieldId, PointIndex};

use crate::{CurveMath, FieldResolver};

/// Value of `field` at `distance`, linearly interpolated across the section
/// containing `distance`.
///
/// On a closed curve the seam section blends from the last point toward
/// point 0.  Returns `None` if the curve is empty or either bounding point
/// has no value for `field`.
pub fn sample_field<M, F>(curve: &M, fields: &F, field: &FieldId, distance: f32) -> Option<f32>
where
    M: CurveMath + ?Sized,
    F: FieldResolver + ?Sized,
{
    let n = curve.point_count();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return fields.float(PointIndex(0), field);
    }

    let total   = curve.total_length();
    let section = curve.section_index_at(distance);
    let from    = section;
    let to      = if curve.is_closed() { (section + 1) % n } else { (section + 1).min(n - 1) };

    let start = curve.arc_offset(PointIndex::from_index(from));
    let end   = if to == 0 { total } else { curve.arc_offset(PointIndex::from_index(to)) };

    let a = fields.float(PointIndex::from_index(from), field)?;
    let b = fields.float(PointIndex::from_index(to), field)?;

    let span = end - start;
    let t = if span > EPSILON { ((distance - start) / span).clamp(0.0, 1.0) } else { 0.0 };
    Some(a + (b - a) * t)
}
