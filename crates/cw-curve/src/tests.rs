//! Unit tests for cw-curve.
//!
//! All tests use hand-written offset tables; no geometry is involved.

#[cfg(test)]
mod helpers {
    use crate::{ArcTable, ArcTableBuilder};

    /// Open curve: points at 0, 5, 12 (sections of length 5 and 7).
    pub fn open_three() -> ArcTable {
        ArcTable::open(&[0.0, 5.0, 12.0]).unwrap()
    }

    /// Closed curve: points at 0, 4, 7, total 10 (seam section of length 3).
    pub fn closed_three() -> ArcTable {
        ArcTable::closed(&[0.0, 4.0, 7.0], 10.0).unwrap()
    }

    /// Open curve with a `scale` field: 1 → 3 → 2.
    pub fn scaled_open() -> ArcTable {
        let mut b = ArcTableBuilder::new();
        let p0 = b.add_section(0.0);
        let p1 = b.add_section(10.0);
        let p2 = b.add_section(10.0);
        b.field_value(p0, "scale", 1.0)
            .field_value(p1, "scale", 3.0)
            .field_value(p2, "scale", 2.0);
        b.build().unwrap()
    }
}

// ── Builder validation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use cw_core::PointIndex;

    use crate::{ArcTable, ArcTableBuilder, CurveError, CurveMath};

    #[test]
    fn empty_build() {
        let table = ArcTableBuilder::new().build().unwrap();
        assert_eq!(table.point_count(), 0);
        assert_eq!(table.total_length(), 0.0);
        assert_eq!(table.section_count(), 0);
    }

    #[test]
    fn add_section_accumulates_offsets() {
        let mut b = ArcTableBuilder::new();
        assert_eq!(b.add_section(99.0), PointIndex(0), "first section length is ignored");
        b.add_section(2.0);
        b.add_section(3.0);
        let table = b.build().unwrap();
        assert_eq!(table.offsets(), &[0.0, 2.0, 5.0]);
    }

    #[test]
    fn rejects_decreasing_offsets() {
        let err = ArcTable::open(&[0.0, 5.0, 4.0]).unwrap_err();
        assert_eq!(err, CurveError::Decreasing { point: PointIndex(2), offset: 4.0, previous: 5.0 });
    }

    #[test]
    fn rejects_non_zero_start() {
        assert_eq!(ArcTable::open(&[1.0, 2.0]).unwrap_err(), CurveError::StartNotZero(1.0));
    }

    #[test]
    fn rejects_nan_offset() {
        let err = ArcTable::open(&[0.0, f32::NAN]).unwrap_err();
        assert_eq!(err, CurveError::NonFinite { point: PointIndex(1) });
    }

    #[test]
    fn rejects_short_closed_total() {
        let err = ArcTable::closed(&[0.0, 5.0], 4.0).unwrap_err();
        assert!(matches!(err, CurveError::TotalTooShort { .. }));
    }

    #[test]
    fn rejects_field_on_missing_point() {
        let mut b = ArcTableBuilder::new();
        b.add_point(0.0);
        b.field_value(PointIndex(3), "speed", 1.0);
        assert_eq!(b.build().unwrap_err(), CurveError::PointOutOfRange(PointIndex(3)));
    }
}

// ── CurveMath ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod curve_math {
    use cw_core::PointIndex;

    use super::helpers::{closed_three, open_three};
    use crate::CurveMath;

    #[test]
    fn open_dimensions() {
        let t = open_three();
        assert_eq!(t.point_count(), 3);
        assert_eq!(t.section_count(), 2);
        assert_eq!(t.total_length(), 12.0);
        assert!(!t.is_closed());
        assert_eq!(t.arc_offset(PointIndex(1)), 5.0);
    }

    #[test]
    fn closed_dimensions() {
        let t = closed_three();
        assert_eq!(t.section_count(), 3);
        assert_eq!(t.total_length(), 10.0);
        assert!(t.is_closed());
    }

    #[test]
    fn open_section_lookup() {
        let t = open_three();
        assert_eq!(t.section_index_at(0.0), 0);
        assert_eq!(t.section_index_at(4.99), 0);
        assert_eq!(t.section_index_at(5.0), 1);
        assert_eq!(t.section_index_at(12.0), 1, "end of an open curve stays in the last section");
        assert_eq!(t.section_index_at(-1.0), 0);
    }

    #[test]
    fn closed_section_lookup_includes_seam_section() {
        let t = closed_three();
        assert_eq!(t.section_index_at(6.9), 1);
        assert_eq!(t.section_index_at(7.0), 2);
        assert_eq!(t.section_index_at(9.9), 2);
        assert_eq!(t.section_index_at(10.0), 2);
    }

    #[test]
    fn scale_lengths_stretches_everything() {
        let mut t = closed_three();
        t.scale_lengths(2.0);
        assert_eq!(t.offsets(), &[0.0, 8.0, 14.0]);
        assert_eq!(t.total_length(), 20.0);
        t.scale_lengths(-1.0);
        assert_eq!(t.total_length(), 20.0, "negative factor ignored");
    }
}

// ── Fields ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fields {
    use cw_core::{FieldId, PointIndex};

    use super::helpers::{open_three, scaled_open};
    use crate::{CurveError, FieldResolver, NoFields};

    #[test]
    fn missing_column_resolves_none() {
        let t = open_three();
        assert_eq!(t.float(PointIndex(0), &FieldId::from("speed")), None);
        assert!(!t.has_field(&FieldId::from("speed")));
    }

    #[test]
    fn set_field_value_creates_column() {
        let mut t = open_three();
        let speed = FieldId::from("speed");
        t.set_field_value(PointIndex(1), &speed, Some(4.0)).unwrap();
        assert!(t.has_field(&speed));
        assert_eq!(t.float(PointIndex(1), &speed), Some(4.0));
        assert_eq!(t.float(PointIndex(2), &speed), None);

        t.set_field_value(PointIndex(1), &speed, None).unwrap();
        assert_eq!(t.float(PointIndex(1), &speed), None);
    }

    #[test]
    fn set_field_value_out_of_range() {
        let mut t = open_three();
        let err = t.set_field_value(PointIndex(9), &FieldId::from("x"), Some(1.0));
        assert_eq!(err, Err(CurveError::PointOutOfRange(PointIndex(9))));
    }

    #[test]
    fn out_of_range_point_resolves_none() {
        let t = scaled_open();
        assert_eq!(t.float(PointIndex(40), &FieldId::from("scale")), None);
    }

    #[test]
    fn no_fields_is_always_none() {
        assert_eq!(NoFields.float(PointIndex(0), &FieldId::from("scale")), None);
    }
}

// ── sample_field ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sampling {
    use cw_core::{FieldId, PointIndex};

    use super::helpers::{closed_three, open_three, scaled_open};
    use crate::{ArcTable, sample_field};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn interpolates_within_section() {
        let t = scaled_open();
        let scale = FieldId::from("scale");
        assert!(close(sample_field(&t, &t, &scale, 0.0).unwrap(), 1.0));
        assert!(close(sample_field(&t, &t, &scale, 5.0).unwrap(), 2.0));
        assert!(close(sample_field(&t, &t, &scale, 10.0).unwrap(), 3.0));
        assert!(close(sample_field(&t, &t, &scale, 15.0).unwrap(), 2.5));
        assert!(close(sample_field(&t, &t, &scale, 20.0).unwrap(), 2.0));
    }

    #[test]
    fn closed_seam_blends_toward_point_zero() {
        let mut t = closed_three();
        let roll = FieldId::from("roll");
        t.set_field_value(PointIndex(0), &roll, Some(0.0)).unwrap();
        t.set_field_value(PointIndex(1), &roll, Some(0.0)).unwrap();
        t.set_field_value(PointIndex(2), &roll, Some(3.0)).unwrap();
        // Seam section 7..10 blends 3 → 0.
        assert!(close(sample_field(&t, &t, &roll, 8.5).unwrap(), 1.5));
    }

    #[test]
    fn missing_value_yields_none() {
        let t = open_three();
        assert_eq!(sample_field(&t, &t, &FieldId::from("scale"), 3.0), None);
    }

    #[test]
    fn single_point_curve_returns_its_value() {
        let mut t = ArcTable::open(&[0.0]).unwrap();
        let f = FieldId::from("scale");
        t.set_field_value(PointIndex(0), &f, Some(7.0)).unwrap();
        assert_eq!(sample_field(&t, &t, &f, 0.0), Some(7.0));
    }

    #[test]
    fn empty_curve_yields_none() {
        let t = ArcTable::open(&[]).unwrap();
        assert_eq!(sample_field(&t, &t, &FieldId::from("scale"), 0.0), None);
    }
}
