//! Precomputed arc-length table and builder.
//!
//! # Data layout
//!
//! ```text
//! offsets:  [ 0.0, o1, o2, …, o(n-1) ]      ascending, offsets[0] == 0
//! total:    o(n-1)                          open curve
//!           o(n-1) + closing_length         closed curve
//! fields:   name → [ Option<f32>; n ]       dense per-point columns
//! ```
//!
//! Section lookup is a binary search over `offsets`, O(log n).  The table
//! is what a geometry layer would hand over after sampling its splines; it
//! knows nothing about positions or tangents.

use rustc_hash::FxHashMap;

use cw_core::{FieldId, PointIndex};

use crate::{CurveError, CurveMath, CurveResult, FieldResolver};

// ── ArcTable ──────────────────────────────────────────────────────────────────

/// Arc offsets, closed flag and per-point fields of one curve.
///
/// Construct with [`ArcTableBuilder`] or the [`open`](Self::open) /
/// [`closed`](Self::closed) shorthands.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcTable {
    offsets: Vec<f32>,
    total:   f32,
    closed:  bool,
    fields:  FxHashMap<FieldId, Vec<Option<f32>>>,
}

impl ArcTable {
    /// Open curve through points at the given arc offsets.
    pub fn open(offsets: &[f32]) -> CurveResult<Self> {
        let mut b = ArcTableBuilder::with_capacity(offsets.len());
        for &o in offsets {
            b.add_point(o);
        }
        b.build()
    }

    /// Closed curve through points at the given arc offsets with the given
    /// total length (the seam section is `total - offsets.last()`).
    pub fn closed(offsets: &[f32], total: f32) -> CurveResult<Self> {
        let mut b = ArcTableBuilder::with_capacity(offsets.len());
        for &o in offsets {
            b.add_point(o);
        }
        let last = offsets.last().copied().unwrap_or(0.0);
        b.close(total - last);
        b.build()
    }

    /// Arc offsets of all points, ascending.
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Stretch every section by `factor`, as if the geometry had been
    /// rescaled.  Non-positive or non-finite factors are ignored.
    pub fn scale_lengths(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        for o in &mut self.offsets {
            *o *= factor;
        }
        self.total *= factor;
    }

    /// Set (or clear with `None`) one field value, creating the column on
    /// first use.
    pub fn set_field_value(
        &mut self,
        point: PointIndex,
        field: &FieldId,
        value: Option<f32>,
    ) -> CurveResult<()> {
        let n = self.offsets.len();
        if point.index() >= n {
            return Err(CurveError::PointOutOfRange(point));
        }
        let column = self
            .fields
            .entry(field.clone())
            .or_insert_with(|| vec![None; n]);
        column[point.index()] = value;
        Ok(())
    }

    /// `true` if a column named `field` exists, regardless of its values.
    pub fn has_field(&self, field: &FieldId) -> bool {
        self.fields.contains_key(field)
    }
}

impl CurveMath for ArcTable {
    #[inline]
    fn total_length(&self) -> f32 {
        self.total
    }

    fn section_index_at(&self, distance: f32) -> usize {
        if self.offsets.is_empty() {
            return 0;
        }
        let at_or_before = self.offsets.partition_point(|&o| o <= distance);
        let last_section = self.section_count().saturating_sub(1);
        at_or_before.saturating_sub(1).min(last_section)
    }

    #[inline]
    fn arc_offset(&self, point: PointIndex) -> f32 {
        self.offsets.get(point.index()).copied().unwrap_or(self.total)
    }

    #[inline]
    fn point_count(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FieldResolver for ArcTable {
    fn float(&self, point: PointIndex, field: &FieldId) -> Option<f32> {
        self.fields.get(field)?.get(point.index()).copied().flatten()
    }
}

// ── ArcTableBuilder ───────────────────────────────────────────────────────────

/// Construct an [`ArcTable`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cw_core::{FieldId, PointIndex};
/// use cw_curve::{ArcTableBuilder, CurveMath, FieldResolver};
///
/// let mut b = ArcTableBuilder::new();
/// let p0 = b.add_point(0.0);
/// let p1 = b.add_point(5.0);
/// b.add_point(12.0);
/// b.field_value(p1, "pause", 1.5);
/// let table = b.build().unwrap();
/// assert_eq!(table.point_count(), 3);
/// assert_eq!(table.total_length(), 12.0);
/// assert_eq!(table.float(p1, &FieldId::from("pause")), Some(1.5));
/// assert_eq!(table.float(p0, &FieldId::from("pause")), None);
/// ```
pub struct ArcTableBuilder {
    offsets:        Vec<f32>,
    closing_length: Option<f32>,
    values:         Vec<(PointIndex, FieldId, f32)>,
}

impl ArcTableBuilder {
    pub fn new() -> Self {
        Self { offsets: Vec::new(), closing_length: None, values: Vec::new() }
    }

    pub fn with_capacity(points: usize) -> Self {
        Self {
            offsets:        Vec::with_capacity(points),
            closing_length: None,
            values:         Vec::new(),
        }
    }

    /// Add a point at `offset` and return its index (sequential from 0).
    pub fn add_point(&mut self, offset: f32) -> PointIndex {
        let id = PointIndex::from_index(self.offsets.len());
        self.offsets.push(offset);
        id
    }

    /// Add a point `length` past the previous one (or at 0 for the first).
    pub fn add_section(&mut self, length: f32) -> PointIndex {
        let offset = match self.offsets.last() {
            Some(&last) => last + length,
            None        => 0.0,
        };
        self.add_point(offset)
    }

    /// Make the curve closed; `closing_length` is the seam section from the
    /// last point back to point 0.
    pub fn close(&mut self, closing_length: f32) -> &mut Self {
        self.closing_length = Some(closing_length);
        self
    }

    /// Record a per-point field value.
    pub fn field_value(&mut self, point: PointIndex, field: impl Into<FieldId>, value: f32) -> &mut Self {
        self.values.push((point, field.into(), value));
        self
    }

    pub fn point_count(&self) -> usize {
        self.offsets.len()
    }

    /// Validate and produce the table.
    pub fn build(self) -> CurveResult<ArcTable> {
        let mut previous = 0.0f32;
        for (i, &o) in self.offsets.iter().enumerate() {
            let point = PointIndex::from_index(i);
            if !o.is_finite() {
                return Err(CurveError::NonFinite { point });
            }
            if i == 0 && o != 0.0 {
                return Err(CurveError::StartNotZero(o));
            }
            if o < previous {
                return Err(CurveError::Decreasing { point, offset: o, previous });
            }
            previous = o;
        }

        let last = self.offsets.last().copied().unwrap_or(0.0);
        let (total, closed) = match self.closing_length {
            Some(closing) => {
                let total = last + closing;
                if !total.is_finite() || total < last {
                    return Err(CurveError::TotalTooShort { total, last });
                }
                (total, true)
            }
            None => (last, false),
        };

        let n = self.offsets.len();
        let mut fields: FxHashMap<FieldId, Vec<Option<f32>>> = FxHashMap::default();
        for (point, field, value) in self.values {
            if point.index() >= n {
                return Err(CurveError::PointOutOfRange(point));
            }
            fields.entry(field).or_insert_with(|| vec![None; n])[point.index()] = Some(value);
        }

        Ok(ArcTable { offsets: self.offsets, total, closed, fields })
    }
}

impl Default for ArcTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
