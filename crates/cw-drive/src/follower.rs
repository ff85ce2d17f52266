//! Cursor dependents that read a per-point field.

use cw_core::{FieldId, Tick};
use cw_curve::{CurveMath, FieldResolver, sample_field};
use cw_traverse::TraversalEngine;

use crate::DriverObserver;

/// Samples one field at the cursor after every tick.
///
/// Typical fields are `scale` or `roll`: a host object attached to the
/// cursor reads [`value`](Self::value) each frame.  The value is `None`
/// until the first sample, and whenever the section around the cursor
/// lacks the field.
#[derive(Clone, Debug)]
pub struct FieldFollower {
    field:   FieldId,
    value:   Option<f32>,
    samples: u64,
}

impl FieldFollower {
    pub fn new(field: impl Into<FieldId>) -> Self {
        Self { field: field.into(), value: None, samples: 0 }
    }

    pub fn field(&self) -> &FieldId {
        &self.field
    }

    /// Latest sampled value.
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// Latest value, or `default` when unavailable.
    pub fn value_or(&self, default: f32) -> f32 {
        self.value.unwrap_or(default)
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }
}

impl DriverObserver for FieldFollower {
    fn on_sample(
        &mut self,
        _tick:  Tick,
        engine: &TraversalEngine,
        curve:  &dyn CurveMath,
        fields: &dyn FieldResolver,
    ) {
        self.value = sample_field(curve, fields, &self.field, engine.distance());
        self.samples += 1;
    }
}
