//! Per-point speed and delay resolution.
//!
//! Both resolvers read the configured constant, or the configured field on
//! the point when one is set.  A field that is missing (or not finite) on
//! the point falls back to the constant and says so through
//! [`Resolved::Fallback`], so the engine can report it.

use cw_core::{FieldId, PointIndex, TraversalConfig};
use cw_curve::FieldResolver;

/// Where a resolved value came from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Resolved {
    /// No field configured; the constant.
    Constant(f32),
    /// The point's field value.
    Field(f32),
    /// Field configured but unusable on this point; the constant.
    Fallback(f32),
}

impl Resolved {
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Resolved::Constant(v) | Resolved::Field(v) | Resolved::Fallback(v) => v,
        }
    }

    #[inline]
    pub fn is_fallback(self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }

    fn map(self, f: impl FnOnce(f32) -> f32) -> Resolved {
        match self {
            Resolved::Constant(v) => Resolved::Constant(f(v)),
            Resolved::Field(v)    => Resolved::Field(f(v)),
            Resolved::Fallback(v) => Resolved::Fallback(f(v)),
        }
    }
}

fn resolve<F>(fields: &F, point: PointIndex, field: Option<&FieldId>, constant: f32) -> Resolved
where
    F: FieldResolver + ?Sized,
{
    let Some(field) = field else {
        return Resolved::Constant(constant);
    };
    match fields.float(point, field) {
        Some(v) if v.is_finite() => Resolved::Field(v),
        _ => Resolved::Fallback(constant),
    }
}

// ── SpeedResolver ─────────────────────────────────────────────────────────────

/// Signed speed at a point, negated while the engine runs reversed.
pub struct SpeedResolver<'a> {
    config:   &'a TraversalConfig,
    reversed: bool,
}

impl<'a> SpeedResolver<'a> {
    pub fn new(config: &'a TraversalConfig, reversed: bool) -> Self {
        Self { config, reversed }
    }

    pub fn speed<F: FieldResolver + ?Sized>(&self, fields: &F, point: PointIndex) -> Resolved {
        let r = resolve(fields, point, self.config.speed_field.as_ref(), self.config.speed);
        if self.reversed { r.map(|v| -v) } else { r }
    }
}

// ── DelayResolver ─────────────────────────────────────────────────────────────

/// Dwell duration in seconds at a point.  Never negative.
pub struct DelayResolver<'a> {
    config: &'a TraversalConfig,
}

impl<'a> DelayResolver<'a> {
    pub fn new(config: &'a TraversalConfig) -> Self {
        Self { config }
    }

    pub fn delay<F: FieldResolver + ?Sized>(&self, fields: &F, point: PointIndex) -> Resolved {
        resolve(fields, point, self.config.delay_field.as_ref(), self.config.delay).map(|v| v.max(0.0))
    }
}
