//! Ordered, synchronous point-crossing notification.

use cw_core::{FieldId, PointIndex, SubscriptionId};

/// A crossed curve point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointReached {
    pub point: PointIndex,
    /// `true` if the cursor was moving toward the end of the curve.
    pub forward: bool,
}

/// Callbacks invoked by the engine while it processes a tick.
///
/// Observers run synchronously inside `tick`, in subscription order.  They
/// cannot reach back into the engine; collect what you need and act on it
/// after `tick` returns.
pub trait PointObserver {
    fn on_point_reached(&mut self, event: PointReached);

    /// A configured field had no usable value on `point`; the constant
    /// speed or delay was used instead.
    fn on_field_fallback(&mut self, _point: PointIndex, _field: &FieldId) {}
}

/// Adapter so plain closures can subscribe.
struct FnObserver<F>(F);

impl<F: FnMut(PointReached)> PointObserver for FnObserver<F> {
    fn on_point_reached(&mut self, event: PointReached) {
        (self.0)(event)
    }
}

/// Registration-ordered list of [`PointObserver`]s.
///
/// No buffering and no coalescing: every emitted event reaches every
/// observer exactly once before `emit` returns.
#[derive(Default)]
pub struct EventEmitter {
    observers: Vec<(SubscriptionId, Box<dyn PointObserver>)>,
    next_id:   u32,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn PointObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn subscribe_fn<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(PointReached) + 'static,
    {
        self.subscribe(Box::new(FnObserver(f)))
    }

    /// Remove a subscription.  Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn emit(&mut self, event: PointReached) {
        for (_, observer) in &mut self.observers {
            observer.on_point_reached(event);
        }
    }

    pub(crate) fn notify_fallback(&mut self, point: PointIndex, field: &FieldId) {
        for (_, observer) in &mut self.observers {
            observer.on_field_fallback(point, field);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("observers", &self.observers.len())
            .finish()
    }
}
