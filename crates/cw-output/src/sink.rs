//! `EventSink` — a shared buffer of point events.

use std::cell::RefCell;
use std::rc::Rc;

use cw_traverse::{PointObserver, PointReached};

/// Cloneable handle to one event buffer.
///
/// Subscribe one clone to the engine and hand another to whoever drains
/// it (usually a [`TraceObserver`][crate::TraceObserver]).  Single-threaded,
/// like the engine.
#[derive(Clone, Default)]
pub struct EventSink {
    buffer: Rc<RefCell<Vec<PointReached>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered event, oldest first.
    pub fn drain(&self) -> Vec<PointReached> {
        std::mem::take(&mut *self.buffer.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }
}

impl PointObserver for EventSink {
    fn on_point_reached(&mut self, event: PointReached) {
        self.buffer.borrow_mut().push(event);
    }
}
