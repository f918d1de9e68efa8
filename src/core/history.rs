//! Rolling history of the current gesture.
//!
//! Holds `[last_known_human_event, ...inertial_tail]`. A human verdict starts
//! a new gesture; an inertial verdict extends the tail.

use crate::event::{biggest_delta_module, NormalizedEvent};

#[derive(Debug, Clone, Default)]
pub struct History {
    events: Vec<NormalizedEvent>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently tracked event.
    pub fn last(&self) -> Option<&NormalizedEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[NormalizedEvent] {
        &self.events
    }

    /// Start a new gesture from a human event.
    pub fn restart(&mut self, event: NormalizedEvent) {
        self.events.clear();
        self.events.push(event);
    }

    /// Extend the inertial tail.
    ///
    /// Events older than the last entry are dropped. Returns whether the
    /// event was kept.
    pub fn push_inertial(&mut self, event: NormalizedEvent) -> bool {
        if let Some(last) = self.events.last() {
            if event.time_stamp < last.time_stamp {
                return false;
            }
        }
        self.events.push(event);
        true
    }

    /// Whether the last `count` entries have strictly increasing magnitudes.
    ///
    /// False when fewer than `count` entries are tracked.
    pub fn has_increasing_tail(&self, count: usize) -> bool {
        if count == 0 || self.events.len() < count {
            return false;
        }

        self.events[self.events.len() - count..]
            .windows(2)
            .all(|pair| biggest_delta_module(&pair[1]) > biggest_delta_module(&pair[0]))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
