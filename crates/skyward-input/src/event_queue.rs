//! Per-frame queue of resolved action events.

use crate::action::Action;
use crate::bounded::BoundedVec;
use crate::error::{Capacity, Error, Result};

/// Maximum events emitted within one frame.
pub const MAX_EVENTS_PER_FRAME: usize = 64;

/// A resolved action event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub action: Action,
    /// Action value after the update. Zero on release.
    pub value: f32,
    pub just_pressed: bool,
    pub just_released: bool,
    /// Timestamp of the hardware event that caused this one.
    pub timestamp: u64,
}

impl InputEvent {
    /// Press edge.
    #[must_use]
    pub const fn pressed(action: Action, value: f32, timestamp: u64) -> Self {
        Self {
            action,
            value,
            just_pressed: true,
            just_released: false,
            timestamp,
        }
    }

    /// Release edge. The value is always zero.
    #[must_use]
    pub const fn released(action: Action, timestamp: u64) -> Self {
        Self {
            action,
            value: 0.0,
            just_pressed: false,
            just_released: true,
            timestamp,
        }
    }

    /// Analog change without an edge.
    #[must_use]
    pub const fn changed(action: Action, value: f32, timestamp: u64) -> Self {
        Self {
            action,
            value,
            just_pressed: false,
            just_released: false,
            timestamp,
        }
    }

    /// Returns `true` for analog updates that carry no edge.
    #[inline]
    #[must_use]
    pub const fn is_analog(&self) -> bool {
        !self.just_pressed && !self.just_released
    }
}

/// Fixed-capacity event queue, refilled every frame and drained by pull.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: BoundedVec<InputEvent, MAX_EVENTS_PER_FRAME>,
    cursor: usize,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: BoundedVec::new(),
            cursor: 0,
        }
    }

    /// Discard every event, read or not.
    pub fn reset(&mut self) {
        self.events.clear();
        self.cursor = 0;
    }

    /// Append an event.
    ///
    /// Fails if the queue is full; the event is dropped.
    pub fn push(&mut self, event: InputEvent) -> Result<()> {
        self.events
            .push(event)
            .map_err(|_| Error::CapacityExceeded {
                what: Capacity::EventsPerFrame,
                limit: MAX_EVENTS_PER_FRAME,
            })
    }

    /// Take the next unread event.
    pub fn next_event(&mut self) -> Option<InputEvent> {
        let event = self.events.get(self.cursor)?;
        self.cursor += 1;
        Some(event)
    }

    /// Events pushed since the last reset.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing was pushed since the last reset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events not yet taken with [`next_event`](Self::next_event).
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }

    /// Iterate over every event of this frame without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_with_nothing_pushed_yields_nothing() {
        let mut queue = EventQueue::new();
        queue.reset();
        assert_eq!(queue.next_event(), None);
    }

    #[test]
    fn events_are_delivered_once_in_order() {
        let mut queue = EventQueue::new();
        assert!(queue.push(InputEvent::pressed(Action::Boost, 1.0, 1)).is_ok());
        assert!(queue.push(InputEvent::released(Action::Boost, 2)).is_ok());

        assert_eq!(queue.remaining(), 2);
        assert_eq!(queue.next_event(), Some(InputEvent::pressed(Action::Boost, 1.0, 1)));
        assert_eq!(queue.next_event(), Some(InputEvent::released(Action::Boost, 2)));
        assert_eq!(queue.next_event(), None);
        assert_eq!(queue.next_event(), None);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn overflow_drops_events() {
        let mut queue = EventQueue::new();
        for i in 0..MAX_EVENTS_PER_FRAME {
            assert!(queue.push(InputEvent::changed(Action::CameraYaw, 0.5, i as u64)).is_ok());
        }
        assert!(matches!(
            queue.push(InputEvent::changed(Action::CameraYaw, 0.6, 999)),
            Err(Error::CapacityExceeded {
                what: Capacity::EventsPerFrame,
                limit: MAX_EVENTS_PER_FRAME,
            })
        ));
        assert_eq!(queue.len(), MAX_EVENTS_PER_FRAME);

        let last = std::iter::from_fn(|| queue.next_event()).last().unwrap();
        assert_eq!(last.timestamp, (MAX_EVENTS_PER_FRAME - 1) as u64);
    }

    #[test]
    fn reset_discards_unread_events() {
        let mut queue = EventQueue::new();
        queue.push(InputEvent::pressed(Action::Quit, 1.0, 1)).unwrap();
        queue.reset();
        assert!(queue.is_empty());
        assert_eq!(queue.next_event(), None);
    }

    #[test]
    fn event_kinds() {
        assert!(InputEvent::changed(Action::PitchUp, 0.3, 0).is_analog());
        assert!(!InputEvent::pressed(Action::PitchUp, 0.3, 0).is_analog());
        let release = InputEvent::released(Action::PitchUp, 0);
        assert!(release.just_released);
        assert_eq!(release.value, 0.0);
    }
}
