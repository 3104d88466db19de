//! Normalized hardware events and the device event source seam.

use std::collections::VecDeque;

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::gamepad::{GamepadButtons, GAMEPAD_AXIS_COUNT};
use crate::modifiers::Modifiers;
use crate::mouse::MouseButtons;

/// Kind of device that produced an event or that a binding listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Keyboard,
    Mouse,
    Gamepad,
    Touch,
}

/// Device-specific payload of a hardware event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DevicePayload {
    /// A key went down or up.
    Keyboard {
        key: KeyCode,
        modifiers: Modifiers,
        pressed: bool,
    },
    /// One or more mouse buttons changed state.
    Mouse {
        /// Buttons this event reports.
        buttons: MouseButtons,
        /// Whether the reported buttons went down (`true`) or up.
        pressed: bool,
        /// Cursor position in window coordinates.
        position: Vec2,
        /// Wheel movement accumulated since the previous mouse event.
        wheel: Vec2,
    },
    /// Full state snapshot of one gamepad.
    Gamepad {
        id: u8,
        buttons: GamepadButtons,
        axes: [f32; GAMEPAD_AXIS_COUNT],
    },
    /// Touch contact. Never matches a binding.
    Touch {
        id: u8,
        position: Vec2,
        pressure: f32,
        pressed: bool,
    },
}

impl DevicePayload {
    /// The device kind of this payload.
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        match self {
            Self::Keyboard { .. } => DeviceKind::Keyboard,
            Self::Mouse { .. } => DeviceKind::Mouse,
            Self::Gamepad { .. } => DeviceKind::Gamepad,
            Self::Touch { .. } => DeviceKind::Touch,
        }
    }
}

/// One normalized hardware event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareEvent {
    /// Milliseconds on the source's clock.
    pub timestamp: u64,
    pub payload: DevicePayload,
}

impl HardwareEvent {
    /// Create an event.
    #[must_use]
    pub const fn new(timestamp: u64, payload: DevicePayload) -> Self {
        Self { timestamp, payload }
    }

    /// Keyboard key down/up event without modifiers.
    #[must_use]
    pub const fn key(timestamp: u64, key: KeyCode, pressed: bool) -> Self {
        Self::key_with_modifiers(timestamp, key, Modifiers::empty(), pressed)
    }

    /// Keyboard key down/up event.
    #[must_use]
    pub const fn key_with_modifiers(
        timestamp: u64,
        key: KeyCode,
        modifiers: Modifiers,
        pressed: bool,
    ) -> Self {
        Self::new(
            timestamp,
            DevicePayload::Keyboard {
                key,
                modifiers,
                pressed,
            },
        )
    }

    /// Mouse button down/up event at the origin.
    #[must_use]
    pub const fn mouse(timestamp: u64, buttons: MouseButtons, pressed: bool) -> Self {
        Self::new(
            timestamp,
            DevicePayload::Mouse {
                buttons,
                pressed,
                position: Vec2::ZERO,
                wheel: Vec2::ZERO,
            },
        )
    }

    /// Gamepad state snapshot.
    #[must_use]
    pub const fn gamepad(
        timestamp: u64,
        id: u8,
        buttons: GamepadButtons,
        axes: [f32; GAMEPAD_AXIS_COUNT],
    ) -> Self {
        Self::new(timestamp, DevicePayload::Gamepad { id, buttons, axes })
    }

    /// Device kind that produced this event.
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        self.payload.kind()
    }
}

/// Producer of normalized hardware events, drained once per frame.
pub trait DeviceEventSource {
    /// Refill the source with whatever arrived since the last poll.
    fn poll_events(&mut self);

    /// Take the next polled event, in arrival order.
    fn next_event(&mut self) -> Option<HardwareEvent>;
}

impl<S: DeviceEventSource + ?Sized> DeviceEventSource for Box<S> {
    fn poll_events(&mut self) {
        (**self).poll_events();
    }

    fn next_event(&mut self) -> Option<HardwareEvent> {
        (**self).next_event()
    }
}

impl<S: DeviceEventSource> DeviceEventSource for Option<S> {
    fn poll_events(&mut self) {
        if let Some(source) = self {
            source.poll_events();
        }
    }

    fn next_event(&mut self) -> Option<HardwareEvent> {
        self.as_mut()?.next_event()
    }
}

/// Two sources interleaved by timestamp.
///
/// Both sources must stamp events on the same clock. Equal timestamps keep
/// the first source's event first.
#[derive(Debug, Default)]
pub struct MergedSource<A, B> {
    first: A,
    second: B,
    first_next: Option<HardwareEvent>,
    second_next: Option<HardwareEvent>,
}

impl<A, B> MergedSource<A, B> {
    /// Merge `first` and `second`.
    #[must_use]
    pub const fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            first_next: None,
            second_next: None,
        }
    }

    /// The first source.
    #[must_use]
    pub const fn first(&self) -> &A {
        &self.first
    }

    /// Mutable access to the first source.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// The second source.
    #[must_use]
    pub const fn second(&self) -> &B {
        &self.second
    }

    /// Mutable access to the second source.
    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }
}

impl<A: DeviceEventSource, B: DeviceEventSource> DeviceEventSource for MergedSource<A, B> {
    fn poll_events(&mut self) {
        self.first.poll_events();
        self.second.poll_events();
    }

    fn next_event(&mut self) -> Option<HardwareEvent> {
        if self.first_next.is_none() {
            self.first_next = self.first.next_event();
        }
        if self.second_next.is_none() {
            self.second_next = self.second.next_event();
        }
        match (self.first_next, self.second_next) {
            (Some(a), Some(b)) if b.timestamp < a.timestamp => self.second_next.take(),
            (Some(_), _) => self.first_next.take(),
            (None, _) => self.second_next.take(),
        }
    }
}

/// In-memory source fed by hand.
///
/// Queued events stay invisible until the next [`poll_events`], so a test
/// can stage a batch between frames exactly like a platform backend would.
///
/// [`poll_events`]: DeviceEventSource::poll_events
#[derive(Debug, Default)]
pub struct ScriptedSource {
    staged: VecDeque<HardwareEvent>,
    ready: VecDeque<HardwareEvent>,
    clock: u64,
}

impl ScriptedSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an event for the next poll.
    pub fn queue(&mut self, event: HardwareEvent) {
        self.clock = self.clock.max(event.timestamp);
        self.staged.push_back(event);
    }

    /// Stage a key event stamped one tick after the previous event.
    pub fn queue_key(&mut self, key: KeyCode, pressed: bool) {
        let timestamp = self.tick();
        self.queue(HardwareEvent::key(timestamp, key, pressed));
    }

    /// Stage a key event with modifiers held.
    pub fn queue_key_with_modifiers(&mut self, key: KeyCode, modifiers: Modifiers, pressed: bool) {
        let timestamp = self.tick();
        self.queue(HardwareEvent::key_with_modifiers(
            timestamp, key, modifiers, pressed,
        ));
    }

    /// Stage a mouse button event.
    pub fn queue_mouse(&mut self, buttons: MouseButtons, pressed: bool) {
        let timestamp = self.tick();
        self.queue(HardwareEvent::mouse(timestamp, buttons, pressed));
    }

    /// Stage a gamepad snapshot.
    pub fn queue_gamepad(&mut self, id: u8, buttons: GamepadButtons, axes: [f32; GAMEPAD_AXIS_COUNT]) {
        let timestamp = self.tick();
        self.queue(HardwareEvent::gamepad(timestamp, id, buttons, axes));
    }

    /// Number of events waiting for the next poll.
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl DeviceEventSource for ScriptedSource {
    fn poll_events(&mut self) {
        self.ready.extend(self.staged.drain(..));
    }

    fn next_event(&mut self) -> Option<HardwareEvent> {
        self.ready.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_kinds() {
        assert_eq!(HardwareEvent::key(0, KeyCode::KeyW, true).kind(), DeviceKind::Keyboard);
        assert_eq!(
            HardwareEvent::mouse(0, MouseButtons::LEFT, true).kind(),
            DeviceKind::Mouse
        );
        assert_eq!(
            HardwareEvent::gamepad(0, 0, GamepadButtons::empty(), [0.0; 6]).kind(),
            DeviceKind::Gamepad
        );
    }

    #[test]
    fn staged_events_wait_for_poll() {
        let mut source = ScriptedSource::new();
        source.queue_key(KeyCode::Space, true);
        assert_eq!(source.next_event(), None);
        assert_eq!(source.staged_len(), 1);

        source.poll_events();
        let event = source.next_event().unwrap();
        assert_eq!(event.kind(), DeviceKind::Keyboard);
        assert_eq!(source.next_event(), None);
    }

    #[test]
    fn events_keep_arrival_order() {
        let mut source = ScriptedSource::new();
        source.queue_key(KeyCode::KeyA, true);
        source.queue_key(KeyCode::KeyB, true);
        source.queue_key(KeyCode::KeyA, false);
        source.poll_events();

        let stamps: Vec<u64> = std::iter::from_fn(|| source.next_event())
            .map(|e| e.timestamp)
            .collect();
        assert_eq!(stamps, vec![1, 2, 3]);
    }

    #[test]
    fn merged_sources_interleave_by_timestamp() {
        let mut keys = ScriptedSource::new();
        keys.queue(HardwareEvent::key(1, KeyCode::KeyW, true));
        keys.queue(HardwareEvent::key(4, KeyCode::KeyW, false));
        let mut pads = ScriptedSource::new();
        pads.queue(HardwareEvent::gamepad(2, 0, GamepadButtons::SOUTH, [0.0; 6]));
        pads.queue(HardwareEvent::gamepad(4, 0, GamepadButtons::empty(), [0.0; 6]));

        let mut merged = MergedSource::new(keys, pads);
        merged.poll_events();
        let order: Vec<(u64, DeviceKind)> = std::iter::from_fn(|| merged.next_event())
            .map(|e| (e.timestamp, e.kind()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, DeviceKind::Keyboard),
                (2, DeviceKind::Gamepad),
                (4, DeviceKind::Keyboard),
                (4, DeviceKind::Gamepad),
            ]
        );
    }

    #[test]
    fn merged_source_with_missing_second() {
        let mut keys = ScriptedSource::new();
        keys.queue_key(KeyCode::Space, true);

        let mut merged = MergedSource::new(keys, None::<ScriptedSource>);
        merged.poll_events();
        assert_eq!(merged.next_event().map(|e| e.kind()), Some(DeviceKind::Keyboard));
        assert_eq!(merged.next_event(), None);
    }
}
