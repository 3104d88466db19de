//! Device event source fed from winit window events.

use std::collections::VecDeque;
use std::time::Instant;

use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::device::{DeviceEventSource, DevicePayload, HardwareEvent};
use crate::modifiers::Modifiers;
use crate::mouse::{MouseButton, MouseButtons};

/// Converts winit window events into hardware events.
///
/// Events are buffered as they arrive and become visible to the service on
/// the next [`poll_events`](DeviceEventSource::poll_events).
///
/// # Usage
///
/// ```ignore
/// // In ApplicationHandler::window_event
/// input.source_mut().process_window_event(&event);
///
/// // In about_to_wait
/// input.process_frame(dt);
/// ```
#[derive(Debug)]
pub struct WinitEventSource {
    start: Instant,
    modifiers: Modifiers,
    cursor: Vec2,
    wheel: Vec2,
    pending: VecDeque<HardwareEvent>,
    ready: VecDeque<HardwareEvent>,
}

impl Default for WinitEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WinitEventSource {
    /// Create a source whose clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            modifiers: Modifiers::empty(),
            cursor: Vec2::ZERO,
            wheel: Vec2::ZERO,
            pending: VecDeque::new(),
            ready: VecDeque::new(),
        }
    }

    /// Measure timestamps from `start`, e.g. to share a clock with another source.
    #[must_use]
    pub const fn with_clock_start(mut self, start: Instant) -> Self {
        self.start = start;
        self
    }

    /// Process a window event.
    ///
    /// Returns `true` if the event was consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return false;
                };
                if !event.repeat {
                    self.key_input(key, event.state == ElementState::Pressed);
                }
                true
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.set_modifiers(Modifiers::from(modifiers.state()));
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x, position.y);
                true
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let Ok(button) = MouseButton::try_from(*button) else {
                    return false;
                };
                self.mouse_input(button, *state == ElementState::Pressed);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll(*delta);
                true
            }
            _ => false,
        }
    }

    /// Record a key going down or up with the current modifiers.
    pub fn key_input(&mut self, key: KeyCode, pressed: bool) {
        let payload = DevicePayload::Keyboard {
            key,
            modifiers: self.modifiers,
            pressed,
        };
        self.push(payload);
    }

    /// Record a mouse button going down or up at the current cursor position.
    pub fn mouse_input(&mut self, button: MouseButton, pressed: bool) {
        let payload = DevicePayload::Mouse {
            buttons: MouseButtons::from(button),
            pressed,
            position: self.cursor,
            wheel: std::mem::take(&mut self.wheel),
        };
        self.push(payload);
    }

    /// Update the held modifier keys.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Update the cursor position in window coordinates.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Vec2::new(x as f32, y as f32);
    }

    /// Accumulate wheel movement, reported with the next mouse button event.
    #[allow(clippy::cast_possible_truncation)]
    pub fn scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => self.wheel += Vec2::new(x, y),
            MouseScrollDelta::PixelDelta(pos) => {
                // Roughly one line per 100 pixels
                self.wheel += Vec2::new(pos.x as f32, pos.y as f32) / 100.0;
            }
        }
    }

    /// Currently held modifier keys.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Last known cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Events waiting for the next poll.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn push(&mut self, payload: DevicePayload) {
        let timestamp = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.pending.push_back(HardwareEvent::new(timestamp, payload));
    }
}

impl DeviceEventSource for WinitEventSource {
    fn poll_events(&mut self) {
        self.ready.extend(self.pending.drain(..));
    }

    fn next_event(&mut self) -> Option<HardwareEvent> {
        self.ready.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_events_carry_modifiers() {
        let mut source = WinitEventSource::new();
        source.set_modifiers(Modifiers::CTRL);
        source.key_input(KeyCode::KeyS, true);
        source.poll_events();

        let event = source.next_event().unwrap();
        assert_eq!(
            event.payload,
            DevicePayload::Keyboard {
                key: KeyCode::KeyS,
                modifiers: Modifiers::CTRL,
                pressed: true,
            }
        );
    }

    #[test]
    fn mouse_events_report_position_and_wheel() {
        let mut source = WinitEventSource::new();
        source.cursor_moved(120.0, 48.0);
        source.scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        source.mouse_input(MouseButton::Right, true);
        source.mouse_input(MouseButton::Right, false);
        source.poll_events();

        let DevicePayload::Mouse {
            buttons,
            pressed,
            position,
            wheel,
        } = source.next_event().unwrap().payload
        else {
            panic!("expected a mouse event");
        };
        assert_eq!(buttons, MouseButtons::RIGHT);
        assert!(pressed);
        assert_eq!(position, Vec2::new(120.0, 48.0));
        assert_eq!(wheel, Vec2::new(0.0, 2.0));

        let DevicePayload::Mouse { pressed, wheel, .. } = source.next_event().unwrap().payload
        else {
            panic!("expected a mouse event");
        };
        assert!(!pressed);
        assert_eq!(wheel, Vec2::ZERO);
    }

    #[test]
    fn events_wait_for_poll() {
        let mut source = WinitEventSource::new();
        source.key_input(KeyCode::Space, true);
        assert_eq!(source.pending_len(), 1);
        assert!(source.next_event().is_none());

        source.poll_events();
        assert!(source.next_event().is_some());
        assert_eq!(source.pending_len(), 0);
    }

    #[test]
    fn timestamps_do_not_go_backwards() {
        let mut source = WinitEventSource::new();
        source.key_input(KeyCode::KeyA, true);
        source.key_input(KeyCode::KeyA, false);
        source.poll_events();
        let first = source.next_event().unwrap().timestamp;
        let second = source.next_event().unwrap().timestamp;
        assert!(second >= first);
    }

    #[test]
    fn shared_clock_start() {
        let start = Instant::now()
            .checked_sub(std::time::Duration::from_secs(5))
            .unwrap();
        let mut source = WinitEventSource::new().with_clock_start(start);
        source.key_input(KeyCode::KeyA, true);
        source.poll_events();
        assert!(source.next_event().unwrap().timestamp >= 5000);
    }
}
