//! Gamepad device source backed by gilrs.

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use hashbrown::HashMap;
use tracing::{debug, info, warn};

use crate::device::{DeviceEventSource, HardwareEvent};
use crate::error::{Error, Result};
use crate::gamepad::{GamepadAxis, GamepadButton, GamepadButtons, GAMEPAD_AXIS_COUNT};

/// Last known state of one gamepad.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PadState {
    buttons: GamepadButtons,
    axes: [f32; GAMEPAD_AXIS_COUNT],
}

impl PadState {
    fn set_button(&mut self, button: GamepadButton, pressed: bool) {
        self.buttons.set(button.mask(), pressed);
    }

    fn set_axis(&mut self, axis: GamepadAxis, value: f32) {
        self.axes[axis.index()] = value;
    }

    /// Apply a gilrs event. Returns `false` if nothing changed.
    fn apply(&mut self, event: EventType) -> bool {
        match event {
            EventType::ButtonPressed(button, _) | EventType::ButtonReleased(button, _) => {
                let Some(button) = map_button(button) else {
                    return false;
                };
                let pressed = matches!(event, EventType::ButtonPressed(..));
                self.set_button(button, pressed);
                true
            }
            EventType::ButtonChanged(button, value, _) => {
                let Some(axis) = trigger_axis(button) else {
                    return false;
                };
                self.set_axis(axis, value);
                true
            }
            EventType::AxisChanged(axis, value, _) => {
                let Some(axis) = map_axis(axis) else {
                    return false;
                };
                self.set_axis(axis, value);
                true
            }
            _ => false,
        }
    }
}

/// Reads every connected gamepad through gilrs.
///
/// Each change produces a full snapshot of the pad's buttons and six axes.
/// A disconnect produces a zeroed snapshot so held actions are released.
pub struct GilrsEventSource {
    gilrs: Gilrs,
    start: Instant,
    pads: HashMap<GamepadId, PadState>,
    ready: VecDeque<HardwareEvent>,
}

impl fmt::Debug for GilrsEventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GilrsEventSource")
            .field("pads", &self.pads.len())
            .field("ready", &self.ready.len())
            .finish_non_exhaustive()
    }
}

impl GilrsEventSource {
    /// Initialize gilrs.
    pub fn new() -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|err| Error::Device(err.to_string()))?;
        for (id, gamepad) in gilrs.gamepads() {
            info!(id = usize::from(id), name = gamepad.name(), "Gamepad found");
        }
        Ok(Self {
            gilrs,
            start: Instant::now(),
            pads: HashMap::new(),
            ready: VecDeque::new(),
        })
    }

    /// Measure timestamps from `start`, e.g. to share a clock with another source.
    #[must_use]
    pub const fn with_clock_start(mut self, start: Instant) -> Self {
        self.start = start;
        self
    }

    /// Number of gamepads that reported at least one event.
    #[must_use]
    pub fn active_pads(&self) -> usize {
        self.pads.len()
    }

    fn timestamp(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn snapshot(&mut self, id: GamepadId, state: PadState) {
        let Ok(pad) = u8::try_from(usize::from(id)) else {
            warn!(id = usize::from(id), "Gamepad id out of range, event ignored");
            return;
        };
        let timestamp = self.timestamp();
        self.ready.push_back(HardwareEvent::gamepad(
            timestamp,
            pad,
            state.buttons,
            state.axes,
        ));
    }
}

impl DeviceEventSource for GilrsEventSource {
    fn poll_events(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!(id = usize::from(id), "Gamepad connected");
                }
                EventType::Disconnected => {
                    info!(id = usize::from(id), "Gamepad disconnected");
                    if self.pads.remove(&id).is_some() {
                        self.snapshot(id, PadState::default());
                    }
                }
                event => {
                    let state = self.pads.entry(id).or_default();
                    if state.apply(event) {
                        let state = *state;
                        self.snapshot(id, state);
                    } else {
                        debug!(?event, "Ignoring gamepad event");
                    }
                }
            }
        }
    }

    fn next_event(&mut self) -> Option<HardwareEvent> {
        self.ready.pop_front()
    }
}

const fn map_button(button: Button) -> Option<GamepadButton> {
    Some(match button {
        Button::South => GamepadButton::South,
        Button::East => GamepadButton::East,
        Button::West => GamepadButton::West,
        Button::North => GamepadButton::North,
        Button::LeftTrigger => GamepadButton::LeftBumper,
        Button::RightTrigger => GamepadButton::RightBumper,
        Button::LeftTrigger2 => GamepadButton::LeftTrigger,
        Button::RightTrigger2 => GamepadButton::RightTrigger,
        Button::Select => GamepadButton::Select,
        Button::Start => GamepadButton::Start,
        Button::LeftThumb => GamepadButton::LeftStick,
        Button::RightThumb => GamepadButton::RightStick,
        Button::DPadUp => GamepadButton::DPadUp,
        Button::DPadDown => GamepadButton::DPadDown,
        Button::DPadLeft => GamepadButton::DPadLeft,
        Button::DPadRight => GamepadButton::DPadRight,
        Button::Mode => GamepadButton::Guide,
        _ => return None,
    })
}

/// Analog triggers arrive as button value changes on most backends.
const fn trigger_axis(button: Button) -> Option<GamepadAxis> {
    match button {
        Button::LeftTrigger2 => Some(GamepadAxis::LeftTrigger),
        Button::RightTrigger2 => Some(GamepadAxis::RightTrigger),
        _ => None,
    }
}

const fn map_axis(axis: Axis) -> Option<GamepadAxis> {
    match axis {
        Axis::LeftStickX => Some(GamepadAxis::LeftStickX),
        Axis::LeftStickY => Some(GamepadAxis::LeftStickY),
        Axis::RightStickX => Some(GamepadAxis::RightStickX),
        Axis::RightStickY => Some(GamepadAxis::RightStickY),
        Axis::LeftZ => Some(GamepadAxis::LeftTrigger),
        Axis::RightZ => Some(GamepadAxis::RightTrigger),
        _ => None,
    }
}
