//! Bindings from physical controls to actions.

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::device::{DeviceKind, DevicePayload};
use crate::gamepad::{GamepadAxis, GamepadButton, GamepadControl};
use crate::modifiers::Modifiers;
use crate::mouse::MouseButton;

/// The physical control a binding listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "device", rename_all = "snake_case")]
pub enum BindingTarget {
    /// A keyboard key, optionally requiring modifiers.
    #[serde(rename = "keyboard")]
    Key {
        key: KeyCode,
        #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
        modifiers: Modifiers,
    },
    /// A mouse button.
    Mouse { button: MouseButton },
    /// A button or axis on one gamepad.
    Gamepad {
        #[serde(default)]
        id: u8,
        control: GamepadControl,
    },
}

impl BindingTarget {
    /// Device kind this target listens to.
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        match self {
            Self::Key { .. } => DeviceKind::Keyboard,
            Self::Mouse { .. } => DeviceKind::Mouse,
            Self::Gamepad { .. } => DeviceKind::Gamepad,
        }
    }

    /// Read this control from an event payload.
    ///
    /// Returns `None` when the payload does not match. Digital controls read
    /// `0.0` or `1.0`, axes their raw sample.
    #[must_use]
    pub fn sample(&self, payload: &DevicePayload) -> Option<f32> {
        match (self, payload) {
            (
                Self::Key { key, modifiers },
                DevicePayload::Keyboard {
                    key: event_key,
                    modifiers: held,
                    pressed,
                },
            ) => {
                // Key-up matches on the key alone so the modifier may be let go first.
                let modifiers_ok = !*pressed || held.satisfies(*modifiers);
                (key == event_key && modifiers_ok).then_some(digital(*pressed))
            }
            (Self::Mouse { button }, DevicePayload::Mouse { buttons, pressed, .. }) => {
                buttons.contains(button.mask()).then_some(digital(*pressed))
            }
            (
                Self::Gamepad { id, control },
                DevicePayload::Gamepad {
                    id: event_id,
                    buttons,
                    axes,
                },
            ) => (id == event_id).then(|| control.read(*buttons, axes)),
            _ => None,
        }
    }

    /// Returns `true` if an event with this payload is for this control.
    #[must_use]
    pub fn matches(&self, payload: &DevicePayload) -> bool {
        self.sample(payload).is_some()
    }
}

#[inline]
const fn digital(pressed: bool) -> f32 {
    if pressed {
        1.0
    } else {
        0.0
    }
}

const fn default_scale() -> f32 {
    1.0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::float_cmp)]
fn is_unit_scale(value: &f32) -> bool {
    *value == 1.0
}

/// A physical control bound to an action, with analog shaping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(flatten)]
    pub target: BindingTarget,
    /// Multiplier applied to the raw sample.
    #[serde(default = "default_scale", skip_serializing_if = "is_unit_scale")]
    pub scale: f32,
    /// Negate the scaled sample.
    #[serde(default, skip_serializing_if = "is_false")]
    pub invert: bool,
}

impl Binding {
    /// Create a binding with unit scale and no inversion.
    #[must_use]
    pub const fn new(target: BindingTarget) -> Self {
        Self {
            target,
            scale: 1.0,
            invert: false,
        }
    }

    /// Bind a keyboard key.
    #[must_use]
    pub const fn key(key: KeyCode) -> Self {
        Self::key_with_modifiers(key, Modifiers::empty())
    }

    /// Bind a keyboard key that requires modifiers.
    #[must_use]
    pub const fn key_with_modifiers(key: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(BindingTarget::Key { key, modifiers })
    }

    /// Bind a mouse button.
    #[must_use]
    pub const fn mouse(button: MouseButton) -> Self {
        Self::new(BindingTarget::Mouse { button })
    }

    /// Bind a gamepad button.
    #[must_use]
    pub const fn gamepad_button(id: u8, button: GamepadButton) -> Self {
        Self::new(BindingTarget::Gamepad {
            id,
            control: GamepadControl::Button(button),
        })
    }

    /// Bind a gamepad axis.
    #[must_use]
    pub const fn gamepad_axis(id: u8, axis: GamepadAxis) -> Self {
        Self::new(BindingTarget::Gamepad {
            id,
            control: GamepadControl::Axis(axis),
        })
    }

    /// Set the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the invert flag.
    #[must_use]
    pub const fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Device kind this binding listens to.
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        self.target.kind()
    }

    /// Shape a raw sample with this binding's scale and invert flag.
    #[inline]
    #[must_use]
    pub fn shape(&self, raw: f32) -> f32 {
        let value = raw * self.scale;
        if self.invert {
            -value
        } else {
            value
        }
    }

    /// Value this binding contributes for an event, or `None` if it does not match.
    #[must_use]
    pub fn resolve(&self, payload: &DevicePayload) -> Option<f32> {
        self.target.sample(payload).map(|raw| self.shape(raw))
    }
}

impl From<KeyCode> for Binding {
    fn from(key: KeyCode) -> Self {
        Self::key(key)
    }
}

impl From<MouseButton> for Binding {
    fn from(button: MouseButton) -> Self {
        Self::mouse(button)
    }
}

impl From<BindingTarget> for Binding {
    fn from(target: BindingTarget) -> Self {
        Self::new(target)
    }
}
