//! Gamepad buttons and axes (Xbox-style layout).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Number of analog axes reported per gamepad sample.
pub const GAMEPAD_AXIS_COUNT: usize = 6;

/// Digital gamepad button. The discriminant is its bit in [`GamepadButtons`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GamepadButton {
    /// A
    South = 0,
    /// B
    East = 1,
    /// X
    West = 2,
    /// Y
    North = 3,
    LeftBumper = 4,
    RightBumper = 5,
    /// Digital read of the left trigger.
    LeftTrigger = 6,
    /// Digital read of the right trigger.
    RightTrigger = 7,
    Select = 8,
    Start = 9,
    LeftStick = 10,
    RightStick = 11,
    DPadUp = 12,
    DPadDown = 13,
    DPadLeft = 14,
    DPadRight = 15,
    Guide = 16,
}

impl GamepadButton {
    /// Every button, in bit order.
    pub const ALL: [Self; 17] = [
        Self::South,
        Self::East,
        Self::West,
        Self::North,
        Self::LeftBumper,
        Self::RightBumper,
        Self::LeftTrigger,
        Self::RightTrigger,
        Self::Select,
        Self::Start,
        Self::LeftStick,
        Self::RightStick,
        Self::DPadUp,
        Self::DPadDown,
        Self::DPadLeft,
        Self::DPadRight,
        Self::Guide,
    ];

    /// Bit index of this button.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The single-button mask for this button.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> GamepadButtons {
        GamepadButtons::from_bits_retain(1 << self.index())
    }
}

bitflags! {
    /// Buttons held in one gamepad sample.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GamepadButtons: u32 {
        const SOUTH = 1 << 0;
        const EAST = 1 << 1;
        const WEST = 1 << 2;
        const NORTH = 1 << 3;
        const LEFT_BUMPER = 1 << 4;
        const RIGHT_BUMPER = 1 << 5;
        const LEFT_TRIGGER = 1 << 6;
        const RIGHT_TRIGGER = 1 << 7;
        const SELECT = 1 << 8;
        const START = 1 << 9;
        const LEFT_STICK = 1 << 10;
        const RIGHT_STICK = 1 << 11;
        const DPAD_UP = 1 << 12;
        const DPAD_DOWN = 1 << 13;
        const DPAD_LEFT = 1 << 14;
        const DPAD_RIGHT = 1 << 15;
        const GUIDE = 1 << 16;
    }
}

impl GamepadButtons {
    /// Returns `true` if `button` is held in this sample.
    #[inline]
    #[must_use]
    pub const fn is_held(self, button: GamepadButton) -> bool {
        self.contains(button.mask())
    }
}

/// Analog gamepad axis. The discriminant is its slot in the axes array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GamepadAxis {
    LeftStickX = 0,
    LeftStickY = 1,
    RightStickX = 2,
    RightStickY = 3,
    /// Analog left trigger, `0.0..=1.0`.
    LeftTrigger = 4,
    /// Analog right trigger, `0.0..=1.0`.
    RightTrigger = 5,
}

impl GamepadAxis {
    /// Every axis, in slot order.
    pub const ALL: [Self; GAMEPAD_AXIS_COUNT] = [
        Self::LeftStickX,
        Self::LeftStickY,
        Self::RightStickX,
        Self::RightStickY,
        Self::LeftTrigger,
        Self::RightTrigger,
    ];

    /// Slot of this axis in a sample's axes array.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up an axis by slot.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// One physical gamepad control: a button or an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamepadControl {
    Button(GamepadButton),
    Axis(GamepadAxis),
}

impl GamepadControl {
    /// Returns `true` for analog axes.
    #[inline]
    #[must_use]
    pub const fn is_axis(self) -> bool {
        matches!(self, Self::Axis(_))
    }

    /// Read this control from a sample.
    ///
    /// Buttons read as `0.0` or `1.0`, axes as their raw value.
    #[must_use]
    pub fn read(self, buttons: GamepadButtons, axes: &[f32; GAMEPAD_AXIS_COUNT]) -> f32 {
        match self {
            Self::Button(button) => {
                if buttons.is_held(button) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Axis(axis) => axes[axis.index()],
        }
    }
}

impl From<GamepadButton> for GamepadControl {
    fn from(button: GamepadButton) -> Self {
        Self::Button(button)
    }
}

impl From<GamepadAxis> for GamepadControl {
    fn from(axis: GamepadAxis) -> Self {
        Self::Axis(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_masks_match_flags() {
        assert_eq!(GamepadButton::South.mask(), GamepadButtons::SOUTH);
        assert_eq!(GamepadButton::RightBumper.mask(), GamepadButtons::RIGHT_BUMPER);
        assert_eq!(GamepadButton::Guide.mask(), GamepadButtons::GUIDE);
        for (i, button) in GamepadButton::ALL.iter().enumerate() {
            assert_eq!(usize::from(button.index()), i);
        }
    }

    #[test]
    fn trigger_axes_use_slots_four_and_five() {
        assert_eq!(GamepadAxis::LeftTrigger.index(), 4);
        assert_eq!(GamepadAxis::RightTrigger.index(), 5);
        assert_eq!(GamepadAxis::from_index(5), Some(GamepadAxis::RightTrigger));
        assert_eq!(GamepadAxis::from_index(6), None);
    }

    #[test]
    fn read_buttons_and_axes() {
        let axes = [0.0, -0.5, 0.0, 0.0, 0.0, 0.6];
        let held = GamepadButtons::EAST;

        assert_eq!(GamepadControl::Button(GamepadButton::East).read(held, &axes), 1.0);
        assert_eq!(GamepadControl::Button(GamepadButton::South).read(held, &axes), 0.0);
        assert_eq!(GamepadControl::Axis(GamepadAxis::LeftStickY).read(held, &axes), -0.5);
        assert_eq!(GamepadControl::Axis(GamepadAxis::RightTrigger).read(held, &axes), 0.6);
    }
}
