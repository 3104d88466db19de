//! Mouse buttons and button masks.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use winit::event::MouseButton as WinitMouseButton;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    /// Bit index of this button in a [`MouseButtons`] mask.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The single-button mask for this button.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> MouseButtons {
        MouseButtons::from_bits_truncate(1 << self.index())
    }
}

impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Middle => Ok(Self::Middle),
            WinitMouseButton::Back => Ok(Self::Back),
            WinitMouseButton::Forward => Ok(Self::Forward),
            WinitMouseButton::Other(_) => Err(()),
        }
    }
}

bitflags! {
    /// Set of mouse buttons reported by one mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT    = 1 << 0;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        button.mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_line_up_with_flags() {
        assert_eq!(MouseButton::Left.mask(), MouseButtons::LEFT);
        assert_eq!(MouseButton::Right.mask(), MouseButtons::RIGHT);
        assert_eq!(MouseButton::Middle.mask(), MouseButtons::MIDDLE);
        assert_eq!(MouseButton::Back.mask(), MouseButtons::BACK);
        assert_eq!(MouseButton::Forward.mask(), MouseButtons::FORWARD);
    }

    #[test]
    fn other_winit_buttons_rejected() {
        assert_eq!(MouseButton::try_from(WinitMouseButton::Left), Ok(MouseButton::Left));
        assert!(MouseButton::try_from(WinitMouseButton::Other(9)).is_err());
    }
}
