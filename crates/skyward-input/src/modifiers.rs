//! Modifier key flags.

use bitflags::bitflags;
use winit::keyboard::ModifiersState;

bitflags! {
    /// Modifier key mask carried by keyboard events and key bindings.
    ///
    /// A key binding with a non-empty mask only matches events whose
    /// modifiers contain every bit of the mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[derive(serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        /// Shift key is held.
        const SHIFT = 0b0000_0001;
        /// Control key is held.
        const CTRL  = 0b0000_0010;
        /// Alt key is held.
        const ALT   = 0b0000_0100;
        /// Super/Windows/Command key is held.
        const SUPER = 0b0000_1000;
    }
}

impl Modifiers {
    /// Returns `true` if every modifier in `required` is held.
    ///
    /// An empty requirement is always satisfied.
    #[inline]
    #[must_use]
    pub const fn satisfies(self, required: Self) -> bool {
        self.contains(required)
    }

    /// Returns `true` if the Shift key is held.
    #[inline]
    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Returns `true` if the Control key is held.
    #[inline]
    #[must_use]
    pub const fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut modifiers = Self::empty();
        if state.shift_key() {
            modifiers |= Self::SHIFT;
        }
        if state.control_key() {
            modifiers |= Self::CTRL;
        }
        if state.alt_key() {
            modifiers |= Self::ALT;
        }
        if state.super_key() {
            modifiers |= Self::SUPER;
        }
        modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_requirement_always_satisfied() {
        assert!(Modifiers::empty().satisfies(Modifiers::empty()));
        assert!(Modifiers::ALT.satisfies(Modifiers::empty()));
    }

    #[test]
    fn subset_test() {
        let held = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(held.satisfies(Modifiers::CTRL));
        assert!(held.satisfies(Modifiers::SHIFT | Modifiers::CTRL));
        assert!(!held.satisfies(Modifiers::CTRL | Modifiers::ALT));
        assert!(!Modifiers::SHIFT.satisfies(Modifiers::CTRL));
    }

    #[test]
    fn from_winit_state() {
        let state = ModifiersState::SHIFT | ModifiersState::ALT;
        let mods = Modifiers::from(state);
        assert!(mods.shift());
        assert!(!mods.ctrl());
        assert!(mods.contains(Modifiers::ALT));
    }
}
