//! Built-in bindings.

use winit::keyboard::KeyCode;

use crate::action::Action;
use crate::binding::Binding;
use crate::binding_table::BindingTable;
use crate::context::InputContext;
use crate::gamepad::{GamepadAxis, GamepadButton};
use crate::modifiers::Modifiers;
use crate::mouse::MouseButton;

use Action as A;
use InputContext as C;

const fn pad_axis(axis: GamepadAxis) -> Binding {
    Binding::gamepad_axis(0, axis)
}

const fn pad_button(button: GamepadButton) -> Binding {
    Binding::gamepad_button(0, button)
}

/// Built-in bindings in registration order.
///
/// Each stick axis drives both actions of its pair, one of them inverted.
/// Deflecting the stick therefore presses both actions with the same
/// magnitude and opposite signs: stick down (`LeftStickY = -0.8`) reads
/// `+0.8` on `PitchUp` and `-0.8` on `PitchDown`. Consumers combine a pair by
/// reading the positive half, or by taking either action as a signed axis.
pub const DEFAULT_BINDINGS: &[(InputContext, Action, Binding)] = &[
    // Gameplay: gamepad, first pad only.
    (C::Gameplay, A::ThrustForward, pad_axis(GamepadAxis::RightTrigger)),
    (C::Gameplay, A::ThrustBack, pad_axis(GamepadAxis::LeftTrigger)),
    (C::Gameplay, A::PitchUp, pad_axis(GamepadAxis::LeftStickY).with_invert(true)),
    (C::Gameplay, A::PitchDown, pad_axis(GamepadAxis::LeftStickY)),
    (C::Gameplay, A::YawLeft, pad_axis(GamepadAxis::LeftStickX).with_invert(true)),
    (C::Gameplay, A::YawRight, pad_axis(GamepadAxis::LeftStickX)),
    (C::Gameplay, A::RollLeft, pad_axis(GamepadAxis::RightStickX).with_invert(true)),
    (C::Gameplay, A::RollRight, pad_axis(GamepadAxis::RightStickX)),
    (C::Gameplay, A::VerticalUp, pad_axis(GamepadAxis::RightStickY).with_invert(true)),
    (C::Gameplay, A::VerticalDown, pad_axis(GamepadAxis::RightStickY)),
    (C::Gameplay, A::Boost, pad_button(GamepadButton::South)),
    (C::Gameplay, A::Brake, pad_button(GamepadButton::East)),
    (C::Gameplay, A::Secondary, pad_button(GamepadButton::LeftBumper)),
    (C::Gameplay, A::Primary, pad_button(GamepadButton::RightBumper)),
    (C::Gameplay, A::UiMenu, pad_button(GamepadButton::Start)),
    // Gameplay: keyboard.
    (C::Gameplay, A::ThrustForward, Binding::key(KeyCode::KeyW)),
    (C::Gameplay, A::ThrustBack, Binding::key(KeyCode::KeyS)),
    (C::Gameplay, A::YawLeft, Binding::key(KeyCode::KeyA)),
    (C::Gameplay, A::YawRight, Binding::key(KeyCode::KeyD)),
    (C::Gameplay, A::PitchUp, Binding::key(KeyCode::ArrowUp)),
    (C::Gameplay, A::PitchDown, Binding::key(KeyCode::ArrowDown)),
    (C::Gameplay, A::YawLeft, Binding::key(KeyCode::ArrowLeft)),
    (C::Gameplay, A::YawRight, Binding::key(KeyCode::ArrowRight)),
    (C::Gameplay, A::RollLeft, Binding::key(KeyCode::KeyQ)),
    (C::Gameplay, A::RollRight, Binding::key(KeyCode::KeyE)),
    (C::Gameplay, A::VerticalUp, Binding::key(KeyCode::Space)),
    (C::Gameplay, A::VerticalDown, Binding::key(KeyCode::ControlLeft)),
    (C::Gameplay, A::Boost, Binding::key(KeyCode::ShiftLeft)),
    (C::Gameplay, A::Brake, Binding::key(KeyCode::Tab)),
    (C::Gameplay, A::UiMenu, Binding::key(KeyCode::Escape)),
    (C::Gameplay, A::DebugToggle, Binding::key(KeyCode::F3)),
    (C::Gameplay, A::Screenshot, Binding::key(KeyCode::F12)),
    // Gameplay: mouse.
    (C::Gameplay, A::Primary, Binding::mouse(MouseButton::Left)),
    (C::Gameplay, A::Secondary, Binding::mouse(MouseButton::Right)),
    // Menu.
    (C::Menu, A::UiUp, Binding::key(KeyCode::ArrowUp)),
    (C::Menu, A::UiUp, Binding::key(KeyCode::KeyW)),
    (C::Menu, A::UiUp, pad_button(GamepadButton::DPadUp)),
    (C::Menu, A::UiDown, Binding::key(KeyCode::ArrowDown)),
    (C::Menu, A::UiDown, Binding::key(KeyCode::KeyS)),
    (C::Menu, A::UiDown, pad_button(GamepadButton::DPadDown)),
    (C::Menu, A::UiLeft, Binding::key(KeyCode::ArrowLeft)),
    (C::Menu, A::UiLeft, pad_button(GamepadButton::DPadLeft)),
    (C::Menu, A::UiRight, Binding::key(KeyCode::ArrowRight)),
    (C::Menu, A::UiRight, pad_button(GamepadButton::DPadRight)),
    (C::Menu, A::UiConfirm, Binding::key(KeyCode::Enter)),
    (C::Menu, A::UiConfirm, Binding::key(KeyCode::Space)),
    (C::Menu, A::UiConfirm, pad_button(GamepadButton::South)),
    (C::Menu, A::UiCancel, Binding::key(KeyCode::Escape)),
    (C::Menu, A::UiCancel, pad_button(GamepadButton::East)),
    (C::Menu, A::Quit, Binding::key_with_modifiers(KeyCode::KeyQ, Modifiers::CTRL)),
    // Dialog.
    (C::Dialog, A::UiConfirm, Binding::key(KeyCode::Enter)),
    (C::Dialog, A::UiConfirm, Binding::key(KeyCode::Space)),
    (C::Dialog, A::UiConfirm, pad_button(GamepadButton::South)),
    (C::Dialog, A::UiCancel, Binding::key(KeyCode::Escape)),
    (C::Dialog, A::UiCancel, pad_button(GamepadButton::East)),
    // Debug.
    (C::Debug, A::DebugToggle, Binding::key(KeyCode::F3)),
    (C::Debug, A::Screenshot, Binding::key(KeyCode::F12)),
    (C::Debug, A::CameraPitch, pad_axis(GamepadAxis::RightStickY).with_invert(true)),
    (C::Debug, A::CameraYaw, pad_axis(GamepadAxis::RightStickX)),
    (C::Debug, A::CameraZoom, pad_axis(GamepadAxis::RightTrigger)),
    (C::Debug, A::CameraZoom, pad_axis(GamepadAxis::LeftTrigger).with_invert(true)),
];

/// Append the built-in bindings to `table`.
///
/// Returns the number of bindings dropped because their list was full.
pub fn install_defaults(table: &mut BindingTable) -> usize {
    let mut dropped = 0;
    for &(context, action, binding) in DEFAULT_BINDINGS {
        if table.bind(action, context, binding).is_err() {
            dropped += 1;
        }
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingTarget;
    use crate::binding_table::MAX_BINDINGS_PER_ACTION;
    use crate::device::DeviceKind;
    use crate::gamepad::GamepadControl;

    fn installed() -> BindingTable {
        let mut table = BindingTable::new();
        assert_eq!(install_defaults(&mut table), 0);
        table
    }

    #[test]
    fn defaults_fit_capacity() {
        let table = installed();
        let total: usize = InputContext::ALL.iter().map(|c| table.len_in(*c)).sum();
        assert_eq!(total, DEFAULT_BINDINGS.len());
        for context in InputContext::ALL {
            for (_, list) in table.context_lists(context) {
                assert!(list.len() <= MAX_BINDINGS_PER_ACTION);
            }
        }
    }

    #[test]
    fn triggers_drive_thrust() {
        let table = installed();
        let forward = table.bindings(Action::ThrustForward, InputContext::Gameplay);
        assert_eq!(
            forward.get(0).map(|b| b.target),
            Some(BindingTarget::Gamepad {
                id: 0,
                control: GamepadControl::Axis(GamepadAxis::RightTrigger),
            })
        );
        assert_eq!(GamepadAxis::RightTrigger.index(), 5);
        assert_eq!(GamepadAxis::LeftTrigger.index(), 4);
    }

    #[test]
    fn stick_pairs_read_opposite_signs() {
        use crate::device::DevicePayload;
        use crate::gamepad::GamepadButtons;

        let table = installed();
        let mut axes = [0.0; 6];
        axes[GamepadAxis::LeftStickY.index()] = -0.8;
        let payload = DevicePayload::Gamepad {
            id: 0,
            buttons: GamepadButtons::empty(),
            axes,
        };
        let read = |action| {
            table
                .bindings(action, InputContext::Gameplay)
                .iter()
                .find_map(|b| b.resolve(&payload))
        };

        assert_eq!(read(Action::PitchUp), Some(0.8));
        assert_eq!(read(Action::PitchDown), Some(-0.8));
    }

    #[test]
    fn every_gameplay_flight_action_has_a_key() {
        let table = installed();
        let flight = [
            Action::ThrustForward,
            Action::ThrustBack,
            Action::PitchUp,
            Action::PitchDown,
            Action::YawLeft,
            Action::YawRight,
            Action::RollLeft,
            Action::RollRight,
            Action::VerticalUp,
            Action::VerticalDown,
            Action::Boost,
            Action::Brake,
        ];
        for action in flight {
            let has_key = table
                .bindings(action, InputContext::Gameplay)
                .iter()
                .any(|b| b.kind() == DeviceKind::Keyboard);
            assert!(has_key, "{action} has no key binding");
        }
    }

    #[test]
    fn mouse_buttons_fire_weapons() {
        let table = installed();
        assert!(table
            .bindings(Action::Primary, InputContext::Gameplay)
            .iter()
            .any(|b| b == Binding::mouse(MouseButton::Left)));
        assert!(table
            .bindings(Action::Secondary, InputContext::Gameplay)
            .iter()
            .any(|b| b == Binding::mouse(MouseButton::Right)));
    }

    #[test]
    fn menu_navigation_bound() {
        let table = installed();
        for action in [Action::UiUp, Action::UiDown, Action::UiConfirm, Action::UiCancel] {
            assert!(table.is_bound(action, InputContext::Menu));
        }
        assert!(!table.is_bound(Action::ThrustForward, InputContext::Menu));
    }
}
