//! Semantic actions consumed by gameplay and UI code.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

macro_rules! actions {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)+) => {
        /// A device-independent input capability.
        ///
        /// Actions carry no state; the service tracks one `ActionState` per action.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Action {
            $($(#[$doc])* $variant,)+
        }

        impl Action {
            /// Every action, in index order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Number of actions.
            pub const COUNT: usize = Self::ALL.len();

            /// Stable snake_case name used in binding profiles.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Look up an action by its profile name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

actions! {
    /// Menu navigation up.
    UiUp => "ui_up",
    /// Menu navigation down.
    UiDown => "ui_down",
    /// Menu navigation left.
    UiLeft => "ui_left",
    /// Menu navigation right.
    UiRight => "ui_right",
    /// Accept the focused menu entry.
    UiConfirm => "ui_confirm",
    /// Back out of the current menu.
    UiCancel => "ui_cancel",
    /// Open the in-game menu.
    UiMenu => "ui_menu",
    MoveForward => "move_forward",
    MoveBackward => "move_backward",
    MoveLeft => "move_left",
    MoveRight => "move_right",
    MoveUp => "move_up",
    MoveDown => "move_down",
    /// Main engine thrust.
    ThrustForward => "thrust_forward",
    /// Reverse thrust.
    ThrustBack => "thrust_back",
    PitchUp => "pitch_up",
    PitchDown => "pitch_down",
    YawLeft => "yaw_left",
    YawRight => "yaw_right",
    RollLeft => "roll_left",
    RollRight => "roll_right",
    /// Vertical translation up.
    VerticalUp => "vertical_up",
    /// Vertical translation down.
    VerticalDown => "vertical_down",
    Boost => "boost",
    Brake => "brake",
    /// Primary fire / interact.
    Primary => "primary",
    /// Secondary fire / interact.
    Secondary => "secondary",
    CameraPitch => "camera_pitch",
    CameraYaw => "camera_yaw",
    CameraZoom => "camera_zoom",
    /// Toggle the debug overlay.
    DebugToggle => "debug_toggle",
    Screenshot => "screenshot",
    Quit => "quit",
}

impl Action {
    /// Dense index of this action, in `0..Action::COUNT`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up an action by dense index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownAction(s.to_string()))
    }
}
