//! Per-action value and edge tracking.

/// Edge reported by an [`ActionState`] update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Crossed the dead zone upwards.
    Pressed,
    /// Dropped back inside the dead zone.
    Released,
    /// Moved by more than the analog epsilon without crossing the dead zone.
    Changed,
    /// Nothing worth reporting.
    None,
}

/// Thresholds used when updating an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Magnitude above which an action counts as pressed.
    pub dead_zone: f32,
    /// Minimum change that reports an analog update.
    pub analog_epsilon: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            dead_zone: 0.1,
            analog_epsilon: 0.01,
        }
    }
}

/// Value and press history of one action.
///
/// State transitions on [`update`](Self::update):
/// ```text
///            |v| > dead zone
/// released ──────────────────> pressed        (Transition::Pressed)
///    ^                            │
///    │     |v| <= dead zone       │
///    └────────────────────────────┘           (Transition::Released, value forced to 0)
/// ```
/// Updates that stay on one side report `Changed` when the value moved by
/// more than the analog epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionState {
    /// Current value.
    pub value: f32,
    /// Value before the last update.
    pub previous_value: f32,
    /// `|value| > dead_zone` after the last update.
    pub pressed: bool,
    /// `pressed` before the last update.
    pub was_pressed: bool,
    /// A press edge happened since the last [`settle`](Self::settle).
    pub just_pressed: bool,
    /// A release edge happened since the last [`settle`](Self::settle).
    pub just_released: bool,
    /// Timestamp of the last press edge.
    pub press_timestamp: u64,
    /// Timestamp of the last release edge.
    pub release_timestamp: u64,
}

impl ActionState {
    /// Returns `true` if the action went down since the last settle.
    #[inline]
    #[must_use]
    pub const fn is_just_pressed(&self) -> bool {
        self.just_pressed
    }

    /// Returns `true` if the action went up since the last settle.
    #[inline]
    #[must_use]
    pub const fn is_just_released(&self) -> bool {
        self.just_released
    }

    /// Apply a resolved value and report the resulting edge.
    pub fn update(&mut self, value: f32, timestamp: u64, thresholds: Thresholds) -> Transition {
        self.previous_value = self.value;
        self.value = value;
        self.was_pressed = self.pressed;
        self.pressed = value.abs() > thresholds.dead_zone;

        if self.pressed && !self.was_pressed {
            self.just_pressed = true;
            self.press_timestamp = timestamp;
            Transition::Pressed
        } else if !self.pressed && self.was_pressed {
            self.just_released = true;
            self.value = 0.0;
            self.release_timestamp = timestamp;
            Transition::Released
        } else if (self.value - self.previous_value).abs() > thresholds.analog_epsilon {
            Transition::Changed
        } else {
            Transition::None
        }
    }

    /// Force the action up, as if every bound control had been let go.
    ///
    /// Returns `false` if the action was not pressed.
    pub fn force_release(&mut self, timestamp: u64) -> bool {
        if !self.pressed {
            return false;
        }
        self.previous_value = self.value;
        self.value = 0.0;
        self.was_pressed = true;
        self.pressed = false;
        self.just_released = true;
        self.release_timestamp = timestamp;
        true
    }

    /// Start a new frame: edges seen so far stop being reported.
    #[inline]
    pub fn settle(&mut self) {
        self.was_pressed = self.pressed;
        self.just_pressed = false;
        self.just_released = false;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn press_and_release_cycle() {
        let mut state = ActionState::default();
        let t = Thresholds::default();

        assert_eq!(state.update(1.0, 10, t), Transition::Pressed);
        assert!(state.pressed);
        assert!(state.is_just_pressed());
        assert_eq!(state.press_timestamp, 10);

        assert_eq!(state.update(0.0, 20, t), Transition::Released);
        assert!(!state.pressed);
        assert!(state.is_just_released());
        assert_eq!(state.release_timestamp, 20);
    }

    #[test]
    fn release_forces_zero_inside_dead_zone() {
        let mut state = ActionState::default();
        let t = Thresholds::default();

        state.update(0.8, 1, t);
        assert_eq!(state.update(0.05, 2, t), Transition::Released);
        assert_relative_eq!(state.value, 0.0);
        assert_relative_eq!(state.previous_value, 0.8);
    }

    #[test]
    fn analog_changes_while_held() {
        let mut state = ActionState::default();
        let t = Thresholds::default();

        state.update(0.5, 1, t);
        assert_eq!(state.update(0.7, 2, t), Transition::Changed);
        assert_eq!(state.update(0.705, 3, t), Transition::None);
        assert!(state.pressed);
        assert!(state.is_just_pressed());

        state.settle();
        assert_eq!(state.update(0.9, 4, t), Transition::Changed);
        assert!(!state.is_just_pressed());
    }

    #[test]
    fn edges_survive_later_updates_until_settle() {
        let mut state = ActionState::default();
        let t = Thresholds::default();

        state.update(1.0, 1, t);
        state.update(1.0, 2, t);
        assert!(state.is_just_pressed());
        assert!(!state.is_just_released());

        state.update(0.0, 3, t);
        state.update(0.0, 4, t);
        assert!(state.is_just_pressed());
        assert!(state.is_just_released());

        state.settle();
        assert!(!state.is_just_pressed());
        assert!(!state.is_just_released());
    }

    #[test]
    fn small_values_stay_released() {
        let mut state = ActionState::default();
        let t = Thresholds::default();

        assert_eq!(state.update(0.05, 1, t), Transition::Changed);
        assert!(!state.pressed);
        assert_eq!(state.update(0.05, 2, t), Transition::None);
        assert_eq!(state.update(0.0, 3, t), Transition::Changed);
    }

    #[test]
    fn repeated_press_reports_once() {
        let mut state = ActionState::default();
        let t = Thresholds::default();

        assert_eq!(state.update(1.0, 1, t), Transition::Pressed);
        assert_eq!(state.update(1.0, 2, t), Transition::None);
        assert_eq!(state.press_timestamp, 1);
    }

    #[test]
    fn negative_values_press() {
        let mut state = ActionState::default();
        assert_eq!(state.update(-0.4, 1, Thresholds::default()), Transition::Pressed);
        assert_relative_eq!(state.value, -0.4);
    }

    #[test]
    fn settle_clears_edges() {
        let mut state = ActionState::default();
        state.update(1.0, 1, Thresholds::default());
        state.settle();
        assert!(state.pressed);
        assert!(!state.is_just_pressed());
    }

    #[test]
    fn force_release_only_when_pressed() {
        let mut state = ActionState::default();
        assert!(!state.force_release(5));

        state.update(1.0, 1, Thresholds::default());
        assert!(state.force_release(5));
        assert!(state.is_just_released());
        assert_relative_eq!(state.value, 0.0);
        assert_eq!(state.release_timestamp, 5);
    }
}
