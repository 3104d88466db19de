//! Input service configuration.

use crate::action_state::Thresholds;
use crate::context::InputContext;

/// What happens to held actions when the active context changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextSwitch {
    /// Leave action state untouched. Actions held when the context changes
    /// stay pressed until a matching release arrives in the new context.
    #[default]
    PassThrough,
    /// Release every pressed action at the start of the next frame.
    ReleaseAll,
}

/// Input service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    /// Magnitude above which an action counts as pressed.
    pub dead_zone: f32,
    /// Minimum value change that emits an analog event.
    pub analog_epsilon: f32,
    /// Context at the bottom of the stack. Never popped.
    pub base_context: InputContext,
    /// Behavior of held actions across context changes.
    pub context_switch: ContextSwitch,
    /// Install the built-in bindings at creation.
    pub default_bindings: bool,
    /// Profile to load at creation, replacing the built-in bindings.
    pub profile: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dead_zone: 0.1,
            analog_epsilon: 0.01,
            base_context: InputContext::Menu,
            context_switch: ContextSwitch::PassThrough,
            default_bindings: true,
            profile: None,
        }
    }
}

impl InputConfig {
    /// Set the press threshold.
    #[must_use]
    pub const fn with_dead_zone(mut self, dead_zone: f32) -> Self {
        self.dead_zone = dead_zone;
        self
    }

    /// Set the minimum analog change.
    #[must_use]
    pub const fn with_analog_epsilon(mut self, epsilon: f32) -> Self {
        self.analog_epsilon = epsilon;
        self
    }

    /// Set the base context.
    #[must_use]
    pub const fn with_base_context(mut self, context: InputContext) -> Self {
        self.base_context = context;
        self
    }

    /// Set the context switch behavior.
    #[must_use]
    pub const fn with_context_switch(mut self, switch: ContextSwitch) -> Self {
        self.context_switch = switch;
        self
    }

    /// Enable or disable the built-in bindings.
    #[must_use]
    pub const fn with_default_bindings(mut self, enabled: bool) -> Self {
        self.default_bindings = enabled;
        self
    }

    /// Load this profile at creation.
    #[must_use]
    pub fn with_profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    /// Thresholds used by the resolver.
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        Thresholds {
            dead_zone: self.dead_zone,
            analog_epsilon: self.analog_epsilon,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = InputConfig::default();
        assert_relative_eq!(config.dead_zone, 0.1);
        assert_relative_eq!(config.analog_epsilon, 0.01);
        assert_eq!(config.base_context, InputContext::Menu);
        assert_eq!(config.context_switch, ContextSwitch::PassThrough);
        assert!(config.default_bindings);
        assert!(config.profile.is_none());
    }

    #[test]
    fn builder_overrides() {
        let config = InputConfig::default()
            .with_dead_zone(0.2)
            .with_analog_epsilon(0.05)
            .with_base_context(InputContext::Gameplay)
            .with_context_switch(ContextSwitch::ReleaseAll)
            .with_default_bindings(false)
            .with_profile("pilot");

        let thresholds = config.thresholds();
        assert_relative_eq!(thresholds.dead_zone, 0.2);
        assert_relative_eq!(thresholds.analog_epsilon, 0.05);
        assert_eq!(config.base_context, InputContext::Gameplay);
        assert_eq!(config.context_switch, ContextSwitch::ReleaseAll);
        assert!(!config.default_bindings);
        assert_eq!(config.profile.as_deref(), Some("pilot"));
    }
}
