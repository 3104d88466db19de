//! Input contexts and the context stack.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::bounded::BoundedVec;
use crate::error::{Capacity, Error, Result};

/// Maximum depth of the context stack.
pub const MAX_CONTEXT_STACK: usize = 8;

/// An input mode selecting which bindings are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum InputContext {
    /// Front-end and pause menus.
    #[default]
    Menu,
    /// In-flight controls.
    Gameplay,
    /// Modal dialog over another context.
    Dialog,
    /// Developer tooling.
    Debug,
}

impl InputContext {
    /// Every context, in index order.
    pub const ALL: [Self; 4] = [Self::Menu, Self::Gameplay, Self::Dialog, Self::Debug];

    /// Number of contexts.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index of this context.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a context by dense index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable name used in binding profiles.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Gameplay => "gameplay",
            Self::Dialog => "dialog",
            Self::Debug => "debug",
        }
    }

    /// Look up a context by name. `flight` is accepted as an alias of `gameplay`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "menu" => Some(Self::Menu),
            "gameplay" | "flight" => Some(Self::Gameplay),
            "dialog" => Some(Self::Dialog),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for InputContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputContext {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownContext(s.to_string()))
    }
}

/// Bounded LIFO stack of contexts.
///
/// The bottom entry is the base context and can never be popped, so the
/// stack always has an active context.
#[derive(Debug, Clone, Copy)]
pub struct ContextStack {
    base: InputContext,
    stack: BoundedVec<InputContext, MAX_CONTEXT_STACK>,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new(InputContext::default())
    }
}

impl ContextStack {
    /// Create a stack holding only `base`.
    #[must_use]
    pub fn new(base: InputContext) -> Self {
        let mut stack = BoundedVec::new();
        // Capacity is at least one, the first push cannot fail.
        let _ = stack.push(base);
        Self { base, stack }
    }

    /// Push a context on top of the stack.
    ///
    /// When the stack is full the context is dropped and an error returned.
    pub fn push(&mut self, context: InputContext) -> Result<()> {
        if self.stack.push(context).is_err() {
            warn!(%context, limit = MAX_CONTEXT_STACK, "Context stack full, push dropped");
            return Err(Error::CapacityExceeded {
                what: Capacity::ContextStack,
                limit: MAX_CONTEXT_STACK,
            });
        }
        debug!(%context, depth = self.stack.len(), "Pushed input context");
        Ok(())
    }

    /// Pop the top context.
    ///
    /// Returns the removed context, or `None` when only the base remains.
    pub fn pop(&mut self) -> Option<InputContext> {
        if self.stack.len() <= 1 {
            return None;
        }
        let popped = self.stack.pop();
        debug!(context = ?popped, depth = self.stack.len(), "Popped input context");
        popped
    }

    /// The context whose bindings are currently live.
    #[must_use]
    pub fn active(&self) -> InputContext {
        self.stack.last().unwrap_or(self.base)
    }

    /// The base context at the bottom of the stack.
    #[must_use]
    pub const fn base(&self) -> InputContext {
        self.base
    }

    /// Number of contexts on the stack, including the base.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Iterate from the base upwards.
    pub fn iter(&self) -> impl Iterator<Item = InputContext> + '_ {
        self.stack.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_base() {
        let stack = ContextStack::new(InputContext::Menu);
        assert_eq!(stack.active(), InputContext::Menu);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_then_pop_restores_previous() {
        let mut stack = ContextStack::new(InputContext::Menu);
        stack.push(InputContext::Gameplay).unwrap();
        stack.push(InputContext::Dialog).unwrap();
        assert_eq!(stack.active(), InputContext::Dialog);

        assert_eq!(stack.pop(), Some(InputContext::Dialog));
        assert_eq!(stack.active(), InputContext::Gameplay);
    }

    #[test]
    fn base_cannot_be_popped() {
        let mut stack = ContextStack::new(InputContext::Gameplay);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.active(), InputContext::Gameplay);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_past_capacity_is_dropped() {
        let mut stack = ContextStack::new(InputContext::Menu);
        for _ in 1..MAX_CONTEXT_STACK {
            stack.push(InputContext::Gameplay).unwrap();
        }
        let err = stack.push(InputContext::Debug).unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                what: Capacity::ContextStack,
                ..
            }
        ));
        assert_eq!(stack.depth(), MAX_CONTEXT_STACK);
        assert_eq!(stack.active(), InputContext::Gameplay);
    }

    #[test]
    fn context_names() {
        for context in InputContext::ALL {
            assert_eq!(InputContext::from_name(context.name()), Some(context));
        }
        assert_eq!(InputContext::from_name("flight"), Some(InputContext::Gameplay));
        assert!("cutscene".parse::<InputContext>().is_err());
    }
}
