//! Per-context, per-action binding storage.

use tracing::{debug, warn};

use crate::action::Action;
use crate::binding::Binding;
use crate::bounded::BoundedVec;
use crate::context::InputContext;
use crate::error::{Capacity, Error, Result};

/// Maximum bindings stored for one (context, action) pair.
pub const MAX_BINDINGS_PER_ACTION: usize = 4;

/// Bounded, ordered bindings for one (context, action) pair.
pub type BindingList = BoundedVec<Binding, MAX_BINDINGS_PER_ACTION>;

/// Dense binding table indexed by context then action.
///
/// Sized at construction; binding and clearing never allocate.
#[derive(Debug, Clone)]
pub struct BindingTable {
    lists: Box<[[BindingList; Action::COUNT]; InputContext::COUNT]>,
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: Box::new([[BindingList::new(); Action::COUNT]; InputContext::COUNT]),
        }
    }

    /// Append a binding for `action` in `context`.
    ///
    /// Registration order is preserved; it breaks magnitude ties during
    /// resolution. Past capacity the binding is dropped and an error returned.
    pub fn bind(&mut self, action: Action, context: InputContext, binding: Binding) -> Result<()> {
        let list = &mut self.lists[context.index()][action.index()];
        if list.push(binding).is_err() {
            warn!(
                %action,
                %context,
                limit = MAX_BINDINGS_PER_ACTION,
                "Binding list full, binding dropped"
            );
            return Err(Error::CapacityExceeded {
                what: Capacity::BindingsPerAction,
                limit: MAX_BINDINGS_PER_ACTION,
            });
        }
        debug!(%action, %context, ?binding, "Bound action");
        Ok(())
    }

    /// Remove every binding for `action` in `context`.
    pub fn clear(&mut self, action: Action, context: InputContext) {
        self.lists[context.index()][action.index()].clear();
    }

    /// Remove every binding in every context.
    pub fn clear_all(&mut self) {
        for context in self.lists.iter_mut() {
            for list in context.iter_mut() {
                list.clear();
            }
        }
    }

    /// Bindings for `action` in `context`, in registration order.
    #[must_use]
    pub fn bindings(&self, action: Action, context: InputContext) -> &BindingList {
        &self.lists[context.index()][action.index()]
    }

    /// Returns `true` if `action` has at least one binding in `context`.
    #[must_use]
    pub fn is_bound(&self, action: Action, context: InputContext) -> bool {
        !self.bindings(action, context).is_empty()
    }

    /// Total number of bindings in `context`.
    #[must_use]
    pub fn len_in(&self, context: InputContext) -> usize {
        self.lists[context.index()].iter().map(BindingList::len).sum()
    }

    /// Iterate over `(action, list)` pairs of one context.
    pub fn context_lists(
        &self,
        context: InputContext,
    ) -> impl Iterator<Item = (Action, &BindingList)> + '_ {
        Action::ALL
            .iter()
            .copied()
            .zip(self.lists[context.index()].iter())
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::KeyCode;

    use super::*;

    #[test]
    fn bind_preserves_order() {
        let mut table = BindingTable::new();
        table
            .bind(Action::UiUp, InputContext::Menu, Binding::key(KeyCode::ArrowUp))
            .unwrap();
        table
            .bind(Action::UiUp, InputContext::Menu, Binding::key(KeyCode::KeyW))
            .unwrap();

        let keys: Vec<_> = table.bindings(Action::UiUp, InputContext::Menu).iter().collect();
        assert_eq!(keys, vec![Binding::key(KeyCode::ArrowUp), Binding::key(KeyCode::KeyW)]);
    }

    #[test]
    fn contexts_are_partitioned() {
        let mut table = BindingTable::new();
        table
            .bind(Action::Boost, InputContext::Gameplay, Binding::key(KeyCode::ShiftLeft))
            .unwrap();

        assert!(table.is_bound(Action::Boost, InputContext::Gameplay));
        assert!(!table.is_bound(Action::Boost, InputContext::Menu));
        assert_eq!(table.len_in(InputContext::Gameplay), 1);
        assert_eq!(table.len_in(InputContext::Menu), 0);
    }

    #[test]
    fn capacity_overflow_drops_binding() {
        let mut table = BindingTable::new();
        let keys = [KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD];
        for key in keys {
            table.bind(Action::Primary, InputContext::Gameplay, key.into()).unwrap();
        }

        let err = table
            .bind(Action::Primary, InputContext::Gameplay, KeyCode::KeyE.into())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                what: Capacity::BindingsPerAction,
                limit: MAX_BINDINGS_PER_ACTION
            }
        ));
        assert_eq!(
            table.bindings(Action::Primary, InputContext::Gameplay).len(),
            MAX_BINDINGS_PER_ACTION
        );
    }

    #[test]
    fn clear_then_rebind() {
        let mut table = BindingTable::new();
        table
            .bind(Action::Quit, InputContext::Debug, KeyCode::Escape.into())
            .unwrap();
        table.clear(Action::Quit, InputContext::Debug);
        assert!(!table.is_bound(Action::Quit, InputContext::Debug));

        table
            .bind(Action::Quit, InputContext::Debug, KeyCode::F10.into())
            .unwrap();
        let bound: Vec<_> = table.bindings(Action::Quit, InputContext::Debug).iter().collect();
        assert_eq!(bound, vec![Binding::key(KeyCode::F10)]);
    }

    #[test]
    fn clear_all_empties_every_context() {
        let mut table = BindingTable::new();
        table.bind(Action::UiConfirm, InputContext::Menu, KeyCode::Enter.into()).unwrap();
        table.bind(Action::Boost, InputContext::Gameplay, KeyCode::ShiftLeft.into()).unwrap();
        table.clear_all();
        for context in InputContext::ALL {
            assert_eq!(table.len_in(context), 0);
        }
    }
}
