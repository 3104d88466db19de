//! Service counters.

/// Running counters of an [`InputService`](crate::InputService).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputStats {
    /// Bindings refused because their list was full.
    pub bindings_dropped: u64,
    /// Context pushes refused because the stack was full.
    pub contexts_dropped: u64,
    /// Events dropped because the frame queue was full.
    pub events_dropped: u64,
    /// Hardware events taken from the source.
    pub hardware_events: u64,
    /// Events pushed into the queue.
    pub events_emitted: u64,
    /// Frames processed.
    pub frames: u64,
}

impl InputStats {
    /// Total values dropped by any bounded container.
    #[must_use]
    pub const fn total_dropped(&self) -> u64 {
        self.bindings_dropped + self.contexts_dropped + self.events_dropped
    }
}
