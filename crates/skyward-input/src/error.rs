//! Error types for the input service.

use std::fmt;

use thiserror::Error;

/// Bounded container that refused an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Bindings stored for a single (context, action) pair.
    BindingsPerAction,
    /// Depth of the context stack.
    ContextStack,
    /// Events emitted within one frame.
    EventsPerFrame,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BindingsPerAction => "bindings per action",
            Self::ContextStack => "context stack depth",
            Self::EventsPerFrame => "events per frame",
        };
        f.write_str(name)
    }
}

/// Input service error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A bounded container is full; the value was dropped.
    #[error("Capacity exceeded: {what} (limit {limit})")]
    CapacityExceeded {
        /// Which container overflowed.
        what: Capacity,
        /// Its fixed capacity.
        limit: usize,
    },

    /// Action identifier outside the known set.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Context identifier outside the known set.
    #[error("Unknown context: {0}")]
    UnknownContext(String),

    /// No stored profile with this name.
    #[error("Binding profile not found: {0}")]
    ProfileNotFound(String),

    /// Profile name that cannot be used as a storage key.
    #[error("Invalid binding profile name: {0:?}")]
    InvalidProfileName(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Device backend error
    #[error("Device error: {0}")]
    Device(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
