//! Context-scoped action mapping for the Skyward flight game.
//!
//! Raw hardware samples (keyboard keys, mouse buttons, gamepad buttons and
//! axes) are translated into a small, device-independent set of [`Action`]s.
//! Which bindings are live depends on the active [`InputContext`], the top
//! of a bounded context stack.
//!
//! # Core Types
//!
//! - [`InputService`]: Polls a device source once per frame and resolves actions
//! - [`DeviceEventSource`]: Producer of normalized [`HardwareEvent`]s
//! - [`Binding`]: One physical control bound to an action, with scale and invert
//! - [`ActionState`]: Per-action value and press history
//! - [`InputEvent`]: Per-frame action event, drained with [`InputService::next_event`]
//! - [`BindingStore`]: Persistence for named [`BindingProfile`]s
//!
//! # Resolution
//!
//! For every hardware event, each action scans its bindings in the active
//! context. Among the matching bindings the one with the largest magnitude
//! wins, ties going to the first registered. An action is pressed while
//! `|value| > dead_zone` and emits at most one event per hardware event:
//! press and release edges first, analog changes otherwise.
//!
//! # Usage
//!
//! ```ignore
//! use skyward_input::{Action, InputConfig, InputContext, InputService, WinitEventSource};
//!
//! let mut input = InputService::new(InputConfig::default(), WinitEventSource::new());
//! input.push_context(InputContext::Gameplay)?;
//!
//! // In the window event handler
//! fn on_event(input: &mut InputService<WinitEventSource>, event: &WindowEvent) -> bool {
//!     input.source_mut().process_window_event(event)
//! }
//!
//! // Once per frame
//! fn update(input: &mut InputService<WinitEventSource>, dt: f32) {
//!     input.process_frame(dt);
//!
//!     while let Some(event) = input.next_event() {
//!         if event.action == Action::UiMenu && event.just_pressed {
//!             // Open the pause menu
//!         }
//!     }
//!
//!     let thrust = input.action_value(Action::ThrustForward);
//! }
//! ```

mod action;
mod action_state;
mod binding;
mod binding_table;
mod bounded;
mod config;
mod context;
mod defaults;
mod device;
mod error;
mod event_queue;
mod gamepad;
#[cfg(feature = "gilrs")]
mod gilrs_source;
mod modifiers;
mod mouse;
mod profile;
mod service;
mod stats;
mod winit_source;

pub use action::Action;
pub use action_state::{ActionState, Thresholds, Transition};
pub use binding::{Binding, BindingTarget};
pub use binding_table::{BindingList, BindingTable, MAX_BINDINGS_PER_ACTION};
pub use bounded::BoundedVec;
pub use config::{ContextSwitch, InputConfig};
pub use context::{ContextStack, InputContext, MAX_CONTEXT_STACK};
pub use defaults::{install_defaults, DEFAULT_BINDINGS};
pub use device::{
    DeviceEventSource, DeviceKind, DevicePayload, HardwareEvent, MergedSource, ScriptedSource,
};
pub use error::{Capacity, Error, Result};
pub use event_queue::{EventQueue, InputEvent, MAX_EVENTS_PER_FRAME};
pub use gamepad::{GamepadAxis, GamepadButton, GamepadButtons, GamepadControl, GAMEPAD_AXIS_COUNT};
#[cfg(feature = "gilrs")]
pub use gilrs_source::GilrsEventSource;
pub use modifiers::Modifiers;
pub use mouse::{MouseButton, MouseButtons};
pub use profile::{
    ApplyReport, BindingProfile, BindingStore, ContextProfile, JsonFileStore, MemoryBindingStore,
};
pub use service::InputService;
pub use stats::InputStats;
pub use winit_source::WinitEventSource;

// Re-export winit types commonly used with input
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
