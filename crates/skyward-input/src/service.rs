//! The input service: per-frame resolution of hardware events into action events.

use tracing::{debug, info, trace, warn};

use crate::action::Action;
use crate::action_state::{ActionState, Transition};
use crate::binding::Binding;
use crate::binding_table::{BindingList, BindingTable};
use crate::config::{ContextSwitch, InputConfig};
use crate::context::{ContextStack, InputContext};
use crate::defaults::install_defaults;
use crate::device::{DeviceEventSource, DevicePayload, HardwareEvent};
use crate::error::Result;
use crate::event_queue::{EventQueue, InputEvent};
use crate::profile::{ApplyReport, BindingProfile, BindingStore};
use crate::stats::InputStats;

/// Context-scoped action mapping over a device event source.
///
/// # Usage
///
/// ```ignore
/// let mut input = InputService::new(InputConfig::default(), source);
/// input.push_context(InputContext::Gameplay)?;
///
/// // Once per frame
/// input.process_frame(dt);
/// while let Some(event) = input.next_event() {
///     if event.action == Action::Boost && event.just_pressed {
///         // ...
///     }
/// }
/// let thrust = input.action_value(Action::ThrustForward);
/// ```
#[derive(Debug)]
pub struct InputService<S> {
    config: InputConfig,
    source: S,
    bindings: BindingTable,
    states: [ActionState; Action::COUNT],
    contexts: ContextStack,
    queue: EventQueue,
    stats: InputStats,
    /// Set by a context change under [`ContextSwitch::ReleaseAll`].
    release_pending: bool,
    dropped_this_frame: u32,
    last_timestamp: u64,
    elapsed: f64,
}

impl<S: DeviceEventSource> InputService<S> {
    /// Create a service reading from `source`.
    ///
    /// Installs the built-in bindings unless disabled in `config`. A profile
    /// named in `config` is ignored here; use [`with_store`](Self::with_store).
    pub fn new(config: InputConfig, source: S) -> Self {
        let mut service = Self::empty(config, source);
        if service.config.default_bindings {
            service.install_default_bindings();
        }
        info!(
            base = %service.config.base_context,
            bindings = service.binding_count(),
            "Input service created"
        );
        service
    }

    /// Create a service and load the profile named in `config` from `store`.
    ///
    /// Falls back to the built-in bindings (when enabled) if the profile
    /// cannot be loaded.
    pub fn with_store(config: InputConfig, source: S, store: &dyn BindingStore) -> Self {
        let Some(name) = config.profile.clone() else {
            return Self::new(config, source);
        };

        let mut service = Self::empty(config, source);
        if let Err(err) = service.load_bindings(store, &name) {
            warn!(profile = %name, %err, "Failed to load binding profile, using defaults");
            if service.config.default_bindings {
                service.install_default_bindings();
            }
        }
        info!(
            base = %service.config.base_context,
            bindings = service.binding_count(),
            "Input service created"
        );
        service
    }

    fn empty(config: InputConfig, source: S) -> Self {
        Self {
            contexts: ContextStack::new(config.base_context),
            config,
            source,
            bindings: BindingTable::new(),
            states: [ActionState::default(); Action::COUNT],
            queue: EventQueue::new(),
            stats: InputStats::default(),
            release_pending: false,
            dropped_this_frame: 0,
            last_timestamp: 0,
            elapsed: 0.0,
        }
    }

    /// Poll the source and resolve every pending hardware event.
    ///
    /// Events from the previous frame are discarded first, whether read or not.
    pub fn process_frame(&mut self, delta_time: f32) {
        self.queue.reset();
        self.dropped_this_frame = 0;
        for state in &mut self.states {
            state.settle();
        }

        if self.release_pending {
            self.release_pending = false;
            self.release_all();
        }

        self.source.poll_events();
        while let Some(event) = self.source.next_event() {
            self.stats.hardware_events += 1;
            self.last_timestamp = event.timestamp;
            self.resolve(&event);
        }

        self.elapsed += f64::from(delta_time);
        self.stats.frames += 1;
        trace!(
            frame = self.stats.frames,
            events = self.queue.len(),
            context = %self.contexts.active(),
            "Input frame processed"
        );
    }

    fn resolve(&mut self, event: &HardwareEvent) {
        let context = self.contexts.active();
        let thresholds = self.config.thresholds();

        for &action in Action::ALL {
            let Some(value) = strongest(self.bindings.bindings(action, context), &event.payload)
            else {
                continue;
            };

            let state = &mut self.states[action.index()];
            let emitted = match state.update(value, event.timestamp, thresholds) {
                Transition::Pressed => {
                    debug!(%action, value = state.value, "Action pressed");
                    InputEvent::pressed(action, state.value, event.timestamp)
                }
                Transition::Released => {
                    debug!(%action, "Action released");
                    InputEvent::released(action, event.timestamp)
                }
                Transition::Changed => {
                    trace!(%action, value = state.value, "Action value changed");
                    InputEvent::changed(action, state.value, event.timestamp)
                }
                Transition::None => continue,
            };
            self.emit(emitted);
        }
    }

    fn release_all(&mut self) {
        let timestamp = self.last_timestamp;
        for &action in Action::ALL {
            if self.states[action.index()].force_release(timestamp) {
                debug!(%action, "Action released by context change");
                self.emit(InputEvent::released(action, timestamp));
            }
        }
    }

    fn emit(&mut self, event: InputEvent) {
        let Err(err) = self.queue.push(event) else {
            self.stats.events_emitted += 1;
            return;
        };
        self.stats.events_dropped += 1;
        self.dropped_this_frame += 1;
        if self.dropped_this_frame == 1 {
            warn!(
                %err,
                action = %event.action,
                "Dropping events for the rest of the frame"
            );
        }
    }

    /// Take the next event of the current frame.
    pub fn next_event(&mut self) -> Option<InputEvent> {
        self.queue.next_event()
    }

    /// Every event of the current frame, read or not.
    pub fn frame_events(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.queue.iter()
    }

    // ===== Action queries =====

    /// Current value of `action`.
    #[must_use]
    pub fn action_value(&self, action: Action) -> f32 {
        self.states[action.index()].value
    }

    /// Returns `true` while `action` is held.
    #[must_use]
    pub fn is_action_pressed(&self, action: Action) -> bool {
        self.states[action.index()].pressed
    }

    /// Returns `true` if `action` went down during the last frame.
    #[must_use]
    pub fn is_action_just_pressed(&self, action: Action) -> bool {
        self.states[action.index()].is_just_pressed()
    }

    /// Returns `true` if `action` went up during the last frame.
    #[must_use]
    pub fn is_action_just_released(&self, action: Action) -> bool {
        self.states[action.index()].is_just_released()
    }

    /// Full state of `action`, including press and release timestamps.
    #[must_use]
    pub fn action_state(&self, action: Action) -> ActionState {
        self.states[action.index()]
    }

    // ===== Contexts =====

    /// Make `context` the active context.
    ///
    /// Fails without changing anything if the stack is full.
    pub fn push_context(&mut self, context: InputContext) -> Result<()> {
        if let Err(err) = self.contexts.push(context) {
            self.stats.contexts_dropped += 1;
            return Err(err);
        }
        self.on_context_switch();
        Ok(())
    }

    /// Leave the active context. The base context is never popped.
    pub fn pop_context(&mut self) -> Option<InputContext> {
        let popped = self.contexts.pop()?;
        self.on_context_switch();
        Some(popped)
    }

    fn on_context_switch(&mut self) {
        if self.config.context_switch == ContextSwitch::ReleaseAll {
            self.release_pending = true;
        }
    }

    /// The context whose bindings are live.
    #[must_use]
    pub fn active_context(&self) -> InputContext {
        self.contexts.active()
    }

    /// The context stack, bottom first.
    #[must_use]
    pub const fn contexts(&self) -> &ContextStack {
        &self.contexts
    }

    // ===== Bindings =====

    /// Bind `binding` to `action` in `context`.
    ///
    /// The binding is dropped if the list is full.
    pub fn bind_action(
        &mut self,
        action: Action,
        context: InputContext,
        binding: impl Into<Binding>,
    ) -> Result<()> {
        self.bindings
            .bind(action, context, binding.into())
            .inspect_err(|_| self.stats.bindings_dropped += 1)
    }

    /// Remove every binding of `action` in `context`.
    pub fn clear_action_bindings(&mut self, action: Action, context: InputContext) {
        self.bindings.clear(action, context);
        debug!(%action, %context, "Cleared action bindings");
    }

    /// Bindings of `action` in `context`, in registration order.
    #[must_use]
    pub fn bindings(&self, action: Action, context: InputContext) -> &BindingList {
        self.bindings.bindings(action, context)
    }

    /// The whole binding table.
    #[must_use]
    pub const fn binding_table(&self) -> &BindingTable {
        &self.bindings
    }

    /// Replace every binding with the built-in set.
    pub fn reset_bindings(&mut self) {
        self.bindings.clear_all();
        self.install_default_bindings();
    }

    fn install_default_bindings(&mut self) {
        let dropped = install_defaults(&mut self.bindings);
        self.stats.bindings_dropped += dropped as u64;
    }

    fn binding_count(&self) -> usize {
        InputContext::ALL
            .iter()
            .map(|&context| self.bindings.len_in(context))
            .sum()
    }

    // ===== Persistence =====

    /// Save the current bindings to `store` under `name`.
    pub fn save_bindings(&self, store: &mut dyn BindingStore, name: &str) -> Result<()> {
        let profile = BindingProfile::from_table(&self.bindings);
        store.save(name, &profile)?;
        info!(profile = name, bindings = profile.len(), "Bindings saved");
        Ok(())
    }

    /// Replace the current bindings with the profile `name` from `store`.
    ///
    /// On error the current bindings are left untouched.
    pub fn load_bindings(&mut self, store: &dyn BindingStore, name: &str) -> Result<ApplyReport> {
        let profile = store.load(name)?;
        let report = profile.apply(&mut self.bindings);
        self.stats.bindings_dropped += report.dropped as u64;
        info!(
            profile = name,
            bound = report.bound,
            dropped = report.dropped,
            unknown = report.unknown,
            "Bindings loaded"
        );
        Ok(report)
    }

    // ===== Accessors =====

    /// The configuration the service was created with.
    #[must_use]
    pub const fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Running counters.
    #[must_use]
    pub const fn stats(&self) -> &InputStats {
        &self.stats
    }

    /// Sum of every `delta_time` passed to [`process_frame`](Self::process_frame).
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of processed frames.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.stats.frames
    }

    /// The device event source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the device event source, e.g. to feed it window events.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

/// Value of the strongest binding in `bindings` matching `payload`.
///
/// Ties keep the earlier binding.
fn strongest(bindings: &BindingList, payload: &DevicePayload) -> Option<f32> {
    bindings
        .iter()
        .filter_map(|binding| binding.resolve(payload))
        .fold(None, |best, value| match best {
            Some(best) if best.abs() >= value.abs() => Some(best),
            _ => Some(value),
        })
}
