//! Viewer window and input loop.

use std::path::PathBuf;
use std::time::Instant;

#[cfg(feature = "gilrs")]
use skyward_input::MergedSource;
use skyward_input::{
    Action, ContextSwitch, DeviceEventSource, HardwareEvent, InputConfig, InputContext,
    InputEvent, InputService, JsonFileStore, WinitEventSource,
};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

/// Profile written by the save shortcut.
const SAVE_PROFILE: &str = "viewer";

/// Command-line options.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub profile: Option<String>,
    pub profiles_dir: PathBuf,
    pub context: InputContext,
    pub release_all: bool,
    pub dead_zone: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            profile: None,
            profiles_dir: PathBuf::from("profiles"),
            context: InputContext::Gameplay,
            release_all: false,
            dead_zone: 0.1,
        }
    }
}

impl ViewerOptions {
    /// Parse options from command line arguments.
    pub fn from_args() -> Self {
        let mut options = Self::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--profile" => {
                    if let Some(name) = args.get(i + 1) {
                        options.profile = Some(name.clone());
                        i += 1;
                    }
                }
                "--profiles-dir" => {
                    if let Some(dir) = args.get(i + 1) {
                        options.profiles_dir = PathBuf::from(dir);
                        i += 1;
                    }
                }
                "--context" => {
                    if let Some(name) = args.get(i + 1) {
                        match name.parse() {
                            Ok(context) => options.context = context,
                            Err(e) => warn!("Ignoring --context: {e}"),
                        }
                        i += 1;
                    }
                }
                "--dead-zone" => {
                    if let Some(Ok(v)) = args.get(i + 1).map(|s| s.parse()) {
                        options.dead_zone = v;
                        i += 1;
                    }
                }
                "--release-all" => options.release_all = true,
                other => warn!("Ignoring unknown argument: {other}"),
            }
            i += 1;
        }

        options
    }

    fn input_config(&self) -> InputConfig {
        let switch = if self.release_all {
            ContextSwitch::ReleaseAll
        } else {
            ContextSwitch::PassThrough
        };
        let config = InputConfig::default()
            .with_dead_zone(self.dead_zone)
            .with_context_switch(switch);
        match &self.profile {
            Some(name) => config.with_profile(name.clone()),
            None => config,
        }
    }
}

/// Window events merged in arrival order with gamepads, when available.
#[derive(Debug)]
pub struct ViewerSource {
    #[cfg(feature = "gilrs")]
    inner: MergedSource<WinitEventSource, Option<skyward_input::GilrsEventSource>>,
    #[cfg(not(feature = "gilrs"))]
    inner: WinitEventSource,
}

impl ViewerSource {
    fn new() -> Self {
        let start = Instant::now();
        let window = WinitEventSource::new().with_clock_start(start);
        #[cfg(feature = "gilrs")]
        let inner = MergedSource::new(
            window,
            skyward_input::GilrsEventSource::new()
                .map(|gamepads| gamepads.with_clock_start(start))
                .inspect_err(|e| warn!("Gamepads unavailable: {e}"))
                .ok(),
        );
        #[cfg(not(feature = "gilrs"))]
        let inner = window;
        Self { inner }
    }

    #[cfg(feature = "gilrs")]
    fn window_mut(&mut self) -> &mut WinitEventSource {
        self.inner.first_mut()
    }

    #[cfg(not(feature = "gilrs"))]
    fn window_mut(&mut self) -> &mut WinitEventSource {
        &mut self.inner
    }
}

impl DeviceEventSource for ViewerSource {
    fn poll_events(&mut self) {
        self.inner.poll_events();
    }

    fn next_event(&mut self) -> Option<HardwareEvent> {
        self.inner.next_event()
    }
}

/// Viewer application state.
pub struct Viewer {
    input: InputService<ViewerSource>,
    store: JsonFileStore,
    window: Option<Window>,
    last_frame: Instant,
}

impl Viewer {
    /// Create the input service and enter the startup context.
    pub fn new(options: ViewerOptions) -> anyhow::Result<Self> {
        let store = JsonFileStore::new(&options.profiles_dir);
        let mut input =
            InputService::with_store(options.input_config(), ViewerSource::new(), &store);
        if options.context != input.active_context() {
            input.push_context(options.context)?;
        }

        Ok(Self {
            input,
            store,
            window: None,
            last_frame: Instant::now(),
        })
    }

    /// Log the final counters.
    pub fn shutdown(&self) {
        let stats = self.input.stats();
        info!(
            frames = stats.frames,
            hardware_events = stats.hardware_events,
            events = stats.events_emitted,
            dropped = stats.total_dropped(),
            elapsed = self.input.elapsed(),
            "Viewer finished"
        );
    }

    fn update(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let context_before = self.input.active_context();
        self.input.process_frame(dt);

        while let Some(event) = self.input.next_event() {
            log_event(&event);
            if event.just_pressed {
                self.on_action(event.action, event_loop);
            }
        }

        let context = self.input.active_context();
        if context != context_before {
            info!(%context, depth = self.input.contexts().depth(), "Context changed");
            if let Some(window) = &self.window {
                window.set_title(&format!("Skyward Input Viewer [{context}]"));
            }
        }
    }

    fn on_action(&mut self, action: Action, event_loop: &ActiveEventLoop) {
        let context = self.input.active_context();
        match (context, action) {
            (InputContext::Gameplay, Action::UiMenu) => {
                if let Err(e) = self.input.push_context(InputContext::Menu) {
                    warn!("Cannot open menu: {e}");
                }
            }
            (InputContext::Menu, Action::UiCancel | Action::UiConfirm)
            | (InputContext::Debug, Action::DebugToggle) => {
                self.input.pop_context();
            }
            (_, Action::DebugToggle) => {
                if let Err(e) = self.input.push_context(InputContext::Debug) {
                    warn!("Cannot enter debug context: {e}");
                }
            }
            (_, Action::Screenshot) => {
                if let Err(e) = self.input.save_bindings(&mut self.store, SAVE_PROFILE) {
                    error!("Failed to save bindings: {e}");
                }
            }
            (_, Action::Quit) => event_loop.exit(),
            _ => {}
        }
    }
}

fn log_event(event: &InputEvent) {
    if event.just_pressed {
        info!(action = %event.action, value = event.value, "Pressed");
    } else if event.just_released {
        info!(action = %event.action, "Released");
    } else {
        info!(action = %event.action, value = event.value, "Changed");
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(format!("Skyward Input Viewer [{}]", self.input.active_context()))
            .with_inner_size(LogicalSize::new(640.0, 360.0));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                self.window = Some(window);
                info!("Viewer ready!");
            }
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.input.source_mut().window_mut().process_window_event(&event) {
            return;
        }

        if matches!(event, WindowEvent::CloseRequested) {
            info!("Close requested");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.update(event_loop);
    }
}
