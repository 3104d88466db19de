//! Skyward Input Viewer
//!
//! Opens a window, feeds its keyboard and mouse events (and gamepads, with the
//! `gilrs` feature) through the input service and logs every resolved action
//! event.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p skyward-input-viewer -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--profile <NAME>`: Load bindings from a saved profile
//! - `--profiles-dir <DIR>`: Directory holding profiles (default: `profiles`)
//! - `--context <NAME>`: Context pushed at startup (default: `gameplay`)
//! - `--release-all`: Release held actions whenever the context changes
//! - `--dead-zone <F>`: Press threshold (default: 0.1)
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::{Viewer, ViewerOptions};

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = ViewerOptions::from_args();
    info!(?options, "Skyward input viewer starting...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(options)?;
    if let Err(e) = event_loop.run_app(&mut viewer) {
        error!("Event loop error: {e}");
    }

    viewer.shutdown();
    Ok(())
}

fn print_help() {
    eprintln!(
        "Skyward Input Viewer

USAGE:
    cargo run -p skyward-input-viewer -- [OPTIONS]

BINDING OPTIONS:
    --profile <NAME>        Load bindings from profile NAME
    --profiles-dir <DIR>    Directory holding profiles (default: profiles)

BEHAVIOR OPTIONS:
    --context <NAME>        Context pushed at startup: menu, gameplay, dialog, debug
                            Default: gameplay
    --release-all           Release held actions whenever the context changes
    --dead-zone <F>         Press threshold (default: 0.1)

CONTROLS:
    Escape / Start          Open the menu (gameplay) or go back (menu)
    Enter                   Leave the menu
    F3                      Toggle the debug context
    F12                     Save current bindings as profile \"viewer\"
    Ctrl+Q                  Quit (menu context)

OTHER:
    -h, --help              Print this help message

EXAMPLES:
    # Log every action event
    RUST_LOG=skyward_input=debug cargo run -p skyward-input-viewer

    # Try a saved profile with gamepad support
    cargo run -p skyward-input-viewer --features gilrs -- --profile pilot

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
