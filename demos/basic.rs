//! Standalone demo: opens a window with the color matching tool.
//!
//! Usage: `cargo run --example basic -- [config.toml]`

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_colormatch::{ToolConfig, color_matcher};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ToolConfig::load(&path).unwrap_or_else(|e| {
            log::error!("{path}: {e}; using defaults");
            ToolConfig::default()
        }),
        None => ToolConfig::default(),
    };

    floem::Application::new()
        .window(
            move |_| {
                color_matcher(&config).on_event_stop(
                    floem::event::EventListener::WindowClosed,
                    |_| floem::quit_app(),
                )
            },
            Some(
                WindowConfig::default()
                    .size((360.0, 760.0))
                    .title("floem-colormatch"),
            ),
        )
        .run();
}
