//! # floem-colormatch
//!
//! A color matching tool for [Floem](https://github.com/lapce/floem).
//!
//! The user picks a color on a hue/saturation wheel and a value bar, or types
//! a hex code, and the tool ranks a product catalog by distance to that color.
//! The top three matches are shown, with the best match as a full card. A
//! debounced search box and a type filter narrow the pool being ranked.
//!
//! The core (`color`, `raster`, `catalog`, `matcher`, `filter`, `session`) has
//! no UI dependency and can be driven directly; the views are thin bindings
//! over a [`ColorSession`] held in a signal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_colormatch::{color_matcher, ToolConfig};
//!
//! let config = ToolConfig {
//!     catalog: Some("paints.tsv".into()),
//!     ..ToolConfig::default()
//! };
//! // Use `color_matcher(&config)` in your Floem view tree.
//! ```

pub mod catalog;
pub mod color;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod raster;
pub mod session;
pub mod surface;

mod color_tool;
mod color_wheel;
mod constants;
#[cfg(all(feature = "eyedropper", target_os = "macos"))]
mod eyedropper;
mod inputs;
mod match_panel;
mod math;
mod value_bar;

pub use catalog::{CatalogEntry, CatalogSource, FileSource, TextSource};
pub use color::{Hsv, Rgb};
pub use color_tool::spawn_catalog_load;
pub use config::ToolConfig;
pub use error::{CatalogError, ConfigError};
pub use matcher::Matches;
pub use session::ColorSession;

use std::sync::Once;

use floem::prelude::*;
use floem::reactive::RwSignal;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the color matching tool.
///
/// When `config.catalog` is set, the feed at that path is loaded in the
/// background; otherwise the tool runs with an empty catalog.
pub fn color_matcher(config: &ToolConfig) -> impl IntoView + use<> {
    let source = config
        .catalog
        .as_ref()
        .map(|path| Box::new(FileSource::new(path)) as Box<dyn CatalogSource>);
    build(config, source)
}

/// Creates the color matching tool over a custom catalog source.
pub fn color_matcher_with_source(
    config: &ToolConfig,
    source: Box<dyn CatalogSource>,
) -> impl IntoView + use<> {
    build(config, Some(source))
}

fn build(config: &ToolConfig, source: Option<Box<dyn CatalogSource>>) -> impl IntoView + use<> {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    let session = RwSignal::new(ColorSession::new(config));
    match source {
        Some(source) => spawn_catalog_load(session, source),
        None => log::info!("No catalog configured"),
    }
    color_tool::color_tool(session)
}
