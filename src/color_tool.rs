//! The assembled tool: wheel and value bar, selection readout, search and
//! match results, plus the background catalog load.

use floem::ext_event::create_ext_action;
use floem::prelude::*;
use floem::reactive::{RwSignal, Scope, SignalUpdate, SignalWith};

use crate::catalog::CatalogSource;
use crate::color_wheel::color_wheel;
use crate::constants;
#[cfg(all(feature = "eyedropper", target_os = "macos"))]
use crate::eyedropper::eyedropper_button;
use crate::inputs::{copy_button, hex_input, search_bar};
use crate::match_panel::match_panel;
use crate::session::ColorSession;
use crate::value_bar::value_bar;

/// Fetch and parse `source` on a worker thread and hand the result to
/// `session` on the UI thread.
///
/// Only the first call per session starts a fetch; later calls are no-ops.
pub fn spawn_catalog_load(session: RwSignal<ColorSession>, source: Box<dyn CatalogSource>) {
    let mut claimed = false;
    session.update(|s| claimed = s.begin_load());
    if !claimed {
        log::debug!("Catalog load already started; ignoring {}", source.describe());
        return;
    }

    let describe = source.describe();
    log::info!("Loading catalog from {describe}");
    // Owned by the calling view's scope so the trigger is dropped with it.
    let send = create_ext_action(Scope::current(), move |result| {
        session.update(|s| s.finish_load(result));
    });
    let spawned = std::thread::Builder::new()
        .name("catalog-load".to_string())
        .spawn(move || send(source.load()));
    if let Err(e) = spawned {
        log::error!("Failed to start catalog load for {describe}: {e}");
        session.update(|s| s.finish_load(Err(e.into())));
    }
}

fn selection_row(session: RwSignal<ColorSession>) -> impl IntoView {
    h_stack((
        #[cfg(all(feature = "eyedropper", target_os = "macos"))]
        eyedropper_button(session),
        empty().style(move |s| {
            let rgb = session.with(|s| s.selection().rgb);
            s.width(24.0)
                .height(24.0)
                .border_radius(12.0)
                .border(1.0)
                .border_color(Color::rgb8(180, 180, 180))
                .background(Color::rgb8(rgb.r, rgb.g, rgb.b))
        }),
        label(move || session.with(|s| s.selection().rgb_text)).style(|s| {
            s.font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .min_width(80.0)
        }),
        empty().style(|s| s.flex_grow(1.0)),
        hex_input(session),
        copy_button(move || session.with_untracked(|s| s.selection().hex)),
    ))
    .style(|s| s.gap(constants::GAP).items_center())
}

/// Lays out the whole tool over `session`.
pub(crate) fn color_tool(session: RwSignal<ColorSession>) -> impl IntoView {
    v_stack((
        h_stack((
            color_wheel(session),
            value_bar(session).style(|s| s.height_full()),
        ))
        .style(|s| s.gap(constants::GAP)),
        selection_row(session),
        search_bar(session),
        match_panel(session),
    ))
    .style(|s| {
        s.gap(constants::GAP)
            .padding(constants::PADDING)
            .size_full()
            .background(Color::rgb8(242, 242, 242))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LoadState, TextSource};

    #[test]
    fn second_load_is_not_spawned() {
        let session = RwSignal::new(ColorSession::default());
        session.update(|s| {
            assert!(s.begin_load());
        });
        spawn_catalog_load(
            session,
            Box::new(TextSource("name,hex\nRed,#ff0000\n".to_string())),
        );
        session.with_untracked(|s| {
            assert_eq!(s.catalog().state(), LoadState::Loading);
            assert!(s.catalog().is_empty());
        });
    }
}
