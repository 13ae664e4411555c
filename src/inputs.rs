//! Text inputs and small buttons: selection hex, copy, search and type filter.

use std::time::Instant;

use floem::action::exec_after;
use floem::event::EventPropagation;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, SignalWith, create_effect};

use crate::constants;
use crate::filter::{SearchFilter, TypeFilter};
use crate::session::ColorSession;

fn input_style(s: floem::style::Style, width: f32) -> floem::style::Style {
    s.width(width)
        .padding(2.0)
        .font_size(constants::INPUT_FONT)
        .background(Color::WHITE)
        .border(1.0)
        .border_color(Color::rgb8(200, 200, 200))
        .border_radius(3.0)
}

/// Hex field for the selected color.
///
/// Follows the session while the user is not editing; a typed value is
/// committed on Enter or focus loss. Values that are not a color are
/// rejected and the field reverts.
pub(crate) fn hex_input(session: RwSignal<ColorSession>) -> impl IntoView {
    let text = RwSignal::new(session.with_untracked(|s| s.selection().hex));

    // Session → text
    create_effect(move |_| {
        let hex = session.with(|s| s.selection().hex);
        if text.get_untracked() != hex {
            text.set(hex);
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        let mut accepted = false;
        session.update(|s| accepted = s.set_hex(&raw).is_some());
        if !accepted {
            log::debug!("Rejected hex input {raw:?}");
        }
        // Show the canonical form either way.
        let hex = session.with_untracked(|s| s.selection().hex);
        if raw != hex {
            text.set(hex);
        }
    };
    let on_commit_clone = on_commit;

    text_input(text)
        .style(|s| input_style(s, constants::HEX_INPUT_WIDTH).font_family("monospace".to_string()))
        .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
            on_commit();
        })
        .on_event(floem::event::EventListener::KeyDown, move |e| {
            if let floem::event::Event::KeyDown(ke) = e
                && ke.key.logical_key
                    == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
            {
                on_commit_clone();
                return EventPropagation::Stop;
            }
            EventPropagation::Continue
        })
}

/// Search box plus type filter button.
///
/// Every edit to either control is scheduled on the session's debouncer; a
/// timer polls it once the quiet period has passed, so a burst of keystrokes
/// re-filters the pool once.
pub(crate) fn search_bar(session: RwSignal<ColorSession>) -> impl IntoView {
    let query = RwSignal::new(String::new());
    let kind = RwSignal::new(TypeFilter::Any);

    create_effect(move |prev: Option<()>| {
        let filter = SearchFilter::new(query.get(), kind.get());
        // Nothing to apply on the first run.
        if prev.is_none() {
            return;
        }
        session.update(|s| s.search_input(filter, Instant::now()));
        let quiet = session.with_untracked(|s| {
            s.search_deadline()
                .map(|d| d.saturating_duration_since(Instant::now()))
        });
        if let Some(quiet) = quiet {
            exec_after(quiet, move |_| {
                let now = Instant::now();
                let due = session.with_untracked(|s| s.search_deadline().is_some_and(|d| now >= d));
                if due {
                    session.update(|s| {
                        s.poll_search(now);
                    });
                }
            });
        }
    });

    h_stack((
        text_input(query)
            .placeholder("Search name, brand, type…")
            .style(|s| input_style(s, constants::SEARCH_INPUT_WIDTH)),
        label(move || format!("Type: {}", kind.with(|k| k.as_value().to_string())))
            .style(|s| {
                s.font_size(constants::LABEL_FONT)
                    .padding_horiz(6.0)
                    .padding_vert(3.0)
                    .border(1.0)
                    .border_color(Color::rgb8(200, 200, 200))
                    .border_radius(3.0)
                    .cursor(floem::style::CursorStyle::Pointer)
                    .hover(|s| s.background(Color::rgb8(230, 230, 230)))
            })
            .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
                let next = session.with_untracked(|s| kind.with_untracked(|k| s.next_type_filter(k)));
                kind.set(next);
            }),
    ))
    .style(|s| s.gap(constants::GAP / 2.0).items_center())
}

/// A small copy button that copies the result of `get_text` to the clipboard.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(|| lucide_icons::Icon::Copy.unicode().to_string()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(floem::event::EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        pressed.set(false);
        copy_to_clipboard(&get_text());
    })
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                log::warn!("Failed to copy to clipboard: {e}");
            }
        }
        Err(e) => log::warn!("Clipboard unavailable: {e}"),
    }
}
