//! Match results: the primary card, two secondary rows and the suggestion list.

use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, SignalWith, create_effect, create_memo};
use floem::views::dyn_stack;

use crate::catalog::{CatalogEntry, or_dash};
use crate::color::Rgb;
use crate::constants;
use crate::session::ColorSession;

fn to_color(rgb: Rgb) -> Color {
    Color::rgb8(rgb.r, rgb.g, rgb.b)
}

fn swatch(side: f32, rgb: impl Fn() -> Option<Rgb> + 'static) -> impl IntoView {
    empty().style(move |s| {
        let s = s
            .width(side)
            .height(side)
            .border_radius(constants::RADIUS)
            .border(1.0)
            .border_color(Color::rgb8(180, 180, 180));
        match rgb() {
            Some(rgb) => s.background(to_color(rgb)),
            None => s.background(Color::rgb8(230, 230, 230)),
        }
    })
}

fn field(name: &'static str, value: impl Fn() -> String + 'static) -> impl IntoView {
    h_stack((
        label(move || name).style(|s| {
            s.width(72.0)
                .font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
        }),
        label(value).style(|s| s.font_size(constants::LABEL_FONT)),
    ))
}

/// Primary card: everything the catalog knows about the best match.
fn primary_card(card: impl Fn() -> Option<CatalogEntry> + Copy + 'static) -> impl IntoView {
    let show_ideas = RwSignal::new(false);

    // Collapse the ideas whenever the card changes.
    create_effect(move |_| {
        let _ = card();
        show_ideas.set(false);
    });

    let text = move |f: fn(&CatalogEntry) -> String| {
        move || card().map_or_else(|| constants::NO_MATCH.to_string(), |e| f(&e))
    };

    v_stack((
        h_stack((
            swatch(constants::CARD_SWATCH, move || card().map(|e| e.rgb)),
            v_stack((
                label(text(|e| e.display_name().to_string()))
                    .style(|s| s.font_size(constants::TITLE_FONT).font_bold()),
                label(text(|e| e.summary())).style(|s| {
                    s.font_size(constants::LABEL_FONT)
                        .color(Color::rgb8(120, 120, 120))
                }),
            ))
            .style(|s| s.gap(2.0)),
        ))
        .style(|s| s.gap(constants::GAP).items_center()),
        field("Temperature", text(|e| or_dash(&e.temperature).to_string())),
        field("Strength", text(|e| or_dash(&e.strength).to_string())),
        field("Hex", text(|e| e.hex.clone())),
        field("Link", text(|e| or_dash(&e.link).to_string())),
        label(move || {
            if show_ideas.get() {
                "Hide ideas"
            } else {
                "Show ideas"
            }
        })
        .style(move |s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(60, 110, 200))
                .cursor(floem::style::CursorStyle::Pointer)
                .apply_if(card().is_none(), |s| s.hide())
        })
        .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
            show_ideas.update(|open| *open = !*open);
        }),
        label(move || {
            card().map_or_else(String::new, |e| {
                if e.ideas.is_empty() {
                    "No ideas yet".to_string()
                } else {
                    e.ideas
                        .iter()
                        .map(|idea| format!("• {idea}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            })
        })
        .style(move |s| {
            s.font_size(constants::LABEL_FONT)
                .apply_if(!show_ideas.get() || card().is_none(), |s| s.hide())
        }),
    ))
    .style(|s| {
        s.gap(4.0)
            .padding(constants::PADDING)
            .border_radius(constants::RADIUS)
            .background(Color::WHITE)
    })
}

/// One compact clickable row; clicking pins the entry to the primary card.
fn entry_row(
    session: RwSignal<ColorSession>,
    entry: impl Fn() -> Option<CatalogEntry> + Copy + 'static,
) -> impl IntoView {
    h_stack((
        swatch(constants::SMALL_SWATCH, move || entry().map(|e| e.rgb)),
        label(move || {
            entry().map_or_else(
                || constants::NO_MATCH.to_string(),
                |e| format!("{} · {}", e.display_name(), e.hex),
            )
        })
        .style(|s| s.font_size(constants::LABEL_FONT)),
    ))
    .style(move |s| {
        s.gap(constants::GAP)
            .items_center()
            .padding(2.0)
            .border_radius(3.0)
            .apply_if(entry().is_some(), |s| {
                s.cursor(floem::style::CursorStyle::Pointer)
                    .hover(|s| s.background(Color::rgb8(230, 230, 230)))
            })
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        if let Some(e) = entry() {
            session.update(|s| s.feature(e));
        }
    })
}

/// The card, the runner-up matches and the filtered suggestions.
pub(crate) fn match_panel(session: RwSignal<ColorSession>) -> impl IntoView {
    let matches = create_memo(move |_| session.with(|s| s.matches()));
    let card = create_memo(move |_| session.with(|s| s.primary_card()));
    let suggestions = create_memo(move |_| {
        session.with(|s| {
            s.suggestions()
                .into_iter()
                .cloned()
                .collect::<Vec<CatalogEntry>>()
        })
    });

    v_stack((
        primary_card(move || card.get()),
        entry_row(session, move || {
            matches.with(|m| m.secondary()[0].cloned())
        }),
        entry_row(session, move || {
            matches.with(|m| m.secondary()[1].cloned())
        }),
        label(|| "Suggestions").style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .margin_top(4.0)
        }),
        dyn_stack(
            move || suggestions.get().into_iter().enumerate(),
            |(i, e)| (*i, e.name.clone(), e.hex.clone()),
            move |(_, e)| {
                let e = RwSignal::new(e);
                entry_row(session, move || Some(e.get()))
            },
        )
        .style(|s| s.flex_col().gap(2.0)),
    ))
    .style(|s| s.gap(4.0))
}
