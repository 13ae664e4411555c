//! Vertical value bar (1.0 at the top, 0.0 at the bottom).
//!
//! Renders the selected hue/saturation at full value fading to black, with a
//! white indicator at the current value, as a rasterized image.

use floem::kurbo::{Point, Rect};
use floem::peniko::{self, Color};

use floem::reactive::{RwSignal, SignalUpdate, SignalWith, create_effect};
use floem::views::Decorators;
use floem::{
    View, ViewId,
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
};
use floem_renderer::Renderer;

use crate::color::Hsv;
use crate::color_wheel::to_image;
use crate::constants;
use crate::raster::draw_value_bar;
use crate::session::ColorSession;
use crate::surface::PixelBuffer;

pub(crate) struct ValueBar {
    id: ViewId,
    session: RwSignal<ColorSession>,
    held: bool,
    hsv: Hsv,
    /// Raster size as `(width, height)`.
    raster: (u32, u32),
    size: floem::taffy::prelude::Size<f32>,
    bar_img: Option<peniko::Image>,
    bar_hash: Vec<u8>,
    cached_hsv: Option<Hsv>,
}

/// Creates the value bar bound to `session`.
pub(crate) fn value_bar(session: RwSignal<ColorSession>) -> ValueBar {
    let id = ViewId::new();

    create_effect(move |_| {
        let hsv = session.with(|s| s.hsv());
        id.update_state(hsv);
    });

    let (hsv, raster) = session.with_untracked(|s| (s.hsv(), s.bar_size()));

    ValueBar {
        id,
        session,
        held: false,
        hsv,
        raster,
        size: Default::default(),
        bar_img: None,
        bar_hash: Vec::new(),
        cached_hsv: None,
    }
    .style(|s| {
        s.width(constants::BAR_WIDTH)
            .min_height(100.0)
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl ValueBar {
    /// Widget y → bar raster row.
    fn to_raster_y(&self, pos: Point) -> Option<f64> {
        let h = self.size.height as f64;
        if h <= 0.0 {
            return None;
        }
        Some(pos.y * self.raster.1 as f64 / h)
    }

    fn ensure_bar_image(&mut self) {
        if self.cached_hsv == Some(self.hsv) {
            return;
        }
        let (w, h) = self.raster;
        if w == 0 || h == 0 {
            return;
        }
        let mut buf = PixelBuffer::new(w, h);
        draw_value_bar(&mut buf, self.hsv);
        let (img, hash) = to_image(&buf);
        self.bar_img = Some(img);
        self.bar_hash = hash;
        self.cached_hsv = Some(self.hsv);
    }
}

impl View for ValueBar {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(hsv) = state.downcast::<Hsv>() {
            self.hsv = *hsv;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                if let Some(y) = self.to_raster_y(e.pos) {
                    self.session.update(|s| {
                        s.press_bar(y);
                    });
                }
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    if let Some(y) = self.to_raster_y(e.pos) {
                        self.session.update(|s| {
                            s.drag_bar(y);
                        });
                    }
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                if self.held {
                    self.held = false;
                    self.session.update(|s| s.release());
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        self.ensure_bar_image();
        if let Some(ref img) = self.bar_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.bar_hash,
                },
                rect,
            );
        }
        cx.restore();

        // Bar outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}
