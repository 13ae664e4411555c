//! Circular hue/saturation wheel view.
//!
//! The wheel is rasterized at the session's fixed canvas size and current
//! value, then scaled to the widget. Pointer positions are mapped back into
//! canvas pixels before they reach the session.

use std::sync::Arc;

use floem::kurbo::{Circle, Point, Rect};
use floem::peniko::{self, Blob, Color};

use floem::reactive::{RwSignal, SignalUpdate, SignalWith, create_effect};
use floem::views::Decorators;
use floem::{
    View, ViewId,
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
};
use floem_renderer::Renderer;

use crate::color::Hsv;
use crate::constants;
use crate::raster::{WheelCache, WheelGeometry};
use crate::session::ColorSession;
use crate::surface::PixelBuffer;

/// Wrap a pixel buffer as a renderer image plus its cache hash.
pub(crate) fn to_image(buf: &PixelBuffer) -> (peniko::Image, Vec<u8>) {
    let blob = Blob::new(Arc::new(buf.as_bytes().to_vec()));
    let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, buf.width(), buf.height());
    (img, blob.id().to_le_bytes().to_vec())
}

pub(crate) struct ColorWheel {
    id: ViewId,
    session: RwSignal<ColorSession>,
    held: bool,
    hsv: Hsv,
    geometry: WheelGeometry,
    size: floem::taffy::prelude::Size<f32>,
    cache: WheelCache,
    /// Uploaded wheel image and the value it was rasterized at.
    wheel_img: Option<(peniko::Image, u64)>,
    wheel_hash: Vec<u8>,
}

/// Creates the hue/saturation wheel bound to `session`.
pub(crate) fn color_wheel(session: RwSignal<ColorSession>) -> ColorWheel {
    let id = ViewId::new();

    create_effect(move |_| {
        let hsv = session.with(|s| s.hsv());
        id.update_state(hsv);
    });

    let (hsv, geometry) = session.with_untracked(|s| (s.hsv(), *s.wheel_geometry()));

    ColorWheel {
        id,
        session,
        held: false,
        hsv,
        geometry,
        size: Default::default(),
        cache: WheelCache::new(),
        wheel_img: None,
        wheel_hash: Vec::new(),
    }
    .style(|s| {
        s.flex_grow(1.0)
            .aspect_ratio(1.0)
            .min_height(100.0)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl ColorWheel {
    /// The square rect centered within the widget, used for drawing the wheel.
    fn wheel_rect(&self) -> Rect {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        let side = w.min(h);
        let x0 = (w - side) / 2.0;
        let y0 = (h - side) / 2.0;
        Rect::new(x0, y0, x0 + side, y0 + side)
    }

    /// Widget point → canvas pixel.
    fn to_canvas(&self, pos: Point) -> Option<(f64, f64)> {
        let rect = self.wheel_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        let sx = self.geometry.width as f64 / rect.width();
        let sy = self.geometry.height as f64 / rect.height();
        Some(((pos.x - rect.x0) * sx, (pos.y - rect.y0) * sy))
    }

    /// Canvas pixel → widget point.
    fn to_widget(&self, x: f64, y: f64) -> Point {
        let rect = self.wheel_rect();
        let sx = rect.width() / self.geometry.width.max(1) as f64;
        let sy = rect.height() / self.geometry.height.max(1) as f64;
        Point::new(rect.x0 + x * sx, rect.y0 + y * sy)
    }

    fn ensure_wheel_image(&mut self) {
        let key = self.hsv.v.to_bits();
        if matches!(self.wheel_img, Some((_, k)) if k == key) {
            return;
        }
        let (img, hash) = to_image(self.cache.get(&self.geometry, self.hsv.v));
        self.wheel_img = Some((img, key));
        self.wheel_hash = hash;
    }
}

impl View for ColorWheel {
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
                if let Some((x, y)) = self.to_canvas(e.pos) {
                    self.session.update(|s| {
                        s.press_wheel(x, y);
                    });
                }
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    if let Some((x, y)) = self.to_canvas(e.pos) {
                        let inside = self.geometry.pick(x, y).is_some();
                        if inside {
                            self.session.update(|s| {
                                s.drag_wheel(x, y);
                            });
                        }
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
        if self.size.width == 0.0 || self.size.height == 0.0 {
            return;
        }

        let wheel_rect = self.wheel_rect();
        self.ensure_wheel_image();
        if let Some((img, _)) = &self.wheel_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.wheel_hash,
                },
                wheel_rect,
            );
        }

        // Cursor ring
        let (x, y) = self.geometry.point_for(self.hsv.h, self.hsv.s);
        let cur_pt = self.to_widget(x, y);
        let outer = Circle::new(cur_pt, constants::CURSOR_RADIUS + 1.0);
        cx.stroke(
            &outer,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let cursor = Circle::new(cur_pt, constants::CURSOR_RADIUS);
        cx.stroke(&cursor, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
        let inner = Circle::new(cur_pt, constants::CURSOR_RADIUS - 1.5);
        cx.stroke(
            &inner,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}
