//! Hue/saturation wheel and value bar rasterization.
//!
//! Angle around the center maps to hue, distance from the center maps to
//! saturation (0 at the center, 1 at the rim). The value channel is fixed per
//! render, so the wheel bitmap only changes when V does.

use std::f64::consts::TAU;

use crate::color::{Hsv, Rgb, hsv_to_rgb};
use crate::surface::{PixelBuffer, Surface};

/// Height of the value indicator line in pixels.
pub const INDICATOR_HEIGHT: f64 = 2.0;

/// Canvas size plus the disk's center and radius, all in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub width: u32,
    pub height: u32,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl WheelGeometry {
    /// Center the disk on the canvas, leaving `margin` pixels to the nearest edge.
    pub fn for_canvas(width: u32, height: u32, margin: f64) -> Self {
        let w = width as f64;
        let h = height as f64;
        Self {
            width,
            height,
            cx: w / 2.0,
            cy: h / 2.0,
            radius: (w.min(h) / 2.0 - margin).max(0.0),
        }
    }

    /// Hue and saturation under canvas point `(x, y)`, or `None` outside the disk.
    pub fn pick(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.radius <= 0.0 {
            return None;
        }
        let dx = x - self.cx;
        let dy = y - self.cy;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > self.radius {
            return None;
        }
        let mut angle = dy.atan2(dx);
        if angle < 0.0 {
            angle += TAU;
        }
        Some((angle / TAU, dist / self.radius))
    }

    /// Canvas point for a hue/saturation pair; inverse of [`pick`](Self::pick).
    pub fn point_for(&self, hue: f64, saturation: f64) -> (f64, f64) {
        let angle = hue * TAU;
        let r = saturation * self.radius;
        (self.cx + angle.cos() * r, self.cy + angle.sin() * r)
    }
}

/// Rasterize the disk at value `v`. Pixels outside the radius stay transparent.
pub fn rasterize_wheel(geometry: &WheelGeometry, v: f64) -> PixelBuffer {
    let mut buf = PixelBuffer::new(geometry.width, geometry.height);

    for py in 0..geometry.height {
        for px in 0..geometry.width {
            if let Some((hue, sat)) = geometry.pick(px as f64, py as f64) {
                buf.set_pixel(px, py, hsv_to_rgb(hue, sat, v));
            }
        }
    }

    buf
}

/// Rasterize the wheel and upload it to `surface`.
pub fn draw_wheel(surface: &mut impl Surface, geometry: &WheelGeometry, v: f64) {
    surface.put_pixels(&rasterize_wheel(geometry, v));
}

/// Draw the value bar: the selected hue/saturation at full value on top,
/// fading to black at the bottom, with a white line at the current value.
pub fn draw_value_bar(surface: &mut impl Surface, hsv: Hsv) {
    let (w, h) = surface.size();
    let top = hsv_to_rgb(hsv.h, hsv.s, 1.0);
    surface.fill_vertical_gradient(top, Rgb::BLACK);
    // Snap to a whole row so the line stays exactly INDICATOR_HEIGHT rows.
    let y0 = (indicator_y(hsv.v, h as f64) - INDICATOR_HEIGHT / 2.0).round();
    surface.fill_rect(0.0, y0, w as f64, INDICATOR_HEIGHT, Rgb::WHITE);
}

/// Value selected at bar row `y`, clamped to 0.0–1.0.
pub fn value_at(y: f64, bar_height: f64) -> f64 {
    if bar_height <= 0.0 {
        return 0.0;
    }
    (1.0 - y / bar_height).clamp(0.0, 1.0)
}

/// Bar row of the indicator for value `v`.
pub fn indicator_y(v: f64, bar_height: f64) -> f64 {
    (1.0 - v) * bar_height
}

/// Keeps the last wheel bitmap and re-rasterizes only when V or the geometry
/// changes.
#[derive(Debug, Default)]
pub struct WheelCache {
    key: Option<(WheelGeometry, u64)>,
    buffer: Option<PixelBuffer>,
    renders: u64,
}

impl WheelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wheel for `(geometry, v)`, rasterizing on a miss.
    pub fn get(&mut self, geometry: &WheelGeometry, v: f64) -> &PixelBuffer {
        let key = (*geometry, v.to_bits());
        if self.key != Some(key) || self.buffer.is_none() {
            log::trace!(
                "Rasterizing {}x{} wheel at v={v:.3}",
                geometry.width,
                geometry.height
            );
            self.key = Some(key);
            self.renders += 1;
            self.buffer = Some(rasterize_wheel(geometry, v));
        }
        self.buffer
            .get_or_insert_with(|| rasterize_wheel(geometry, v))
    }

    /// Number of rasterizations performed so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> WheelGeometry {
        // 100x100 canvas, center (50, 50), radius 40
        WheelGeometry::for_canvas(100, 100, 10.0)
    }

    #[test]
    fn geometry_matches_canvas() {
        let g = geometry();
        assert_eq!(g.cx, 50.0);
        assert_eq!(g.cy, 50.0);
        assert_eq!(g.radius, 40.0);
    }

    #[test]
    fn outside_radius_is_transparent() {
        let buf = rasterize_wheel(&geometry(), 1.0);
        assert_eq!(buf.pixel(0, 0).unwrap()[3], 0);
        assert_eq!(buf.pixel(91, 50).unwrap()[3], 0);
        assert_eq!(buf.pixel(50, 5).unwrap()[3], 0);
    }

    #[test]
    fn center_is_unsaturated() {
        let g = geometry();
        assert_eq!(g.pick(50.0, 50.0), Some((0.0, 0.0)));
        let buf = rasterize_wheel(&g, 0.5);
        // v = 0.5 → 127.5 → 128 gray
        assert_eq!(buf.pixel(50, 50), Some([128, 128, 128, 255]));
    }

    #[test]
    fn rim_is_fully_saturated() {
        let g = geometry();
        let (hue, sat) = g.pick(90.0, 50.0).unwrap();
        assert_eq!(hue, 0.0);
        assert_eq!(sat, 1.0);
        let buf = rasterize_wheel(&g, 1.0);
        assert_eq!(buf.pixel(90, 50), Some([255, 0, 0, 255]));
    }

    #[test]
    fn angle_below_center_is_normalized_positive() {
        let g = geometry();
        // straight up on screen is atan2(-1, 0) = -π/2 → 3/4 turn
        let (hue, _) = g.pick(50.0, 20.0).unwrap();
        assert!((hue - 0.75).abs() < 1e-12);
        // straight down is a quarter turn
        let (hue, _) = g.pick(50.0, 80.0).unwrap();
        assert!((hue - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rasterization_is_deterministic() {
        let g = WheelGeometry::for_canvas(64, 48, 4.0);
        assert_eq!(rasterize_wheel(&g, 0.7), rasterize_wheel(&g, 0.7));
        assert_ne!(rasterize_wheel(&g, 0.7), rasterize_wheel(&g, 0.2));
    }

    #[test]
    fn draw_wheel_uploads_to_surface() {
        let g = geometry();
        let mut surface = PixelBuffer::new(100, 100);
        draw_wheel(&mut surface, &g, 1.0);
        assert_eq!(surface, rasterize_wheel(&g, 1.0));
    }

    #[test]
    fn point_for_inverts_pick() {
        let g = geometry();
        let (x, y) = g.point_for(0.3, 0.6);
        let (h, s) = g.pick(x, y).unwrap();
        assert!((h - 0.3).abs() < 1e-9);
        assert!((s - 0.6).abs() < 1e-9);
    }

    #[test]
    fn zero_radius_picks_nothing() {
        let g = WheelGeometry::for_canvas(10, 10, 10.0);
        assert_eq!(g.radius, 0.0);
        assert_eq!(g.pick(5.0, 5.0), None);
    }

    #[test]
    fn value_bar_gradient_and_indicator() {
        let mut bar = PixelBuffer::new(4, 100);
        draw_value_bar(&mut bar, Hsv::new(0.0, 1.0, 0.5));
        // top is the full-value hue
        let top = bar.pixel(0, 0).unwrap();
        assert!(top[0] > 250 && top[1] == 0 && top[2] == 0);
        // indicator covers rows 49 and 50
        assert_eq!(bar.pixel(0, 49), Some([255, 255, 255, 255]));
        assert_eq!(bar.pixel(3, 50), Some([255, 255, 255, 255]));
        assert_ne!(bar.pixel(0, 48), Some([255, 255, 255, 255]));
        assert_ne!(bar.pixel(0, 51), Some([255, 255, 255, 255]));
        // bottom fades to black
        assert!(bar.pixel(0, 99).unwrap()[0] < 5);
    }

    #[test]
    fn indicator_is_two_rows_at_fractional_values() {
        let white_rows = |v: f64| {
            let mut bar = PixelBuffer::new(4, 100);
            draw_value_bar(&mut bar, Hsv::new(0.0, 1.0, v));
            (0..100)
                .filter(|&y| bar.pixel(0, y) == Some([255, 255, 255, 255]))
                .collect::<Vec<u32>>()
        };
        assert_eq!(white_rows(0.497), vec![49, 50]);
        assert_eq!(white_rows(0.49), vec![50, 51]);
        assert_eq!(white_rows(0.333), vec![66, 67]);
    }

    #[test]
    fn value_at_clamps() {
        assert_eq!(value_at(0.0, 200.0), 1.0);
        assert_eq!(value_at(200.0, 200.0), 0.0);
        assert_eq!(value_at(50.0, 200.0), 0.75);
        assert_eq!(value_at(-20.0, 200.0), 1.0);
        assert_eq!(value_at(400.0, 200.0), 0.0);
        assert_eq!(indicator_y(0.75, 200.0), 50.0);
    }

    #[test]
    fn cache_only_rerenders_on_value_change() {
        let g = geometry();
        let mut cache = WheelCache::new();
        let first = cache.get(&g, 0.8).clone();
        cache.get(&g, 0.8);
        assert_eq!(cache.renders(), 1);
        assert_eq!(cache.get(&g, 0.8), &first);
        cache.get(&g, 0.4);
        assert_eq!(cache.renders(), 2);
        assert_eq!(cache.get(&g, 0.4), &rasterize_wheel(&g, 0.4));
    }
}
