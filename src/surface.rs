//! Drawing target abstraction.
//!
//! The rasterizers only need to write a pixel buffer, fill a vertical
//! gradient and fill a rectangle. [`PixelBuffer`] implements all of it in
//! memory; the views upload the result as an image.

use crate::color::Rgb;

/// A fixed-size 2D drawing target.
pub trait Surface {
    /// Size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Replace the whole surface with `pixels`. Sizes must match.
    fn put_pixels(&mut self, pixels: &PixelBuffer);

    /// Fill the surface with a top-to-bottom linear gradient.
    fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb);

    /// Fill an axis-aligned rectangle with an opaque color. The rectangle is
    /// clipped to the surface.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb);
}

/// Row-major RGBA8 buffer. Starts fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    /// Write an opaque pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o] = color.r;
        self.data[o + 1] = color.g;
        self.data[o + 2] = color.b;
        self.data[o + 3] = 255;
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer) {
        if pixels.size() != self.size() {
            log::warn!(
                "Ignoring {}x{} pixel upload to {}x{} surface",
                pixels.width,
                pixels.height,
                self.width,
                self.height
            );
            return;
        }
        self.data.copy_from_slice(&pixels.data);
    }

    fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb) {
        let h = self.height.max(1) as f64;
        let lerp = |a: u8, b: u8, t: f64| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        for py in 0..self.height {
            // sample at the pixel center
            let t = (py as f64 + 0.5) / h;
            let c = Rgb::new(
                lerp(top.r, bottom.r, t),
                lerp(top.g, bottom.g, t),
                lerp(top.b, bottom.b, t),
            );
            for px in 0..self.width {
                self.set_pixel(px, py, c);
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let x0 = x.floor().max(0.0) as u32;
        let y0 = y.floor().max(0.0) as u32;
        let x1 = (x + w).ceil().clamp(0.0, self.width as f64) as u32;
        let y1 = (y + h).ceil().clamp(0.0, self.height as f64) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, color);
            }
        }
    }
}
