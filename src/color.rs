//! `Rgb` and `Hsv`, the color types shared by the wheel, the catalog and the
//! matcher, plus hex parsing/formatting and color distance.

use std::fmt;

use crate::math;

/// 8-bit sRGB color. Displayed as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical `#rrggbb` form.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r as f64, self.g as f64, self.b as f64)
    }

    /// Convert to HSV (all 0.0–1.0).
    pub fn to_hsv(self) -> Hsv {
        let (h, s, v) = math::rgb_to_hsv(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        );
        Hsv { h, s, v }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

/// Hue/saturation/value, each 0.0–1.0. Hue 0.0 and 1.0 are the same angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self.h, self.s, self.v)
    }
}

impl Default for Hsv {
    /// Pure red at full value, where the tool starts.
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }
}

/// Standard 6-sector HSV → RGB. Inputs are expected to be in range already.
///
/// With `s == 0` the result is the achromatic gray `(v, v, v)`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let (r, g, b) = math::hsv_to_rgb(h, s, v);
    Rgb::new(math::to_byte(r), math::to_byte(g), math::to_byte(b))
}

/// Format channels as `#rrggbb`. Each channel is clamped to 0–255 and rounded.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    let byte = |c: f64| c.round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))
}

/// Parse exactly six hex digits, with or without a leading `#`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let stripped = hex.strip_prefix('#').unwrap_or(hex);
    if stripped.len() != 6 || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
    let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
    let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Normalize a 3- or 6-digit hex color to lowercase `#rrggbb`.
///
/// Shorthand expands by duplicating each digit (`#abc` → `#aabbcc`).
/// Anything else is not a color and yields `None`.
pub fn normalize_hex(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match stripped.len() {
        3 => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in stripped.chars() {
                let c = c.to_ascii_lowercase();
                out.push(c);
                out.push(c);
            }
            Some(out)
        }
        6 => Some(format!("#{}", stripped.to_ascii_lowercase())),
        _ => None,
    }
}

/// Euclidean distance in RGB space.
///
/// Not perceptually uniform; catalog ordering depends on this exact metric.
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}
