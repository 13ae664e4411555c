//! Color math on normalized f64 channels (0.0–1.0).

/// HSV → RGB. All values 0.0–1.0, hue wraps at 1.0.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = h * 6.0;
    let i = h6.floor();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// RGB → HSV. All values 0.0–1.0.
pub(crate) fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    (h, s, v)
}

/// Normalized channel → 0–255, rounded to nearest.
pub(crate) fn to_byte(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_sectors() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        let (r, g, b) = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9 && (g - 1.0).abs() < 1e-9 && b.abs() < 1e-9);
        let (r, g, b) = hsv_to_rgb(2.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9 && g.abs() < 1e-9 && (b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hue_one_wraps_to_red() {
        let (r, g, b) = hsv_to_rgb(1.0, 1.0, 1.0);
        assert!((r - 1.0).abs() < 1e-9);
        assert!(g.abs() < 1e-9);
        assert!(b.abs() < 1e-9);
    }

    #[test]
    fn rgb_to_hsv_inverts_sectors() {
        for &h in &[0.0, 0.1, 0.25, 0.5, 0.7, 0.9] {
            let (r, g, b) = hsv_to_rgb(h, 0.8, 0.6);
            let (h2, s2, v2) = rgb_to_hsv(r, g, b);
            assert!((h - h2).abs() < 1e-9, "hue {h} came back as {h2}");
            assert!((s2 - 0.8).abs() < 1e-9);
            assert!((v2 - 0.6).abs() < 1e-9);
        }
    }

    #[test]
    fn to_byte_rounds_and_saturates() {
        assert_eq!(to_byte(0.5), 128);
        assert_eq!(to_byte(1.2), 255);
        assert_eq!(to_byte(-0.1), 0);
    }
}
