//! Depth gradient for attractor trails.

/// Hex character → 4-bit value without a branch per character class.
#[inline(always)]
fn hex_digit(b: u8) -> Option<u8> {
    let is_digit = (b.wrapping_sub(b'0') < 10) as u8;
    let is_lower = (b.wrapping_sub(b'a') < 6) as u8;
    let is_upper = (b.wrapping_sub(b'A') < 6) as u8;
    if is_digit | is_lower | is_upper == 0 {
        return None;
    }
    Some(
        is_digit.wrapping_mul(b.wrapping_sub(b'0'))
            .wrapping_add(is_lower.wrapping_mul(b.wrapping_sub(b'a').wrapping_add(10)))
            .wrapping_add(is_upper.wrapping_mul(b.wrapping_sub(b'A').wrapping_add(10))),
    )
}

/// Parse `#RGB` or `#RRGGBB` into normalized RGB.
pub fn parse_hex_rgb(s: &str) -> Option<[f32; 3]> {
    let bytes = s.trim().as_bytes();
    let digits = bytes.strip_prefix(b"#")?;
    let channel = |hi: u8, lo: u8| -> Option<f32> {
        Some(((hex_digit(hi)? << 4) | hex_digit(lo)?) as f32 / 255.0)
    };
    match digits {
        [r, g, b] => Some([channel(*r, *r)?, channel(*g, *g)?, channel(*b, *b)?]),
        [r1, r2, g1, g2, b1, b2] => Some([
            channel(*r1, *r2)?,
            channel(*g1, *g2)?,
            channel(*b1, *b2)?,
        ]),
        _ => None,
    }
}

fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let s = 1.0 - t;
    [a[0] * s + b[0] * t, a[1] * s + b[1] * t, a[2] * s + b[2] * t]
}

/// Two linear segments: far → middle → near.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub stops: [[f32; 3]; 3],
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            stops: [
                [0.169, 0.063, 0.333],
                [0.835, 0.200, 0.412],
                [1.000, 0.847, 0.435],
            ],
        }
    }
}

impl Gradient {
    /// Build from hex stops. Unparseable stops keep their default colour.
    pub fn from_hex(stops: &[String; 3]) -> Self {
        let mut g = Self::default();
        for (slot, hex) in g.stops.iter_mut().zip(stops) {
            match parse_hex_rgb(hex) {
                Some(rgb) => *slot = rgb,
                None => log::warn!("bad gradient colour {:?}, keeping default", hex),
            }
        }
        g
    }

    /// Colour at `t` in `[0, 1]` (clamped).
    pub fn sample(&self, t: f32) -> [f32; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t < 0.5 {
            lerp3(self.stops[0], self.stops[1], t * 2.0)
        } else {
            lerp3(self.stops[1], self.stops[2], (t - 0.5) * 2.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(parse_hex_rgb("#fff"), Some([1.0, 1.0, 1.0]));
        let c = parse_hex_rgb("#FF8000").unwrap();
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(parse_hex_rgb("fff"), None);
        assert_eq!(parse_hex_rgb("#ggg"), None);
        assert_eq!(parse_hex_rgb("#12345"), None);
    }

    #[test]
    fn gradient_hits_stops() {
        let g = Gradient::default();
        assert_eq!(g.sample(0.0), g.stops[0]);
        assert_eq!(g.sample(0.5), g.stops[1]);
        assert_eq!(g.sample(1.0), g.stops[2]);
        assert_eq!(g.sample(7.0), g.stops[2]);
    }

    #[test]
    fn bad_config_stop_falls_back() {
        let g = Gradient::from_hex(&["#000".into(), "nope".into(), "#fff".into()]);
        assert_eq!(g.stops[0], [0.0, 0.0, 0.0]);
        assert_eq!(g.stops[1], Gradient::default().stops[1]);
        assert_eq!(g.stops[2], [1.0, 1.0, 1.0]);
    }
}
