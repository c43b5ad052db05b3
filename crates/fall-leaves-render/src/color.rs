//! Colour type and blending.

use ratatui::style::Color;

/// An RGBA colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Composite `self` over `dst` (Porter-Duff source-over).
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = u32::from(self.a);
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }

        let da = u32::from(dst.a);
        let inv = 255 - sa;
        // Output alpha scaled by 255.
        let out = sa * 255 + da * inv;
        let channel = |s: u8, d: u8| {
            ((u32::from(s) * sa * 255 + u32::from(d) * da * inv + out / 2) / out) as u8
        };

        Rgba {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: ((out + 127) / 255) as u8,
        }
    }
}

impl From<[u8; 3]> for Rgba {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgba::opaque(r, g, b)
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::Rgb(color.r, color.g, color.b)
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in `0.0..=1.0`) to
/// an opaque colour.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgba {
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Rgba::opaque(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgba::opaque((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_opaque_and_transparent() {
        let red = Rgba::opaque(255, 0, 0);
        let blue = Rgba::opaque(0, 0, 255);
        assert_eq!(red.over(blue), red);
        assert_eq!(Rgba::TRANSPARENT.over(blue), blue);
    }

    #[test]
    fn test_over_half_alpha_on_opaque() {
        let src = Rgba::new(255, 0, 0, 128);
        let out = src.over(Rgba::BLACK);
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 128);
        assert_eq!(out.g, 0);
    }

    #[test]
    fn test_over_on_transparent_keeps_source_colour() {
        let src = Rgba::new(200, 100, 50, 64);
        let out = src.over(Rgba::TRANSPARENT);
        assert_eq!(out, src);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgba::opaque(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Rgba::opaque(0, 255, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.0), Rgba::BLACK);
    }
}
