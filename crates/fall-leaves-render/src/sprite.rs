//! Leaf sprites.

use std::f32::consts::PI;

use fall_leaves_core::SpriteSource;
use tracing::trace;

use crate::{Rgba, hsl_to_rgb};

/// A square RGBA bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    side: u32,
    pixels: Vec<Rgba>,
}

impl Sprite {
    /// Build a sprite of `side` pixels (at least one) by evaluating `f` at
    /// every `(x, y)`.
    pub fn from_fn(side: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let side = side.max(1);
        let pixels = (0..side)
            .flat_map(|y| (0..side).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self { side, pixels }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        (x < self.side && y < self.side).then(|| self.pixel_at(x, y))
    }

    /// Pixel lookup for callers that already clipped to the sprite.
    pub(crate) fn pixel_at(&self, x: u32, y: u32) -> Rgba {
        self.pixels[y as usize * self.side as usize + x as usize]
    }

    /// Number of pixels with any coverage.
    pub fn coverage(&self) -> usize {
        self.pixels.iter().filter(|px| px.a > 0).count()
    }
}

/// Shape and colour parameters of one leaf asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafKind {
    /// Base hue in degrees.
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    /// Half-width of the blade relative to its half-length.
    pub aspect: f32,
    /// Rotation of the blade axis, in radians.
    pub tilt: f32,
}

/// The built-in leaf assets: reds, oranges, ambers and one late-summer green.
pub const LEAF_KINDS: [LeafKind; 6] = [
    LeafKind { hue: 6.0, saturation: 0.75, lightness: 0.42, aspect: 0.46, tilt: 0.6 },
    LeafKind { hue: 24.0, saturation: 0.85, lightness: 0.48, aspect: 0.56, tilt: -0.4 },
    LeafKind { hue: 40.0, saturation: 0.9, lightness: 0.5, aspect: 0.38, tilt: 1.1 },
    LeafKind { hue: 52.0, saturation: 0.8, lightness: 0.55, aspect: 0.5, tilt: -0.9 },
    LeafKind { hue: 16.0, saturation: 0.6, lightness: 0.35, aspect: 0.62, tilt: 0.2 },
    LeafKind { hue: 78.0, saturation: 0.45, lightness: 0.4, aspect: 0.42, tilt: -1.3 },
];

/// Peak opacity of a leaf; overlapping leaves show through slightly.
const LEAF_ALPHA: f32 = 235.0;

/// Asset provider that rasterises [`LEAF_KINDS`] on demand.
///
/// Every request produces a new bitmap; nothing is cached.
#[derive(Debug, Default)]
pub struct LeafSprites {
    issued: usize,
}

impl LeafSprites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total sprites produced so far.
    pub fn issued(&self) -> usize {
        self.issued
    }
}

impl SpriteSource for LeafSprites {
    type Sprite = Sprite;

    fn asset_count(&self) -> usize {
        LEAF_KINDS.len()
    }

    fn sprite(&mut self, asset_index: usize, size: u32) -> Sprite {
        self.issued += 1;
        let kind = &LEAF_KINDS[asset_index % LEAF_KINDS.len()];
        trace!(asset_index, size, "rasterising leaf sprite");
        rasterize(kind, size)
    }
}

/// Draw one leaf blade into a sprite of `size` pixels.
///
/// The blade is a lens shape along a tilted axis, widest a little toward the
/// stem, with an anti-aliased rim and a darker midrib.
pub fn rasterize(kind: &LeafKind, size: u32) -> Sprite {
    let side = size.max(1);
    let half = side as f32 / 2.0;
    let (sin, cos) = kind.tilt.sin_cos();
    let base = hsl_to_rgb(kind.hue, kind.saturation, kind.lightness);
    let rib = hsl_to_rgb(kind.hue, kind.saturation, kind.lightness * 0.6);
    let tip = hsl_to_rgb(kind.hue + 8.0, kind.saturation, (kind.lightness * 1.25).min(0.9));
    // One pixel expressed in normalised blade units.
    let pixel = 1.0 / half;

    Sprite::from_fn(side, |x, y| {
        let u = (x as f32 + 0.5 - half) / half;
        let v = (y as f32 + 0.5 - half) / half;
        // Rotate into blade space: `along` runs stem (+1) to tip (-1).
        let across = u * cos - v * sin;
        let along = u * sin + v * cos;

        let t = (0.95 - along) / 1.9;
        if !(0.0..=1.0).contains(&t) {
            return Rgba::TRANSPARENT;
        }
        let width = kind.aspect * (PI * t).sin() * (1.0 - 0.3 * t);
        let distance = across.abs() - width;
        let coverage = (0.5 - distance / pixel).clamp(0.0, 1.0);
        if coverage == 0.0 {
            return Rgba::TRANSPARENT;
        }

        let color = if across.abs() < 0.05 + pixel * 0.5 && t > 0.08 && t < 0.92 {
            rib
        } else {
            mix(base, tip, t)
        };
        color.with_alpha((coverage * LEAF_ALPHA) as u8)
    })
}

fn mix(a: Rgba, b: Rgba, amount: f32) -> Rgba {
    let amount = amount.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * amount) as u8;
    Rgba::opaque(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_side_at_least_one() {
        let mut sprites = LeafSprites::new();
        assert_eq!(sprites.sprite(0, 0).side(), 1);
        assert_eq!(sprites.sprite(3, 17).side(), 17);
        assert_eq!(sprites.issued(), 2);
    }

    #[test]
    fn test_every_kind_draws_a_translucent_leaf() {
        let mut sprites = LeafSprites::new();
        for index in 0..sprites.asset_count() {
            let sprite = sprites.sprite(index, 24);
            let total = (24 * 24) as usize;
            let covered = sprite.coverage();
            assert!(covered > total / 10, "kind {index} covers only {covered} pixels");
            assert!(covered < total, "kind {index} fills its whole square");

            let max_alpha = (0..24)
                .flat_map(|y| (0..24).map(move |x| (x, y)))
                .filter_map(|(x, y)| sprite.pixel(x, y))
                .map(|px| px.a)
                .max()
                .unwrap_or(0);
            assert!(max_alpha > 200 && max_alpha < 255);
        }
    }

    #[test]
    fn test_corners_are_clear() {
        let sprite = rasterize(&LEAF_KINDS[0], 32);
        assert_eq!(sprite.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(sprite.pixel(31, 31).map(|px| px.a), Some(0));
        assert_eq!(sprite.pixel(32, 0), None);
    }

    #[test]
    fn test_requests_are_not_cached() {
        let mut sprites = LeafSprites::new();
        let a = sprites.sprite(1, 12);
        let b = sprites.sprite(1, 12);
        assert_eq!(a, b);
        assert_eq!(sprites.issued(), 2);
    }
}
