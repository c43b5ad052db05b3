//! Off-screen RGBA frame buffer.

use std::collections::TryReserveError;

use fall_leaves_core::{Point, Size};
use thiserror::Error;

use crate::{Rgba, Sprite};

/// Failures while setting up rendering resources.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot create a frame buffer for an empty {width}x{height} view")]
    EmptyView { width: u32, height: u32 },
    #[error("failed to allocate a {width}x{height} frame buffer")]
    BufferAllocation {
        width: u32,
        height: u32,
        #[source]
        source: TryReserveError,
    },
}

/// A fixed-size RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: Size,
    pixels: Vec<Rgba>,
}

impl Canvas {
    /// Allocate a transparent canvas of `size`.
    pub fn new(size: Size) -> Result<Self, RenderError> {
        if size.is_empty() {
            return Err(RenderError::EmptyView {
                width: size.width,
                height: size.height,
            });
        }

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(size.area())
            .map_err(|source| RenderError::BufferAllocation {
                width: size.width,
                height: size.height,
                source,
            })?;
        pixels.resize(size.area(), Rgba::TRANSPARENT);

        Ok(Self { size, pixels })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Blend `sprite` over the canvas with its top-left corner at `position`.
    /// Parts outside the canvas are clipped.
    pub fn draw_over(&mut self, sprite: &Sprite, position: Point) {
        let side = i64::from(sprite.side());
        let (px, py) = (i64::from(position.x), i64::from(position.y));
        let x0 = px.max(0);
        let y0 = py.max(0);
        let x1 = (px + side).min(i64::from(self.size.width));
        let y1 = (py + side).min(i64::from(self.size.height));

        let width = self.size.width as usize;
        for y in y0..y1 {
            let row = y as usize * width;
            for x in x0..x1 {
                let src = sprite.pixel_at((x - px) as u32, (y - py) as u32);
                if src.a == 0 {
                    continue;
                }
                let dst = &mut self.pixels[row + x as usize];
                *dst = src.over(*dst);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.size.width && y < self.size.height)
            .then(|| y as usize * self.size.width as usize + x as usize)
    }
}
