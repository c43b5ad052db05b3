//! Rendering for the Fall Leaves screensaver.
//!
//! Leaves are composited into an off-screen [`Canvas`] every frame and the
//! finished canvas is handed to a [`Surface`] in one call, so the visible
//! output never shows a half-drawn frame. The terminal surface packs two
//! canvas rows into each cell using the upper half block glyph.

mod canvas;
mod color;
mod compositor;
mod sprite;
mod surface;

pub use canvas::{Canvas, RenderError};
pub use color::{Rgba, hsl_to_rgb};
pub use compositor::Compositor;
pub use sprite::{LEAF_KINDS, LeafKind, LeafSprites, Sprite, rasterize};
pub use surface::Surface;
