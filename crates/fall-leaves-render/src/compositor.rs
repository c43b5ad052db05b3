//! Double-buffered frame composition.

use fall_leaves_core::{Size, SpriteSource};
use fall_leaves_field::LeafField;
use tracing::{debug, trace};

use crate::{Canvas, RenderError, Rgba, Sprite, Surface};

/// Composites leaf sprites into an off-screen canvas and presents the
/// result in one step.
#[derive(Debug)]
pub struct Compositor {
    buffer: Canvas,
    background: Rgba,
    frames: u64,
}

impl Compositor {
    /// Allocate the off-screen buffer for `view`. The buffer keeps this size
    /// for the life of the compositor.
    pub fn new(view: Size, background: Rgba) -> Result<Self, RenderError> {
        let mut buffer = Canvas::new(view)?;
        buffer.fill(background);
        debug!(
            width = view.width,
            height = view.height,
            "off-screen buffer allocated"
        );
        Ok(Self {
            buffer,
            background,
            frames: 0,
        })
    }

    /// Render one frame of `field` and present it on `surface`.
    ///
    /// The buffer is cleared, live leaves are blended in draw order (far
    /// leaves first, so near ones cover them) and only then is the finished
    /// buffer presented.
    pub fn render_frame<P, S>(&mut self, field: &LeafField<P>, surface: &mut S)
    where
        P: SpriteSource<Sprite = Sprite>,
        S: Surface + ?Sized,
    {
        self.buffer.fill(self.background);

        let mut drawn = 0usize;
        for leaf in field.leaves() {
            self.buffer.draw_over(leaf.sprite(), leaf.position());
            drawn += 1;
        }

        surface.present(&self.buffer);
        self.frames += 1;
        trace!(frame = self.frames, drawn, "frame presented");
    }

    /// The most recently composited frame.
    pub fn buffer(&self) -> &Canvas {
        &self.buffer
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use fall_leaves_core::FieldSettings;

    use super::*;
    use crate::LeafSprites;

    /// Records every presented frame.
    #[derive(Default)]
    struct RecordingSurface {
        frames: Vec<Canvas>,
    }

    impl Surface for RecordingSurface {
        fn present(&mut self, frame: &Canvas) {
            self.frames.push(frame.clone());
        }
    }

    /// Hands out opaque squares, each in its own colour.
    #[derive(Default)]
    struct SolidSprites {
        issued: u32,
    }

    impl SpriteSource for SolidSprites {
        type Sprite = Sprite;

        fn asset_count(&self) -> usize {
            1
        }

        fn sprite(&mut self, _asset_index: usize, size: u32) -> Sprite {
            self.issued += 1;
            let id = self.issued;
            let color = Rgba::opaque((id * 37 % 251) as u8, (id * 91 % 241) as u8, 200);
            Sprite::from_fn(size, |_, _| color)
        }
    }

    const BACKGROUND: Rgba = Rgba::opaque(12, 12, 16);

    fn settings(count: usize) -> FieldSettings {
        FieldSettings {
            leaf_count: count,
            ..Default::default()
        }
    }

    fn covers(position: fall_leaves_core::Point, side: u32, x: u32, y: u32) -> bool {
        let (x, y) = (x as i64, y as i64);
        let (left, top) = (position.x as i64, position.y as i64);
        x >= left && x < left + side as i64 && y >= top && y < top + side as i64
    }

    #[test]
    fn test_empty_view_is_an_error() {
        assert!(matches!(
            Compositor::new(Size::new(40, 0), BACKGROUND),
            Err(RenderError::EmptyView { .. })
        ));
    }

    #[test]
    fn test_presents_once_per_frame() {
        let view = Size::new(60, 40);
        let mut field = LeafField::new(view, settings(10), LeafSprites::new(), 1);
        let mut compositor = Compositor::new(view, BACKGROUND).unwrap();
        let mut surface = RecordingSurface::default();

        for _ in 0..25 {
            field.tick();
            compositor.render_frame(&field, &mut surface);
        }
        assert_eq!(surface.frames.len(), 25);
        assert_eq!(compositor.frames(), 25);
        assert_eq!(surface.frames.last(), Some(compositor.buffer()));
        assert_eq!(compositor.buffer().size(), view);
    }

    #[test]
    fn test_nearest_leaf_wins_and_rest_is_background() {
        let view = Size::new(80, 50);
        let mut field = LeafField::new(view, settings(30), SolidSprites::default(), 4);
        let mut compositor = Compositor::new(view, BACKGROUND).unwrap();
        let mut surface = RecordingSurface::default();

        for _ in 0..400 {
            field.tick();
        }
        compositor.render_frame(&field, &mut surface);
        let frame = compositor.buffer();

        let leaves: Vec<_> = field.leaves().collect();
        let mut covered_pixels = 0;
        for y in 0..view.height {
            for x in 0..view.width {
                let top = leaves
                    .iter()
                    .rev()
                    .find(|leaf| covers(leaf.position(), leaf.sprite().side(), x, y));
                let expected = match top {
                    Some(leaf) => {
                        covered_pixels += 1;
                        leaf.sprite().pixel(0, 0).unwrap()
                    }
                    None => BACKGROUND,
                };
                assert_eq!(frame.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
        assert!(covered_pixels > 0, "no leaf reached the view");
    }

    #[test]
    fn test_previous_frame_is_cleared() {
        let view = Size::new(40, 30);
        let mut field = LeafField::new(view, settings(8), SolidSprites::default(), 8);
        let mut compositor = Compositor::new(view, BACKGROUND).unwrap();
        let mut surface = RecordingSurface::default();

        for _ in 0..300 {
            field.tick();
            compositor.render_frame(&field, &mut surface);
        }

        let leaves: Vec<_> = field.leaves().collect();
        let frame = compositor.buffer();
        for y in 0..view.height {
            for x in 0..view.width {
                let covered = leaves
                    .iter()
                    .any(|leaf| covers(leaf.position(), leaf.sprite().side(), x, y));
                if !covered {
                    assert_eq!(frame.pixel(x, y), Some(BACKGROUND));
                }
            }
        }
    }
}
