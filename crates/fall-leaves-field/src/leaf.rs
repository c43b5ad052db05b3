//! A single falling leaf.

use fall_leaves_core::{Point, Rect};

/// Where a leaf is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafState {
    /// Created but not yet moved.
    Spawned,
    /// Moving through the view.
    Falling,
    /// Left its bounds; waiting to be replaced.
    Dead,
}

/// One falling leaf and the sprite it owns.
#[derive(Debug)]
pub struct Leaf<S> {
    sprite: S,
    asset_index: usize,
    position: Point,
    depth: i32,
    size: i32,
    /// Pixels per second.
    speed: i32,
    /// Fixed-point progress toward the next whole-pixel step.
    fudge: i32,
    bounds: Rect,
    state: LeafState,
}

impl<S> Leaf<S> {
    pub(crate) fn new(
        sprite: S,
        asset_index: usize,
        position: Point,
        depth: i32,
        size: i32,
        speed: i32,
        bounds: Rect,
    ) -> Self {
        Self {
            sprite,
            asset_index,
            position,
            depth,
            size: size.max(0),
            speed: speed.max(0),
            fudge: 0,
            bounds,
            state: LeafState::Spawned,
        }
    }

    /// Move the leaf for one tick of a simulation running at `ticks_per_second`.
    ///
    /// `speed` is accumulated each tick and converted into whole-pixel steps,
    /// so a leaf can fall slower than one pixel per tick without drifting.
    pub fn update(&mut self, ticks_per_second: u32) {
        if self.state == LeafState::Dead {
            return;
        }
        self.state = LeafState::Falling;

        let ticks_per_second = ticks_per_second.max(1).min(i32::MAX as u32) as i32;
        self.fudge = self.fudge.saturating_add(self.speed);
        while self.fudge >= ticks_per_second {
            self.position.y += 1;
            self.fudge -= ticks_per_second;
        }

        if !self.bounds.contains(self.position) {
            self.state = LeafState::Dead;
        }
    }

    pub fn sprite(&self) -> &S {
        &self.sprite
    }

    pub fn asset_index(&self) -> usize {
        self.asset_index
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn state(&self) -> LeafState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state != LeafState::Dead
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(speed: i32, bounds: Rect) -> Leaf<()> {
        Leaf::new((), 0, Point::new(0, 0), 50, 10, speed, bounds)
    }

    #[test]
    fn test_half_pixel_per_tick() {
        let mut leaf = leaf(50, Rect::new(-10, -100, 100, 100));
        let mut last_y = leaf.position().y;
        for tick in 1..=20 {
            leaf.update(100);
            let y = leaf.position().y;
            assert!(y - last_y <= 1, "moved more than one pixel in a tick");
            assert_eq!(y, tick / 2);
            last_y = y;
        }
    }

    #[test]
    fn test_fast_leaf_moves_several_pixels() {
        let mut leaf = leaf(250, Rect::new(-10, -100, 100, 100));
        leaf.update(100);
        assert_eq!(leaf.position().y, 2);
        leaf.update(100);
        assert_eq!(leaf.position().y, 5);
    }

    #[test]
    fn test_state_transitions() {
        let mut leaf = leaf(100, Rect::new(-10, -100, 100, 1));
        assert_eq!(leaf.state(), LeafState::Spawned);
        leaf.update(100);
        assert_eq!(leaf.state(), LeafState::Falling);
        leaf.update(100);
        assert_eq!(leaf.state(), LeafState::Dead);
        assert!(!leaf.is_alive());

        // Dead leaves stay put.
        let y = leaf.position().y;
        leaf.update(100);
        assert_eq!(leaf.position().y, y);
        assert_eq!(leaf.state(), LeafState::Dead);
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let leaf = Leaf::new((), 0, Point::default(), 40, -3, -7, Rect::default());
        assert_eq!(leaf.size(), 0);
        assert_eq!(leaf.speed(), 0);
    }
}
