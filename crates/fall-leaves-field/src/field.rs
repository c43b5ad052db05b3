//! Leaf field state and per-tick update.

use std::fmt;

use fall_leaves_core::{FieldSettings, Point, Rect, Size, SpriteSource};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{DepthAllocator, Leaf};

/// A fixed-size population of falling leaves, kept in draw order.
pub struct LeafField<P: SpriteSource> {
    /// Leaves sorted by ascending depth, farthest first.
    leaves: Vec<Leaf<P::Sprite>>,
    depths: DepthAllocator,
    sprites: P,
    rng: StdRng,
    settings: FieldSettings,
    view: Size,
    max_size: i32,
    max_speed: i32,
    /// Set when a replacement may have broken the depth ordering.
    needs_sort: bool,
}

impl<P: SpriteSource> LeafField<P> {
    /// Fill a field for `view` with `settings.leaf_count` leaves.
    ///
    /// The initial leaves are scattered through the region above the view so
    /// the screen fills up gradually instead of with a single wave.
    ///
    /// # Panics
    ///
    /// Panics if `settings.leaf_count` exceeds the number of distinct depths,
    /// since unique depths could then never be handed out.
    pub fn new(view: Size, settings: FieldSettings, sprites: P, seed: u64) -> Self {
        assert!(
            settings.leaf_count <= settings.depth_span(),
            "leaf_count {} exceeds the {} distinct depths in {}..={}",
            settings.leaf_count,
            settings.depth_span(),
            settings.min_depth,
            settings.max_depth,
        );

        let max_size = settings.max_size(view);
        let max_speed = settings.max_speed(view);
        let mut field = Self {
            leaves: Vec::with_capacity(settings.leaf_count),
            depths: DepthAllocator::new(settings.min_depth, settings.max_depth),
            sprites,
            rng: StdRng::seed_from_u64(seed),
            settings,
            view,
            max_size,
            max_speed,
            needs_sort: false,
        };

        for _ in 0..field.settings.leaf_count {
            let leaf = field.spawn(true);
            field.leaves.push(leaf);
        }
        field.sort();

        info!(
            count = field.leaves.len(),
            width = view.width,
            height = view.height,
            max_size,
            max_speed,
            seed,
            "leaf field created"
        );
        field
    }

    /// Run one full tick: move, replace the dead, restore draw order.
    ///
    /// Returns how many leaves were replaced.
    pub fn tick(&mut self) -> usize {
        self.advance(self.settings.ticks_per_second);
        let replaced = self.replace_dead();
        self.resort_if_needed();
        replaced
    }

    /// Move every leaf by one tick and mark the ones that left their bounds.
    pub fn advance(&mut self, ticks_per_second: u32) {
        for leaf in &mut self.leaves {
            leaf.update(ticks_per_second);
        }
    }

    /// Swap every dead leaf for a fresh one spawned at the top edge, in the
    /// same slot. Returns how many leaves were replaced.
    pub fn replace_dead(&mut self) -> usize {
        let mut replaced = 0;
        for slot in (0..self.leaves.len()).rev() {
            if self.leaves[slot].is_alive() {
                continue;
            }
            self.depths.release(self.leaves[slot].depth());
            let fresh = self.spawn(false);
            // Dropping the old leaf releases its sprite.
            self.leaves[slot] = fresh;
            replaced += 1;
        }

        if replaced > 0 {
            self.needs_sort = true;
            debug!(replaced, "replaced fallen leaves");
        }
        replaced
    }

    /// Restore far-to-near order if a replacement happened since the last sort.
    /// Returns whether a sort was performed.
    pub fn resort_if_needed(&mut self) -> bool {
        if !self.needs_sort {
            return false;
        }
        self.sort();
        true
    }

    /// Live leaves in draw order, farthest first.
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf<P::Sprite>> {
        self.leaves.iter().filter(|leaf| leaf.is_alive())
    }

    /// Number of leaf slots. Constant for the life of the field.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn view(&self) -> Size {
        self.view
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn max_size(&self) -> i32 {
        self.max_size
    }

    pub fn max_speed(&self) -> i32 {
        self.max_speed
    }

    pub fn sprites(&self) -> &P {
        &self.sprites
    }

    fn sort(&mut self) {
        self.leaves.sort_by_key(|leaf| leaf.depth());
        self.needs_sort = false;
    }

    /// Create a leaf with a fresh depth and sprite.
    ///
    /// With `above` the leaf starts somewhere in the approach region above
    /// the view; otherwise it starts just above the top edge.
    fn spawn(&mut self, above: bool) -> Leaf<P::Sprite> {
        let depth = self
            .depths
            .allocate(&mut self.rng)
            .expect("depth pool holds at least leaf_count values");
        let size = self.settings.size_at(depth, self.max_size);
        let speed = self.settings.speed_at(depth, self.max_speed);

        let width = clamp_to_i32(self.view.width);
        let height = clamp_to_i32(self.view.height);
        let bounds = Rect::new(-(size / 2), -height, width - size / 2, height);

        let asset_index = match self.sprites.asset_count() {
            0 => 0,
            count => self.rng.random_range(0..count),
        };
        let x = self.rng.random_range(bounds.left..=bounds.right);
        let y = if above {
            -self.rng.random_range(size.min(height)..=height)
        } else {
            -size
        };

        let sprite = self.sprites.sprite(asset_index, size as u32);
        Leaf::new(
            sprite,
            asset_index,
            Point::new(x, y),
            depth,
            size,
            speed,
            bounds,
        )
    }
}

impl<P: SpriteSource> fmt::Debug for LeafField<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafField")
            .field("len", &self.leaves.len())
            .field("view", &self.view)
            .field("max_size", &self.max_size)
            .field("max_speed", &self.max_speed)
            .field("needs_sort", &self.needs_sort)
            .finish_non_exhaustive()
    }
}

fn clamp_to_i32(value: u32) -> i32 {
    value.min(i32::MAX as u32) as i32
}
