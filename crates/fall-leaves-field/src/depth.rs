//! Unique depth bookkeeping.

use rand::Rng;

/// Hands out depth values in `min..=max` so that no two holders share one.
#[derive(Debug, Clone)]
pub struct DepthAllocator {
    min: i32,
    max: i32,
    /// `used[d - min]` is set while depth `d` is held by a live leaf.
    used: Vec<bool>,
}

impl DepthAllocator {
    /// Create an allocator for the inclusive range `min..=max`.
    pub fn new(min: i32, max: i32) -> Self {
        assert!(min <= max, "depth range {min}..={max} is empty");
        let span = (max as i64 - min as i64 + 1) as usize;
        Self {
            min,
            max,
            used: vec![false; span],
        }
    }

    /// Number of distinct depth values.
    pub fn span(&self) -> usize {
        self.used.len()
    }

    /// Number of depth values currently handed out.
    pub fn in_use(&self) -> usize {
        self.used.iter().filter(|used| **used).count()
    }

    pub fn is_used(&self, depth: i32) -> bool {
        self.slot(depth).is_some_and(|slot| self.used[slot])
    }

    /// Draw a random candidate and claim it, probing past taken values.
    ///
    /// Returns `None` only when every depth is taken.
    pub fn allocate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<i32> {
        let candidate = rng.random_range(self.min..=self.max);
        self.claim_from(candidate)
    }

    /// Claim `candidate`, or the first free depth above it, wrapping from
    /// `max` back to `min`.
    pub fn claim_from(&mut self, candidate: i32) -> Option<i32> {
        let start = self.slot(candidate.clamp(self.min, self.max))?;
        let span = self.span();
        (0..span)
            .map(|offset| (start + offset) % span)
            .find(|&slot| !self.used[slot])
            .map(|slot| {
                self.used[slot] = true;
                self.min + slot as i32
            })
    }

    /// Return `depth` to the free pool.
    pub fn release(&mut self, depth: i32) {
        if let Some(slot) = self.slot(depth) {
            debug_assert!(self.used[slot], "released depth {depth} was not in use");
            self.used[slot] = false;
        }
    }

    fn slot(&self, depth: i32) -> Option<usize> {
        (self.min..=self.max)
            .contains(&depth)
            .then(|| (depth - self.min) as usize)
    }
}
