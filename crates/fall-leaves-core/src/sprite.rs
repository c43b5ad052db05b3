//! The sprite asset provider boundary.

/// Hands out leaf sprites on request.
///
/// Every spawned leaf asks for its own sprite and owns it until the leaf is
/// replaced, at which point the sprite is dropped. Implementations never see
/// a sprite again once it has been handed out.
pub trait SpriteSource {
    /// The renderable bitmap type produced by this source.
    type Sprite;

    /// Number of distinct leaf assets. Asset indices run from zero to this value.
    fn asset_count(&self) -> usize;

    /// Produce a sprite for `asset_index` scaled to `size` pixels.
    fn sprite(&mut self, asset_index: usize, size: u32) -> Self::Sprite;
}
