//! The falling leaf particle field.
//!
//! A [`LeafField`] keeps a fixed number of leaves alive, moves them down the
//! view one tick at a time, replaces leaves that fall out of bounds and keeps
//! the whole set ordered far-to-near for drawing. Depths are unique across the
//! live leaves, which is what the [`DepthAllocator`] guarantees.

mod depth;
mod field;
mod leaf;

pub use depth::DepthAllocator;
pub use field::LeafField;
pub use leaf::{Leaf, LeafState};
