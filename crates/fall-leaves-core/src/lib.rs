//! Core types shared by the Fall Leaves crates.

mod geometry;
mod settings;
mod sprite;

pub use geometry::{Point, Rect, Size};
pub use settings::{FieldSettings, SettingsError};
pub use sprite::SpriteSource;
