//! Tunables for the leaf field.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::Size;

/// Reasons a [`FieldSettings`] value cannot drive a leaf field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("leaf_count must be at least 1")]
    NoLeaves,
    #[error("depth range {min}..={max} is invalid (min must be >= 1 and <= max)")]
    DepthRange { min: i32, max: i32 },
    #[error("leaf_count {count} exceeds the {span} distinct depths available")]
    DepthPoolTooSmall { count: usize, span: usize },
    #[error("{name} must be a finite, non-negative number (got {value})")]
    Ratio { name: &'static str, value: f64 },
    #[error("ticks_per_second must be at least 1")]
    ZeroTickRate,
}

/// Settings that shape the leaf field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Number of leaves kept alive at all times.
    pub leaf_count: usize,
    /// Farthest depth a leaf can have.
    pub min_depth: i32,
    /// Nearest depth a leaf can have.
    pub max_depth: i32,
    /// Largest leaf size as a fraction of the view height.
    pub size_ratio: f64,
    /// Fastest fall speed, in pixels per second, as a fraction of the view height.
    pub speed_ratio: f64,
    /// Simulation rate.
    pub ticks_per_second: u32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            leaf_count: 35,
            min_depth: 40,
            max_depth: 100,
            size_ratio: 0.2,
            speed_ratio: 0.5,
            ticks_per_second: 100,
        }
    }
}

impl FieldSettings {
    /// How many distinct depth values exist.
    pub fn depth_span(&self) -> usize {
        if self.max_depth < self.min_depth {
            return 0;
        }
        (self.max_depth as i64 - self.min_depth as i64 + 1) as usize
    }

    /// Time between two simulation ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.ticks_per_second.max(1)))
    }

    /// Size of the nearest possible leaf for a view.
    pub fn max_size(&self, view: Size) -> i32 {
        scale(view.height, self.size_ratio)
    }

    /// Fall speed of the nearest possible leaf for a view.
    pub fn max_speed(&self, view: Size) -> i32 {
        scale(view.height, self.speed_ratio)
    }

    /// Size of a leaf at `depth`, given the view's `max_size`.
    pub fn size_at(&self, depth: i32, max_size: i32) -> i32 {
        scale_by_depth(max_size, depth, self.max_depth)
    }

    /// Speed of a leaf at `depth`, given the view's `max_speed`.
    pub fn speed_at(&self, depth: i32, max_speed: i32) -> i32 {
        scale_by_depth(max_speed, depth, self.max_depth)
    }

    /// Check that these settings describe a field that can be built.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.leaf_count == 0 {
            return Err(SettingsError::NoLeaves);
        }
        if self.min_depth < 1 || self.min_depth > self.max_depth {
            return Err(SettingsError::DepthRange {
                min: self.min_depth,
                max: self.max_depth,
            });
        }
        if self.leaf_count > self.depth_span() {
            return Err(SettingsError::DepthPoolTooSmall {
                count: self.leaf_count,
                span: self.depth_span(),
            });
        }
        for (name, value) in [
            ("size_ratio", self.size_ratio),
            ("speed_ratio", self.speed_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Ratio { name, value });
            }
        }
        if self.ticks_per_second == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        Ok(())
    }
}

fn scale(length: u32, ratio: f64) -> i32 {
    (f64::from(length) * ratio).floor().clamp(0.0, i32::MAX as f64) as i32
}

fn scale_by_depth(max: i32, depth: i32, max_depth: i32) -> i32 {
    if max_depth <= 0 {
        return 0;
    }
    let depth = depth.clamp(0, max_depth);
    (i64::from(max.max(0)) * i64::from(depth) / i64::from(max_depth)) as i32
}
