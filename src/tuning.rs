//! Data-driven game balance
//!
//! Every size-dependent value is derived from the smaller field dimension so
//! the game plays the same on a 128x128 panel and a full-size window.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_STARS, PIXELS_PER_STAR};

/// Minimum rock radius above which the large shape set is used
const LARGE_SHAPES_ABOVE: i32 = 14;

/// Balance values for one field size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Field width in pixels
    pub width: i32,
    /// Field height in pixels
    pub height: i32,
    /// Smallest first-generation rock radius
    pub min_rock_size: i32,
    /// Largest first-generation rock radius (exclusive)
    pub max_rock_size: i32,
    /// Starting asteroid speed envelope
    pub min_rock_speed: i32,
    /// Asteroid speed envelope cap
    pub max_rock_speed: i32,
    /// Use the large ship/saucer/missile/photon outlines
    pub large_shapes: bool,
}

impl Tuning {
    /// Derive tuning for a field. Dimensions are clamped to at least 1.
    pub fn for_field(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let min_rock_size = (width.min(height) / 20).max(1);
        let large_shapes = min_rock_size > LARGE_SHAPES_ABOVE;
        let (min_rock_speed, max_rock_speed) = if large_shapes { (2, 12) } else { (1, 4) };

        Self {
            width,
            height,
            min_rock_size,
            max_rock_size: min_rock_size * 2,
            min_rock_speed,
            max_rock_speed,
            large_shapes,
        }
    }

    /// Per-tick thrust added along the ship's facing
    pub fn thrust(&self) -> f64 {
        self.min_rock_size as f64 / 30.0
    }

    /// Component-wise ship speed limit
    pub fn speed_limit(&self) -> f64 {
        0.8 * self.min_rock_size as f64
    }

    pub fn photon_speed(&self) -> f64 {
        self.min_rock_size as f64
    }

    /// Photon lifetime: roughly one field crossing
    pub fn photon_ticks(&self) -> u32 {
        (self.width.min(self.height) / self.min_rock_size) as u32
    }

    pub fn missile_speed(&self) -> f64 {
        (self.min_rock_size / 3) as f64
    }

    pub fn missile_ticks(&self) -> u32 {
        (3 * self.width.max(self.height) as i64 / self.min_rock_size as i64) as u32
    }

    /// Saucer only fires when the ship is further than this (Chebyshev distance)
    pub fn missile_standoff(&self) -> f64 {
        4.0 * self.max_rock_size as f64
    }

    /// One star per `PIXELS_PER_STAR` square pixels, at most `MAX_STARS`
    pub fn star_count(&self) -> usize {
        let area = self.width as u64 * self.height as u64;
        ((area / PIXELS_PER_STAR as u64) as usize).min(MAX_STARS)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_field(640, 480)
    }
}
