//! Polyroids - A wrapped-field vector asteroids game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (polygons, sprites, entity pools, tick)
//! - `renderer`: Frame tessellation into line-list vertex buffers
//! - `platform`: Fixed-step clock, input latching and stop requests
//! - `settings`: User preferences loaded from JSON
//! - `tuning`: Size-dependent game balance derived from the field dimensions

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::{Detail, Settings};
pub use tuning::Tuning;

use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Game configuration constants
pub mod consts {
    /// Nominal milliseconds between simulation ticks
    pub const TICK_MILLIS: u64 = 50;
    /// Maximum catch-up ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Starting number of ships per game (including the one in play)
    pub const MAX_SHIPS: u32 = 3;

    /// Pool capacities
    pub const MAX_SHOTS: usize = 6;
    pub const MAX_ROCKS: usize = 8;
    pub const MAX_SCRAP: usize = 20;

    /// Counter starting values (ticks)
    pub const SCRAP_COUNT: u32 = 30;
    pub const HYPER_COUNT: u32 = 60;
    pub const STORM_PAUSE: u32 = 30;
    pub const UFO_PASSES: u32 = 3;

    /// Asteroid vertex count range (upper bound exclusive)
    pub const MIN_ROCK_SIDES: usize = 8;
    pub const MAX_ROCK_SIDES: usize = 12;

    /// Points for shooting different objects
    pub const BIG_POINTS: u64 = 25;
    pub const SMALL_POINTS: u64 = 50;
    pub const UFO_POINTS: u64 = 250;
    pub const MISSILE_POINTS: u64 = 500;

    /// Points needed to earn a new ship
    pub const NEW_SHIP_POINTS: u64 = 5000;
    /// Points between flying saucer appearances
    pub const NEW_UFO_POINTS: u64 = 2750;

    /// Ship rotation per tick while a turn key is held (radians)
    pub const TURN_STEP: f64 = std::f64::consts::PI / 16.0;
    /// Per-tick chance that the saucer launches a missile
    pub const MISSILE_FIRE_CHANCE: f64 = 0.03;

    /// Field area (square pixels) per background star
    pub const PIXELS_PER_STAR: u32 = 5000;
    /// Starfield size cap for very large fields
    pub const MAX_STARS: usize = 65_536;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit vector a sprite with rotation `angle` points along, in field
/// coordinates (x right, y down). Angle 0 points up the screen.
#[inline]
pub fn facing(angle: f64) -> DVec2 {
    DVec2::new(-angle.sin(), -angle.cos())
}

/// Rotate a local vector by a sprite rotation, the same way `Sprite::render`
/// turns a base shape into screen space
#[inline]
pub fn rotate(v: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(v.x * cos + v.y * sin, v.y * cos - v.x * sin)
}

/// Sprite rotation that makes `facing` point along `delta`.
///
/// Two-argument arctangent on the screen-flipped delta, shifted a quarter turn
/// because rotation 0 faces up. A zero delta yields rotation 0.
#[inline]
pub fn heading_toward(delta: DVec2) -> f64 {
    if delta == DVec2::ZERO {
        return 0.0;
    }
    wrap_angle((-delta.y).atan2(delta.x) - FRAC_PI_2)
}
