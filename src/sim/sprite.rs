//! Sprites: a base polygon plus rotation, position and velocity
//!
//! Positions live in a toroidal field centred on the origin,
//! `[-width/2, width/2) x [-height/2, height/2)`, with y growing down the
//! screen. The world-space polygon is in screen pixels, origin top-left.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use crate::wrap_angle;

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Field {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn half(&self) -> DVec2 {
        DVec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Wrap a position back into the field on each axis independently
    pub fn wrap(&self, pos: DVec2) -> DVec2 {
        DVec2::new(
            wrap_axis(pos.x, self.width as f64),
            wrap_axis(pos.y, self.height as f64),
        )
    }

    /// Map unit-interval samples onto the field
    pub fn point_at(&self, u: f64, v: f64) -> DVec2 {
        self.wrap(DVec2::new(u * self.width as f64, v * self.height as f64) - self.half())
    }
}

fn wrap_axis(v: f64, size: f64) -> f64 {
    let half = size / 2.0;
    let shifted = (v + half).rem_euclid(size);
    // rem_euclid rounds up to `size` for tiny negative inputs
    if shifted >= size { -half } else { shifted - half }
}

/// A moving, rotating polygon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprite {
    /// Base shape, centred on the local origin
    pub shape: Polygon,
    pub active: bool,
    /// Rotation in radians, kept in [0, 2π)
    pub angle: f64,
    /// Rotation added each tick
    pub delta_angle: f64,
    pub pos: DVec2,
    /// Displacement added each tick
    pub vel: DVec2,
    /// Rotated and translated shape, valid after `render`
    world: Polygon,
}

impl Sprite {
    pub fn new(shape: Polygon) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// World-space outline from the last `render`
    #[inline]
    pub fn world(&self) -> &Polygon {
        &self.world
    }

    /// Stop and park the sprite at the field centre, facing up
    pub fn reset_motion(&mut self) {
        self.angle = 0.0;
        self.delta_angle = 0.0;
        self.pos = DVec2::ZERO;
        self.vel = DVec2::ZERO;
    }

    /// Integrate one tick of rotation and motion, wrapping at the field edges
    pub fn advance(&mut self, field: Field) {
        self.angle = wrap_angle(self.angle + self.delta_angle);
        self.pos = field.wrap(self.pos + self.vel);
    }

    /// Recompute the world-space polygon from shape, angle and position
    pub fn render(&mut self, field: Field) {
        let (sin, cos) = self.angle.sin_cos();
        let offset = IVec2::new(
            self.pos.x.round_ties_even() as i32 + field.width / 2,
            self.pos.y.round_ties_even() as i32 + field.height / 2,
        );
        self.world.refill(self.shape.points().iter().map(|p| {
            let (x, y) = (p.x as f64, p.y as f64);
            IVec2::new(
                (x * cos + y * sin).round_ties_even() as i32,
                (y * cos - x * sin).round_ties_even() as i32,
            ) + offset
        }));
    }

    /// Do the two world-space outlines overlap?
    #[inline]
    pub fn is_colliding(&self, other: &Sprite) -> bool {
        self.world.overlaps(&other.world)
    }
}
