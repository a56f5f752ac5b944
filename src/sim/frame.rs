//! Read-only per-frame snapshot for the presentation layer
//!
//! Built after a tick completes, so it never shows a half-advanced state.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::sprite::{Field, Sprite};
use super::state::{GamePhase, GameState};
use crate::consts::{HYPER_COUNT, SCRAP_COUNT};
use crate::settings::Detail;

/// What a shape is, for colour choice by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Ship,
    Saucer,
    Missile,
    Photon,
    Rock,
    Debris,
}

/// How a shape should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawStyle {
    /// Closed outline
    Outline,
    /// Black fill under a closed outline (hides stars behind the shape)
    Filled,
    /// Open two-point segment
    Line,
}

/// One world-space shape to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawShape {
    pub kind: ShapeKind,
    pub style: DrawStyle,
    /// Grey level 0-255
    pub brightness: u8,
    /// Sprite position in screen pixels; every vertex is visible from here
    pub centre: IVec2,
    /// Vertices in screen pixels, origin top-left
    pub points: Vec<IVec2>,
}

/// Everything needed to draw one frame and its HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub field: Field,
    /// Empty when the starfield is disabled
    pub stars: Vec<IVec2>,
    pub shapes: Vec<DrawShape>,
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub phase: GamePhase,
    pub detail: Detail,
}

/// Scale a remaining-ticks counter linearly onto 0-255
fn fade(remaining: u32, full: u32) -> u8 {
    (255 * remaining.min(full) / full.max(1)) as u8
}

fn screen_position(field: Field, sprite: &Sprite) -> IVec2 {
    IVec2::new(
        sprite.pos.x.round_ties_even() as i32 + field.width / 2,
        sprite.pos.y.round_ties_even() as i32 + field.height / 2,
    )
}

impl Frame {
    /// Capture the current state for drawing
    pub fn capture(state: &GameState) -> Self {
        let detail = state.detail;
        let solid = if detail.fills_enabled() {
            DrawStyle::Filled
        } else {
            DrawStyle::Outline
        };

        let field = state.field;
        let mut shapes = Vec::new();
        let mut push = |kind: ShapeKind, style: DrawStyle, brightness: u8, sprite: &Sprite| {
            shapes.push(DrawShape {
                kind,
                style,
                brightness,
                centre: screen_position(field, sprite),
                points: sprite.world().points().to_vec(),
            });
        };

        for photon in state.photons.slots.iter().filter(|p| p.sprite.active) {
            push(ShapeKind::Photon, DrawStyle::Outline, 255, &photon.sprite);
        }

        // Missile fades out over its last ten or so ticks
        if state.missile.sprite.active {
            let brightness = (state.missile.ttl * 24).min(255) as u8;
            push(ShapeKind::Missile, DrawStyle::Outline, brightness, &state.missile.sprite);
        }

        for rock in state.rocks.iter().filter(|r| r.sprite.active) {
            push(ShapeKind::Rock, solid, 255, &rock.sprite);
        }

        if state.saucer.sprite.active {
            push(ShapeKind::Saucer, solid, 255, &state.saucer.sprite);
        }

        // Ship brightens from dim to white as invulnerability wears off
        let ship = &state.ship;
        if ship.sprite.active {
            let style = if detail.fills_enabled() && ship.invulnerable_ticks == 0 {
                DrawStyle::Filled
            } else {
                DrawStyle::Outline
            };
            let brightness = 255 - fade(ship.invulnerable_ticks, HYPER_COUNT);
            push(ShapeKind::Ship, style, brightness, &ship.sprite);
        }

        for debris in state.debris.slots.iter().filter(|d| d.sprite.active) {
            push(ShapeKind::Debris, DrawStyle::Line, fade(debris.ttl, SCRAP_COUNT), &debris.sprite);
        }

        Self {
            field,
            stars: if detail.starfield_enabled() {
                state.stars.clone()
            } else {
                Vec::new()
            },
            shapes,
            score: state.score,
            high_score: state.high_score,
            lives: state.lives,
            phase: state.phase,
            detail,
        }
    }

    pub fn count(&self, kind: ShapeKind) -> usize {
        self.shapes.iter().filter(|s| s.kind == kind).count()
    }
}
