//! Game state and core simulation types
//!
//! All mutable simulation state lives in one `GameState` value that every
//! operation receives explicitly; independent games can run side by side.

use glam::{DVec2, IVec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use super::shapes;
use super::sprite::{Field, Sprite};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::settings::{Detail, Settings};
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Attract / game-over screen; the rock field keeps drifting
    NotPlaying,
    /// Round in progress
    Playing,
    /// Round frozen, only toggles are observed
    Paused,
}

/// A sprite with a countdown (lifetime of photons, missile and debris)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timed {
    pub sprite: Sprite,
    pub ttl: u32,
}

impl Timed {
    fn new(shape: Polygon) -> Self {
        Self {
            sprite: Sprite::new(shape),
            ttl: 0,
        }
    }

    /// Count down one tick; deactivates when the countdown runs out
    pub fn count_down(&mut self) {
        self.ttl = self.ttl.saturating_sub(1);
        if self.ttl == 0 {
            self.sprite.active = false;
        }
    }

    pub fn stop(&mut self) {
        self.sprite.active = false;
        self.ttl = 0;
    }
}

/// Fixed-size ring of slots where a new claim always takes the next slot,
/// overwriting whatever was there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring<T> {
    pub slots: Vec<T>,
    cursor: usize,
}

impl<T> Ring<T> {
    pub fn new(slots: Vec<T>) -> Self {
        Self { slots, cursor: 0 }
    }

    /// Take the next slot in ring order, active or not
    pub fn claim(&mut self) -> &mut T {
        self.cursor = (self.cursor + 1) % self.slots.len();
        &mut self.slots[self.cursor]
    }

    /// Slot index the next claim will land on
    pub fn next_index(&self) -> usize {
        (self.cursor + 1) % self.slots.len()
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl Ring<Timed> {
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.sprite.active).count()
    }

    pub fn stop_all(&mut self) {
        for slot in &mut self.slots {
            slot.stop();
        }
        self.rewind();
    }
}

/// An asteroid slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rock {
    pub sprite: Sprite,
    /// Fragments award more points and never break up further
    pub fragment: bool,
}

/// The player's ship
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ship {
    pub sprite: Sprite,
    /// Ticks left in the explosion before respawn
    pub explosion_ticks: u32,
    /// Ticks left in the invulnerability window (respawn or hyperspace)
    pub invulnerable_ticks: u32,
}

impl Ship {
    pub fn is_vulnerable(&self) -> bool {
        self.sprite.active && self.invulnerable_ticks == 0
    }
}

/// The flying saucer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Saucer {
    pub sprite: Sprite,
    /// Ticks left in the current pass across the field
    pub pass_ticks: u32,
    pub passes_left: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub field: Field,
    pub detail: Detail,
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    /// Ships left, including the one in play
    pub lives: u32,
    /// Score beyond which the next extra ship is awarded
    pub next_ship_score: u64,
    /// Score beyond which the saucer next appears
    pub next_saucer_score: u64,
    /// Rock waves generated this round
    pub wave: u32,
    /// Simulation tick counter (unpaused ticks only)
    pub time_ticks: u64,
    pub ship: Ship,
    pub saucer: Saucer,
    pub missile: Timed,
    pub photons: Ring<Timed>,
    pub rocks: Vec<Rock>,
    /// Active rocks; a new wave is scheduled when this reaches zero
    pub rocks_left: u32,
    /// Ticks until the next wave once the field is clear
    pub storm_ticks: u32,
    /// Current rock speed envelope
    pub rock_speed: i32,
    pub debris: Ring<Timed>,
    /// Background star positions in screen pixels
    pub stars: Vec<IVec2>,
    pub high_scores: HighScores,
    /// Field size to rebuild for at the next tick boundary
    pending_resize: Option<Field>,
}

impl GameState {
    /// Create a new session on an empty field, in attract mode
    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        let tuning = Tuning::for_field(width, height);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            field: Field::new(tuning.width, tuning.height),
            detail: Detail::High,
            phase: GamePhase::NotPlaying,
            score: 0,
            high_score: 0,
            lives: 0,
            next_ship_score: NEW_SHIP_POINTS,
            next_saucer_score: NEW_UFO_POINTS,
            wave: 0,
            time_ticks: 0,
            ship: Ship::default(),
            saucer: Saucer::default(),
            missile: Timed::default(),
            photons: Ring::new(Vec::new()),
            rocks: Vec::new(),
            rocks_left: 0,
            storm_ticks: 0,
            rock_speed: tuning.min_rock_speed,
            debris: Ring::new(Vec::new()),
            stars: Vec::new(),
            high_scores: HighScores::new(),
            pending_resize: None,
        };

        state.build_field(state.field);
        state
    }

    /// Create a session from user settings; unseeded settings get a random seed
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut state = Self::new(settings.field_width, settings.field_height, seed);
        state.detail = settings.detail;
        state
    }

    /// Ask for the field to be rebuilt at a new size. Applied at the start of
    /// the next tick, never mid-tick.
    pub fn request_resize(&mut self, width: i32, height: i32) {
        self.pending_resize = Some(Field::new(width, height));
    }

    pub fn resize_pending(&self) -> bool {
        self.pending_resize.is_some()
    }

    /// Apply a pending resize, if any
    pub(crate) fn apply_pending_resize(&mut self) {
        if let Some(field) = self.pending_resize.take() {
            log::info!("Reinitializing for {}x{} field", field.width, field.height);
            self.build_field(field);
        }
    }

    /// Rebuild everything that depends on field size, then drop back to the
    /// attract screen with a fresh rock field. High scores survive.
    fn build_field(&mut self, field: Field) {
        self.tuning = Tuning::for_field(field.width, field.height);
        self.field = Field::new(self.tuning.width, self.tuning.height);
        let large = self.tuning.large_shapes;

        let star_count = self.tuning.star_count();
        let (w, h) = (self.field.width, self.field.height);
        self.stars = (0..star_count)
            .map(|_| IVec2::new(self.rng.random_range(0..w), self.rng.random_range(0..h)))
            .collect();

        self.ship = Ship {
            sprite: Sprite::new(shapes::ship(large)),
            ..Default::default()
        };
        self.saucer = Saucer {
            sprite: Sprite::new(shapes::saucer(large)),
            ..Default::default()
        };
        self.missile = Timed::new(shapes::missile(large));
        self.photons = Ring::new(
            (0..MAX_SHOTS)
                .map(|_| Timed::new(shapes::photon(large)))
                .collect(),
        );
        self.rocks = vec![Rock::default(); MAX_ROCKS];
        self.debris = Ring::new(vec![Timed::default(); MAX_SCRAP]);

        self.start_round();
        self.end_round();
    }

    /// Reset score, lives and every pool for a new round
    pub fn start_round(&mut self) {
        self.score = 0;
        self.lives = MAX_SHIPS;
        self.wave = 0;
        self.rock_speed = self.tuning.min_rock_speed;
        self.next_ship_score = NEW_SHIP_POINTS;
        self.next_saucer_score = NEW_UFO_POINTS;
        self.init_ship();
        self.photons.stop_all();
        self.stop_saucer();
        self.missile.stop();
        super::tick::generate_wave(self);
        for debris in &mut self.debris.slots {
            debris.stop();
            debris.sprite.shape = Polygon::new();
        }
        self.debris.rewind();
        self.phase = GamePhase::Playing;
    }

    /// End the round: ship, saucer and missile leave the field
    pub fn end_round(&mut self) {
        self.phase = GamePhase::NotPlaying;
        self.ship.sprite.active = false;
        self.ship.explosion_ticks = 0;
        self.stop_saucer();
        self.missile.stop();
    }

    /// Park a fresh ship at the centre of the field
    pub fn init_ship(&mut self) {
        self.ship.sprite.active = true;
        self.ship.sprite.reset_motion();
        self.ship.sprite.render(self.field);
        self.ship.invulnerable_ticks = 0;
    }

    /// Remove the ship after a hit, start its explosion countdown and take a life
    pub fn stop_ship(&mut self) {
        self.ship.sprite.active = false;
        self.ship.explosion_ticks = SCRAP_COUNT;
        self.lives = self.lives.saturating_sub(1);
    }

    /// Bring the saucer in from a random side with a random slant
    pub fn start_saucer_pass(&mut self) {
        let (min, max) = (self.tuning.min_rock_speed as f64, self.tuning.max_rock_speed as f64);
        let half = self.field.half();
        let rng = &mut self.rng;

        let mut vx = min + rng.random::<f64>() * (max - min);
        let mut x = -half.x;
        if rng.random_bool(0.5) {
            vx = -vx;
            x = half.x;
        }
        let y = rng.random::<f64>() * self.field.height as f64 - half.y;
        let mut vy = min + rng.random::<f64>() * (max - min);
        if rng.random_bool(0.5) {
            vy = -vy;
        }

        let sprite = &mut self.saucer.sprite;
        sprite.active = true;
        sprite.pos = self.field.wrap(DVec2::new(x, y));
        sprite.vel = DVec2::new(vx, vy);
        sprite.render(self.field);

        self.saucer.pass_ticks = (self.field.width as f64 / vx.abs()).floor() as u32;
    }

    pub fn stop_saucer(&mut self) {
        self.saucer.sprite.active = false;
        self.saucer.pass_ticks = 0;
        self.saucer.passes_left = 0;
    }

    /// Launch a guided missile from the saucer's position
    pub fn launch_missile(&mut self) {
        let sprite = &mut self.missile.sprite;
        sprite.active = true;
        sprite.reset_motion();
        sprite.pos = self.saucer.sprite.pos;
        sprite.render(self.field);
        self.missile.ttl = self.tuning.missile_ticks();
    }

    /// Add points, but only while a round is being played
    pub fn award(&mut self, points: u64) {
        if self.phase == GamePhase::Playing {
            self.score += points;
        }
    }

    /// Number of active rock slots (recounted, for checks against `rocks_left`)
    pub fn active_rocks(&self) -> usize {
        self.rocks.iter().filter(|r| r.sprite.active).count()
    }
}
