//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step. Order matters and is
//! fixed: keys, pending resize, ship, photons, saucer, missile, rocks, debris,
//! score bookkeeping, wave scheduling.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::shapes;
use super::sprite::{Field, Sprite};
use super::state::{GamePhase, GameState, Ring, Timed};
use crate::consts::*;
use crate::settings::Detail;
use crate::{facing, heading_toward, rotate, wrap_angle};
use std::f64::consts::{PI, TAU};

/// Input for a single tick.
///
/// The first four flags are held-key state; the rest are one-shot presses that
/// the caller clears after each tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub reverse: bool,
    /// Fire a photon
    pub fire: bool,
    /// Jump to a random spot
    pub hyperspace: bool,
    /// Pause toggle
    pub pause: bool,
    /// Graphics detail toggle
    pub detail: bool,
    /// Start a round from the attract screen
    pub start: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    handle_keys(state, input);
    state.apply_pending_resize();

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    update_ship(state, input);
    update_photons(state);
    update_saucer(state);
    update_missile(state);
    update_rocks(state);
    update_debris(state);
    update_score(state);

    // Field cleared: wait out the storm pause, then send the next wave
    if state.rocks_left == 0 {
        state.storm_ticks = state.storm_ticks.saturating_sub(1);
        if state.storm_ticks == 0 {
            generate_wave(state);
        }
    }
}

fn handle_keys(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::Playing {
        if input.fire && state.ship.sprite.active {
            fire_photon(state);
        }

        if input.hyperspace && state.ship.is_vulnerable() {
            let (u, v) = (state.rng.random::<f64>(), state.rng.random::<f64>());
            state.ship.sprite.pos = state.field.point_at(u, v);
            state.ship.sprite.render(state.field);
            state.ship.invulnerable_ticks = HYPER_COUNT;
            log::info!("Hyperspace to {:?}", state.ship.sprite.pos);
        }
    }

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::NotPlaying => GamePhase::NotPlaying,
        };
    }

    if input.detail {
        state.detail = state.detail.toggled();
        log::info!("Detail: {}", state.detail.as_str());
    }

    if input.start && state.phase == GamePhase::NotPlaying {
        state.start_round();
        log::info!("Round started (high score {})", state.high_score);
    }
}

fn fire_photon(state: &mut GameState) {
    let field = state.field;
    let pos = state.ship.sprite.pos;
    let vel = facing(state.ship.sprite.angle) * state.tuning.photon_speed();
    let ttl = state.tuning.photon_ticks();

    let photon = state.photons.claim();
    photon.sprite.active = true;
    photon.sprite.pos = pos;
    photon.sprite.vel = vel;
    photon.sprite.render(field);
    photon.ttl = ttl;
}

fn update_ship(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let ship = &mut state.ship;

    if ship.sprite.active {
        let sprite = &mut ship.sprite;
        if input.turn_left {
            sprite.angle = wrap_angle(sprite.angle + TURN_STEP);
        } else if input.turn_right {
            sprite.angle = wrap_angle(sprite.angle - TURN_STEP);
        }

        let thrust = facing(sprite.angle) * state.tuning.thrust();
        let limit = state.tuning.speed_limit();
        if input.thrust {
            apply_thrust(sprite, thrust.x, thrust.y, limit);
        }
        if input.reverse {
            apply_thrust(sprite, -thrust.x, -thrust.y, limit);
        }

        sprite.advance(state.field);
        sprite.render(state.field);
        ship.invulnerable_ticks = ship.invulnerable_ticks.saturating_sub(1);
        return;
    }

    // Exploding: respawn as though from hyperspace, or end the round
    ship.explosion_ticks = ship.explosion_ticks.saturating_sub(1);
    if ship.explosion_ticks == 0 {
        if state.lives > 0 {
            state.init_ship();
            state.ship.invulnerable_ticks = HYPER_COUNT;
        } else {
            finish_round(state);
        }
    }
}

/// Add thrust per axis, skipping any axis that would reach the speed limit
fn apply_thrust(sprite: &mut Sprite, dx: f64, dy: f64, limit: f64) {
    if (sprite.vel.x + dx).abs() < limit {
        sprite.vel.x += dx;
    }
    if (sprite.vel.y + dy).abs() < limit {
        sprite.vel.y += dy;
    }
}

fn finish_round(state: &mut GameState) {
    log::info!("Game over: score {} after {} waves", state.score, state.wave);
    state.high_scores.add_score(state.score, state.wave);
    state.end_round();
}

fn update_photons(state: &mut GameState) {
    for photon in state.photons.slots.iter_mut().filter(|p| p.sprite.active) {
        photon.sprite.advance(state.field);
        photon.sprite.render(state.field);
        photon.count_down();
    }
}

/// Index of the first active photon overlapping `target`
fn photon_hit(photons: &Ring<Timed>, target: &Sprite) -> Option<usize> {
    photons
        .slots
        .iter()
        .position(|p| p.sprite.active && target.is_colliding(&p.sprite))
}

fn update_saucer(state: &mut GameState) {
    if !state.saucer.sprite.active {
        return;
    }

    state.saucer.sprite.advance(state.field);
    state.saucer.sprite.render(state.field);

    state.saucer.pass_ticks = state.saucer.pass_ticks.saturating_sub(1);
    if state.saucer.pass_ticks == 0 {
        state.saucer.passes_left = state.saucer.passes_left.saturating_sub(1);
        if state.saucer.passes_left > 0 {
            state.start_saucer_pass();
        } else {
            state.stop_saucer();
        }
        return;
    }

    if let Some(j) = photon_hit(&state.photons, &state.saucer.sprite) {
        state.photons.slots[j].stop();
        explode(&mut state.debris, &mut state.rng, state.detail, state.field, &state.saucer.sprite);
        state.stop_saucer();
        state.award(UFO_POINTS);
        log::debug!("Saucer destroyed");
        return;
    }

    // Now and then, fire a missile at the ship if it isn't too close
    if missile_ready(state) && state.rng.random::<f64>() < MISSILE_FIRE_CHANCE {
        state.launch_missile();
    }
}

/// Can the saucer launch a missile this tick, chance aside?
///
/// Needs a vulnerable ship, no missile already in flight, and the ship
/// further than the stand-off distance on at least one axis.
fn missile_ready(state: &GameState) -> bool {
    let gap = (state.saucer.sprite.pos - state.ship.sprite.pos)
        .abs()
        .max_element();
    state.ship.is_vulnerable()
        && !state.missile.sprite.active
        && gap > state.tuning.missile_standoff()
}

fn update_missile(state: &mut GameState) {
    if !state.missile.sprite.active {
        return;
    }

    state.missile.count_down();
    if !state.missile.sprite.active {
        return;
    }

    // Home in on the ship; a hidden ship leaves the missile coasting
    if state.ship.is_vulnerable() {
        let angle = heading_toward(state.ship.sprite.pos - state.missile.sprite.pos);
        state.missile.sprite.angle = angle;
        state.missile.sprite.vel = facing(angle) * state.tuning.missile_speed();
    }
    state.missile.sprite.advance(state.field);
    state.missile.sprite.render(state.field);

    if let Some(j) = photon_hit(&state.photons, &state.missile.sprite) {
        state.photons.slots[j].stop();
        explode(
            &mut state.debris,
            &mut state.rng,
            state.detail,
            state.field,
            &state.missile.sprite,
        );
        state.missile.stop();
        state.award(MISSILE_POINTS);
        log::debug!("Missile destroyed");
        return;
    }

    if state.ship.is_vulnerable() && state.ship.sprite.is_colliding(&state.missile.sprite) {
        destroy_ship(state);
    }
}

fn update_rocks(state: &mut GameState) {
    for i in 0..state.rocks.len() {
        if !state.rocks[i].sprite.active {
            continue;
        }

        state.rocks[i].sprite.advance(state.field);
        state.rocks[i].sprite.render(state.field);

        // A photon hit kills the rock; first-generation rocks break up
        for j in 0..state.photons.slots.len() {
            let rock = &state.rocks[i];
            if !(rock.sprite.active
                && state.photons.slots[j].sprite.active
                && rock.sprite.is_colliding(&state.photons.slots[j].sprite))
            {
                continue;
            }

            state.rocks_left = state.rocks_left.saturating_sub(1);
            state.rocks[i].sprite.active = false;
            state.photons.slots[j].sprite.active = false;
            explode(
                &mut state.debris,
                &mut state.rng,
                state.detail,
                state.field,
                &state.rocks[i].sprite,
            );

            if state.rocks[i].fragment {
                state.award(SMALL_POINTS);
                log::debug!("Fragment {} destroyed", i);
            } else {
                state.award(BIG_POINTS);
                spawn_fragments(state, i);
                log::debug!("Rock {} destroyed", i);
            }
        }

        if state.ship.is_vulnerable()
            && state.rocks[i].sprite.active
            && state.rocks[i].sprite.is_colliding(&state.ship.sprite)
        {
            destroy_ship(state);
        }
    }
}

/// Replace a destroyed first-generation rock with one or two fragments,
/// taking the first free slots in pool order.
fn spawn_fragments(state: &mut GameState, parent: usize) {
    let origin = state.rocks[parent].sprite.pos;
    let speed = state.rock_speed as f64;
    let (min, max) = (state.tuning.min_rock_size, state.tuning.max_rock_size);
    let mut spawned = 0;

    for i in 0..state.rocks.len() {
        if spawned == 2 {
            break;
        }
        if state.rocks[i].sprite.active {
            continue;
        }

        let rng = &mut state.rng;
        let shape = shapes::rock(rng, min, max, 0.5);
        let delta_angle = (rng.random::<f64>() - 0.5) / 10.0;
        let vx = rng.random::<f64>() * 2.0 * speed - speed;
        let vy = rng.random::<f64>() * 2.0 * speed - speed;

        let rock = &mut state.rocks[i];
        rock.sprite.shape = shape;
        rock.sprite.active = true;
        rock.sprite.angle = 0.0;
        rock.sprite.delta_angle = delta_angle;
        rock.sprite.pos = origin;
        rock.sprite.vel.x = vx;
        rock.sprite.vel.y = vy;
        rock.sprite.render(state.field);
        rock.fragment = true;

        state.rocks_left += 1;
        spawned += 1;
    }
}

/// Blow up the ship: it and any saucer or missile leave the field
fn destroy_ship(state: &mut GameState) {
    explode(&mut state.debris, &mut state.rng, state.detail, state.field, &state.ship.sprite);
    state.stop_ship();
    state.stop_saucer();
    state.missile.stop();
    log::debug!("Ship destroyed, {} left", state.lives);
}

fn update_debris(state: &mut GameState) {
    for debris in state.debris.slots.iter_mut().filter(|d| d.sprite.active) {
        debris.sprite.advance(state.field);
        debris.sprite.render(state.field);
        debris.count_down();
    }
}

fn update_score(state: &mut GameState) {
    if state.score > state.high_score {
        state.high_score = state.score;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    if state.score > state.next_ship_score {
        state.next_ship_score += NEW_SHIP_POINTS;
        state.lives += 1;
        log::info!("Extra ship at {} points ({} left)", state.score, state.lives);
    }

    if state.score > state.next_saucer_score && !state.saucer.sprite.active {
        state.next_saucer_score += NEW_UFO_POINTS;
        state.saucer.passes_left = UFO_PASSES;
        state.start_saucer_pass();
        log::info!("Saucer incoming at {} points", state.score);
    }
}

/// Break a sprite into flying edge fragments.
///
/// Each edge (every other edge at low detail for shapes of six or more
/// vertices) becomes a two-point debris sprite at the sprite's position,
/// flying outward along its rotated first vertex with a random spin. Debris
/// slots are claimed in ring order, cutting short the oldest pieces when all
/// are busy.
pub fn explode(
    debris: &mut Ring<Timed>,
    rng: &mut Pcg32,
    detail: Detail,
    field: Field,
    sprite: &Sprite,
) {
    let points = sprite.shape.points();
    let n = points.len();
    if n < 2 {
        return;
    }

    for i in (0..n).step_by(detail.debris_stride(n)) {
        let a = points[i];
        let b = points[(i + 1) % n];

        let piece = debris.claim();
        piece.sprite.active = true;
        piece.sprite.shape = [(a.x, a.y), (b.x, b.y)].into_iter().collect();
        piece.sprite.angle = sprite.angle;
        piece.sprite.delta_angle = (rng.random::<f64>() * TAU - PI) / 15.0;
        piece.sprite.pos = sprite.pos;
        piece.sprite.vel = rotate(a.as_dvec2(), sprite.angle) / 5.0;
        piece.sprite.render(field);
        piece.ttl = SCRAP_COUNT;
    }
}

/// Fill every rock slot with a new first-generation rock on a random edge
pub fn generate_wave(state: &mut GameState) {
    let speed = state.rock_speed as f64;
    let (min, max) = (state.tuning.min_rock_size, state.tuning.max_rock_size);
    let field = state.field;
    let half = field.half();

    for i in 0..state.rocks.len() {
        let rng = &mut state.rng;
        let shape = shapes::rock(rng, min, max, 1.0);
        let delta_angle = (rng.random::<f64>() - 0.5) / 10.0;

        // Start on a random edge: left/right with random y, or top/bottom
        // with random x
        let along = rng.random::<f64>();
        let pos = if rng.random_bool(0.5) {
            let x = if rng.random_bool(0.5) { half.x } else { -half.x };
            DVec2::new(x, along * field.height as f64 - half.y)
        } else {
            let y = if rng.random_bool(0.5) { half.y } else { -half.y };
            DVec2::new(along * field.width as f64 - half.x, y)
        };

        let mut vx = rng.random::<f64>() * speed;
        if rng.random_bool(0.5) {
            vx = -vx;
        }
        let mut vy = rng.random::<f64>() * speed;
        if rng.random_bool(0.5) {
            vy = -vy;
        }

        let rock = &mut state.rocks[i];
        rock.sprite.shape = shape;
        rock.sprite.active = true;
        rock.sprite.angle = 0.0;
        rock.sprite.delta_angle = delta_angle;
        rock.sprite.pos = field.wrap(pos);
        rock.sprite.vel = DVec2::new(vx, vy);
        rock.sprite.render(field);
        rock.fragment = false;
    }

    state.storm_ticks = STORM_PAUSE;
    state.rocks_left = state.rocks.len() as u32;
    if state.rock_speed < state.tuning.max_rock_speed {
        state.rock_speed += 1;
    }
    state.wave += 1;
    log::info!("Wave {}: {} rocks, speed {}", state.wave, state.rocks_left, state.rock_speed);
}
