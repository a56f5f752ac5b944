//! Base outlines for every sprite kind
//!
//! Two shape sets exist: a large one for normal windows and a compact one for
//! tiny fields where the large outlines would swamp the screen.

use rand::Rng;
use rand_pcg::Pcg32;

use super::polygon::Polygon;
use crate::consts::{MAX_ROCK_SIDES, MIN_ROCK_SIDES};

pub fn ship(large: bool) -> Polygon {
    if large {
        [(0, -10), (7, 10), (-7, 10)].into_iter().collect()
    } else {
        [(0, -4), (2, 4), (-2, 4)].into_iter().collect()
    }
}

pub fn photon(large: bool) -> Polygon {
    if large {
        [(1, 1), (1, -1), (-1, -1), (-1, 1)].into_iter().collect()
    } else {
        [(0, 0), (1, 0), (1, 1), (0, 1)].into_iter().collect()
    }
}

/// Flying saucer: domed top, flat base
pub fn saucer(large: bool) -> Polygon {
    if large {
        [
            (-15, 0),
            (-10, -5),
            (-5, -5),
            (-5, -9),
            (5, -9),
            (5, -5),
            (10, -5),
            (15, 0),
            (10, 5),
            (-10, 5),
        ]
        .into_iter()
        .collect()
    } else {
        [
            (-7, 0),
            (-5, -2),
            (-2, -2),
            (-2, -4),
            (2, -4),
            (2, -2),
            (5, -2),
            (7, 0),
            (5, 2),
            (-5, 2),
        ]
        .into_iter()
        .collect()
    }
}

/// Guided missile, nose up
pub fn missile(large: bool) -> Polygon {
    if large {
        [(0, -4), (1, -3), (1, 3), (2, 4), (-2, 4), (-1, 3), (-1, -3)]
            .into_iter()
            .collect()
    } else {
        [(0, -2), (1, -1), (1, 1), (2, 2), (-2, 2), (-1, 1), (-1, -1)]
            .into_iter()
            .collect()
    }
}

/// Jagged rock: evenly spaced spokes with a random length each.
///
/// Spoke lengths are drawn from `min_radius..max_radius` and then scaled, so
/// fragments (scale 0.5) come out at half the size of first-generation rocks.
pub fn rock(rng: &mut Pcg32, min_radius: i32, max_radius: i32, scale: f64) -> Polygon {
    let sides = rng.random_range(MIN_ROCK_SIDES..MAX_ROCK_SIDES);
    let mut shape = Polygon::with_capacity(sides);

    for j in 0..sides {
        let theta = std::f64::consts::TAU / sides as f64 * j as f64;
        let r = rng.random_range(min_radius..max_radius.max(min_radius + 1)) as f64 * scale;
        let (sin, cos) = theta.sin_cos();
        shape.add_point(-(r * sin).round_ties_even() as i32, (r * cos).round_ties_even() as i32);
    }

    shape
}
