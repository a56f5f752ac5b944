//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod frame;
pub mod polygon;
pub mod shapes;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::{area2, intersects};
pub use frame::{DrawShape, DrawStyle, Frame, ShapeKind};
pub use polygon::Polygon;
pub use sprite::{Field, Sprite};
pub use state::{GamePhase, GameState, Ring, Rock, Saucer, Ship, Timed};
pub use tick::{TickInput, explode, generate_wave, tick};
