//! Keyboard latching
//!
//! Key events arrive whenever the platform delivers them; the simulation
//! samples input once per tick. Held keys stay set until released, presses
//! are kept until the next tick consumes them.

use crate::sim::TickInput;

/// Game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Thrust,
    Reverse,
    Fire,
    Hyperspace,
    Pause,
    Detail,
    Start,
}

impl Key {
    /// Map a DOM-style key name to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Thrust),
            "ArrowDown" => Some(Key::Reverse),
            " " => Some(Key::Fire),
            "h" | "H" => Some(Key::Hyperspace),
            "p" | "P" => Some(Key::Pause),
            "d" | "D" => Some(Key::Detail),
            "s" | "S" => Some(Key::Start),
            _ => None,
        }
    }
}

/// Collects key events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    input: TickInput,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        let input = &mut self.input;
        match key {
            Key::Left => input.turn_left = true,
            Key::Right => input.turn_right = true,
            Key::Thrust => input.thrust = true,
            Key::Reverse => input.reverse = true,
            Key::Fire => input.fire = true,
            Key::Hyperspace => input.hyperspace = true,
            Key::Pause => input.pause = true,
            Key::Detail => input.detail = true,
            Key::Start => input.start = true,
        }
    }

    /// Release a held key. Presses are one-shot and ignore releases, so a tap
    /// shorter than a tick is never lost.
    pub fn key_up(&mut self, key: Key) {
        let input = &mut self.input;
        match key {
            Key::Left => input.turn_left = false,
            Key::Right => input.turn_right = false,
            Key::Thrust => input.thrust = false,
            Key::Reverse => input.reverse = false,
            _ => {}
        }
    }

    /// Input for the next tick; one-shot presses are cleared
    pub fn take(&mut self) -> TickInput {
        let input = self.input.clone();
        self.input.fire = false;
        self.input.hyperspace = false;
        self.input.pause = false;
        self.input.detail = false;
        self.input.start = false;
        input
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.input = TickInput::default();
    }
}
