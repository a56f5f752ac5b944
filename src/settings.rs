//! Game settings and preferences
//!
//! Stored as JSON next to the binary (or wherever the caller points us).
//! Loading never fails: a missing or unreadable file falls back to defaults.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MILLIS;

/// Graphics detail level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Detail {
    Low,
    #[default]
    High,
}

impl Detail {
    pub fn as_str(&self) -> &'static str {
        match self {
            Detail::Low => "Low",
            Detail::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Detail::Low),
            "high" => Some(Detail::High),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Detail::Low => Detail::High,
            Detail::High => Detail::Low,
        }
    }

    /// Edge stride used when breaking a shape into debris
    pub fn debris_stride(&self, vertices: usize) -> usize {
        match self {
            Detail::Low if vertices >= 6 => 2,
            _ => 1,
        }
    }

    /// Whether to fill shapes in black before outlining them
    pub fn fills_enabled(&self) -> bool {
        matches!(self, Detail::High)
    }

    /// Whether to draw the background starfield
    pub fn starfield_enabled(&self) -> bool {
        matches!(self, Detail::High)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial graphics detail (toggled in game)
    pub detail: Detail,
    /// Playfield width in pixels
    pub field_width: i32,
    /// Playfield height in pixels
    pub field_height: i32,
    /// Milliseconds per simulation tick
    pub tick_millis: u64,
    /// Fixed RNG seed; random per session when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detail: Detail::High,
            field_width: 640,
            field_height: 480,
            tick_millis: TICK_MILLIS,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
            }
            Err(e) => log::warn!("Could not read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values the simulation cannot work with
    fn sanitized(mut self) -> Self {
        self.field_width = self.field_width.max(1);
        self.field_height = self.field_height.max(1);
        self.tick_millis = self.tick_millis.max(1);
        self
    }
}
