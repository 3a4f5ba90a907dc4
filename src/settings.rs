//! Game settings and tuning
//!
//! Persisted as JSON next to the score store. Missing fields fall back to
//! the defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::RankOrder;

/// What happens once the final attempt is lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameOverPolicy {
    /// Reset the session and keep playing immediately
    #[default]
    AutoRestart,
    /// Reset the session but stay paused until resumed
    HoldPaused,
}

impl GameOverPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverPolicy::AutoRestart => "AutoRestart",
            GameOverPolicy::HoldPaused => "HoldPaused",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "autorestart" | "auto" | "restart" => Some(GameOverPolicy::AutoRestart),
            "holdpaused" | "hold" | "paused" => Some(GameOverPolicy::HoldPaused),
            _ => None,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ball ===
    /// Ball edge length (pixels)
    pub ball_size: f32,
    /// Lower speed bound after serve/bounce (pixels/second)
    pub min_speed: f32,
    /// Upper speed bound after serve/bounce (pixels/second)
    pub max_speed: f32,
    /// Serve cone half-angle from straight down (degrees)
    pub serve_cone_deg: f32,
    /// Rebound cone half-angle from vertical (degrees)
    pub bounce_cone_deg: f32,
    /// Fixed velocity applied when re-serving after a miss
    pub reserve_velocity: (f32, f32),

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Top paddle row (fraction of canvas height)
    pub top_row: f32,
    /// Bottom paddle row (fraction of canvas height)
    pub bottom_row: f32,

    // === Session ===
    pub attempts: u32,
    /// Serve grace at session start (seconds)
    pub start_delay: f32,
    /// Serve grace after a miss (seconds)
    pub miss_delay: f32,
    pub game_over: GameOverPolicy,
    pub rank_order: RankOrder,

    // === Loop ===
    /// Frame deltas are capped at this many seconds
    pub max_frame_dt: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_size: BALL_SIZE,
            min_speed: BALL_MIN_SPEED,
            max_speed: BALL_MAX_SPEED,
            serve_cone_deg: SERVE_CONE_DEG,
            bounce_cone_deg: BOUNCE_CONE_DEG,
            reserve_velocity: RESERVE_VELOCITY,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            top_row: TOP_ROW,
            bottom_row: BOTTOM_ROW,

            attempts: START_ATTEMPTS,
            start_delay: START_DELAY,
            miss_delay: MISS_DELAY,
            game_over: GameOverPolicy::AutoRestart,
            rank_order: RankOrder::LongestFirst,

            max_frame_dt: MAX_FRAME_DT,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Speed range with the bounds put in order
    pub fn speed_range(&self) -> (f32, f32) {
        let lo = self.min_speed.min(self.max_speed).max(1.0);
        let hi = self.min_speed.max(self.max_speed).max(lo);
        (lo, hi)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
