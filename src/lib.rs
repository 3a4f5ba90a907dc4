//! Bounce Pong - a two-paddle ball bounce game
//!
//! Core modules:
//! - `sim`: Frame physics (bodies, collisions, scoring state machine)
//! - `game`: Wires the simulation to audio, UI, and high score storage
//! - `frame_loop`: Dedicated render/physics thread and its shared-state handle
//! - `renderer`: Drawing surface abstraction
//! - `persistence`: Key/value score storage
//! - `platform`: Monotonic frame timing

pub mod audio;
pub mod frame_loop;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use frame_loop::{FrameLoop, GameHandle};
pub use game::Game;
pub use highscores::{HighScores, RankOrder};
pub use settings::{GameOverPolicy, Settings};

/// Game configuration defaults
pub mod consts {
    /// Attempts granted at the start of a session
    pub const START_ATTEMPTS: u32 = 10;
    /// Serve grace after a session start (seconds)
    pub const START_DELAY: f32 = 2.0;
    /// Serve grace after a missed ball (seconds)
    pub const MISS_DELAY: f32 = 1.0;
    /// Largest frame delta fed to the physics (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 24.0;
    pub const BALL_MIN_SPEED: f32 = 260.0;
    pub const BALL_MAX_SPEED: f32 = 420.0;
    /// Half-angle of the serve cone, measured from straight down (degrees)
    pub const SERVE_CONE_DEG: f32 = 35.0;
    /// Half-angle of the rebound cone, measured from vertical (degrees)
    pub const BOUNCE_CONE_DEG: f32 = 60.0;
    /// Velocity given to the ball after a miss (pixels/second)
    pub const RESERVE_VELOCITY: (f32, f32) = (133.0, -93.0);

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 96.0;
    pub const PADDLE_HEIGHT: f32 = 18.0;
    /// Row of the top paddle as a fraction of canvas height
    pub const TOP_ROW: f32 = 0.05;
    /// Row of the bottom paddle as a fraction of canvas height
    pub const BOTTOM_ROW: f32 = 0.80;
}
