//! Game state and core simulation types

use std::time::Instant;

use glam::Vec2;

use super::ball::Ball;
use super::paddle::{Facing, Paddle, mirrored_x};
use super::velocity::{Velocity, VelocityGenerator};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Physics advances each tick
    Running,
    /// Frames still draw, physics is frozen
    Paused,
}

/// Something the tick wants the outside world to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball rebounded off a paddle
    PaddleHit(Facing),
    /// Ball rebounded off the left or right wall
    WallHit,
    /// Ball left through the top or bottom; it has been re-served
    Missed { attempts_left: u32 },
    /// Last attempt lost. Session state is left for the caller to reset.
    GameOver { elapsed_secs: u64 },
}

/// Complete session state for one canvas
#[derive(Debug, Clone)]
pub struct GameState {
    pub attempts_remaining: u32,
    /// Wall-clock start of the session, for the survival timer
    pub started_at: Instant,
    pub phase: GamePhase,
    /// Serve grace remaining (seconds); physics waits while positive
    pub serve_delay: f32,
    pub ball: Ball,
    pub top: Paddle,
    pub bottom: Paddle,
    canvas: Vec2,
    start_attempts: u32,
    start_delay: f32,
    miss_delay: f32,
    reserve_velocity: Velocity,
}

impl GameState {
    /// Create a paused session. Bodies are laid out once the canvas size
    /// arrives through [`GameState::resize`].
    pub fn new(settings: &Settings, seed: u64, now: Instant) -> Self {
        let canvas = Vec2::ZERO;
        let paddle_size = Vec2::new(settings.paddle_width, settings.paddle_height);
        Self {
            attempts_remaining: settings.attempts,
            started_at: now,
            phase: GamePhase::Paused,
            serve_delay: settings.start_delay,
            ball: Ball::new(
                settings.ball_size,
                canvas,
                VelocityGenerator::new(settings, seed),
            ),
            top: Paddle::new(Facing::Top, paddle_size, settings.top_row, canvas),
            bottom: Paddle::new(Facing::Bottom, paddle_size, settings.bottom_row, canvas),
            canvas,
            start_attempts: settings.attempts,
            start_delay: settings.start_delay,
            miss_delay: settings.miss_delay,
            reserve_velocity: settings.reserve_velocity.into(),
        }
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    /// True once a non-empty surface size is known
    pub fn has_canvas(&self) -> bool {
        self.canvas.x > 0.0 && self.canvas.y > 0.0
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Reset the session and start playing
    pub fn start(&mut self, now: Instant) {
        self.reset_session(now);
        self.phase = GamePhase::Running;
    }

    /// Fresh attempts, serve grace, paddles and ball. Phase is untouched.
    pub fn reset_session(&mut self, now: Instant) {
        self.top.reset();
        self.bottom.reset();
        self.ball.serve();
        self.attempts_remaining = self.start_attempts;
        self.started_at = now;
        self.serve_delay = self.start_delay;
    }

    pub fn pause(&mut self) {
        self.phase = GamePhase::Paused;
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// Whole seconds survived so far
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started_at).as_secs()
    }

    /// Count a miss and re-serve. Returns the attempts left.
    pub fn record_miss(&mut self) -> u32 {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        if self.attempts_remaining > 0 {
            self.ball.body.recenter();
            self.ball.body.clear_previous_position();
            self.ball.set_velocity(self.reserve_velocity);
            self.serve_delay = self.miss_delay;
        }
        self.attempts_remaining
    }

    /// Apply a new surface size to every body.
    ///
    /// The first size lays everything out fresh; later sizes keep each
    /// body's fractional position.
    pub fn resize(&mut self, width: f32, height: f32) {
        let fresh = !self.has_canvas();
        self.canvas = Vec2::new(width.max(0.0), height.max(0.0));
        self.ball.body.on_canvas_resize(self.canvas.x, self.canvas.y);
        self.top.body.on_canvas_resize(self.canvas.x, self.canvas.y);
        self.bottom.body.on_canvas_resize(self.canvas.x, self.canvas.y);
        if fresh {
            self.ball.body.recenter();
            self.top.reset();
            self.bottom.reset();
        }
    }

    /// Drag input: the bottom paddle follows `x`, the top paddle mirrors it
    pub fn set_paddle_position(&mut self, x: f32, _y: f32) {
        let width = self.canvas.x;
        self.bottom.set_horizontal_position(x);
        self.bottom.clamp_horizontal(width);
        self.top
            .set_horizontal_position(mirrored_x(x, width, self.top.width()));
        self.top.clamp_horizontal(width);
    }
}
