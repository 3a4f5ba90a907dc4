//! Axis-aligned moving body shared by the ball and the paddles
//!
//! Bounds and collision checks run against the position the body will have
//! after the frame delta, so walls and paddles react before anything visibly
//! passes through them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::velocity::Velocity;

/// Canvas axis for bounds checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A rectangle moving across the canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingBody {
    /// Top-left corner (pixels)
    pub pos: Vec2,
    /// Width and height (pixels)
    pub size: Vec2,
    pub vel: Velocity,
    /// Contact snapshot; set while a collision is being separated
    previous_position: Option<Vec2>,
    /// Canvas width and height (pixels)
    bounds: Vec2,
}

impl MovingBody {
    pub fn new(size: Vec2, bounds: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            vel: Velocity::ZERO,
            previous_position: None,
            bounds,
        }
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Largest top-left corner that keeps the body on the canvas
    pub fn max_position(&self) -> Vec2 {
        (self.bounds - self.size).max(Vec2::ZERO)
    }

    pub fn predicted_position(&self, dt: f32) -> Vec2 {
        self.pos + self.vel.as_vec2() * dt
    }

    /// Integrate velocity over `dt`. No clamping.
    pub fn advance(&mut self, dt: f32) {
        self.pos = self.predicted_position(dt);
    }

    /// Would the body leave the canvas on `axis` after `dt`?
    pub fn is_out_of_bounds(&self, axis: Axis, dt: f32) -> bool {
        let next = self.predicted_position(dt);
        let max = self.bounds - self.size;
        match axis {
            Axis::Horizontal => next.x < 0.0 || next.x > max.x,
            Axis::Vertical => next.y < 0.0 || next.y > max.y,
        }
    }

    /// Overlap test between both predicted rectangles
    pub fn collides_with(&self, other: &MovingBody, dt: f32) -> bool {
        let a_min = self.predicted_position(dt);
        let a_max = a_min + self.size;
        let b_min = other.predicted_position(dt);
        let b_max = b_min + other.size;
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Snapshot the position at the moment of contact
    pub fn set_previous_position(&mut self, dt: f32) {
        self.previous_position = Some(self.predicted_position(dt));
    }

    pub fn previous_position(&self) -> Option<Vec2> {
        self.previous_position
    }

    pub fn clear_previous_position(&mut self) {
        self.previous_position = None;
    }

    pub fn recenter(&mut self) {
        self.pos = self.max_position() / 2.0;
    }

    pub fn center_horizontal(&mut self) {
        self.pos.x = self.max_position().x / 2.0;
    }

    /// Keep the body inside the canvas
    pub fn clamp_to_bounds(&mut self) {
        self.pos = self.pos.clamp(Vec2::ZERO, self.max_position());
    }

    /// Adopt a new canvas size, keeping the fractional position
    pub fn on_canvas_resize(&mut self, width: f32, height: f32) {
        let new_bounds = Vec2::new(width, height);
        if self.bounds.x > 0.0 && self.bounds.y > 0.0 {
            self.pos *= new_bounds / self.bounds;
            if let Some(prev) = self.previous_position.as_mut() {
                *prev *= new_bounds / self.bounds;
            }
        }
        self.bounds = new_bounds;
        self.clamp_to_bounds();
    }
}
