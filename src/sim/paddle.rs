//! Paddles: horizontally driven bodies pinned to the top and bottom rows

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::MovingBody;
use super::velocity::Velocity;

/// Which edge of the canvas a paddle guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: MovingBody,
    pub facing: Facing,
    /// Row as a fraction of canvas height
    row: f32,
}

impl Paddle {
    pub fn new(facing: Facing, size: Vec2, row: f32, bounds: Vec2) -> Self {
        Self {
            body: MovingBody::new(size, bounds),
            facing,
            row: row.clamp(0.0, 1.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.body.size.x
    }

    /// Center on the row with no velocity
    pub fn reset(&mut self) {
        self.body.center_horizontal();
        self.body.pos.y = self.body.bounds().y * self.row;
        self.body.vel = Velocity::ZERO;
        self.body.clamp_to_bounds();
    }

    /// Direct position assignment from input; velocity is untouched
    pub fn set_horizontal_position(&mut self, x: f32) {
        self.body.pos.x = x.max(0.0);
    }

    /// Keep the paddle within `[0, canvas_width - width]`
    pub fn clamp_horizontal(&mut self, canvas_width: f32) {
        let max_x = (canvas_width - self.width()).max(0.0);
        self.body.pos.x = self.body.pos.x.clamp(0.0, max_x);
    }
}

/// Horizontal reflection of an input x for the opposite paddle
pub fn mirrored_x(input_x: f32, canvas_width: f32, paddle_width: f32) -> f32 {
    canvas_width - input_x - paddle_width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle(facing: Facing, row: f32) -> Paddle {
        Paddle::new(facing, Vec2::new(20.0, 10.0), row, Vec2::new(300.0, 600.0))
    }

    #[test]
    fn test_mirrored_control() {
        let mut bottom = paddle(Facing::Bottom, 0.8);
        let mut top = paddle(Facing::Top, 0.05);
        bottom.set_horizontal_position(50.0);
        bottom.clamp_horizontal(300.0);
        top.set_horizontal_position(mirrored_x(50.0, 300.0, top.width()));
        top.clamp_horizontal(300.0);
        assert_eq!(bottom.body.pos.x, 50.0);
        assert_eq!(top.body.pos.x, 230.0);
    }

    #[test]
    fn test_clamps_both_edges() {
        let mut p = paddle(Facing::Bottom, 0.8);
        p.set_horizontal_position(-40.0);
        p.clamp_horizontal(300.0);
        assert_eq!(p.body.pos.x, 0.0);
        p.set_horizontal_position(500.0);
        p.clamp_horizontal(300.0);
        assert_eq!(p.body.pos.x, 280.0);
    }

    #[test]
    fn test_reset_places_on_row() {
        let mut p = paddle(Facing::Bottom, 0.8);
        p.body.vel = Velocity::new(10.0, 0.0);
        p.reset();
        assert_eq!(p.body.pos.x, 140.0);
        assert!((p.body.pos.y - 480.0).abs() < 1e-3);
        assert_eq!(p.body.vel, Velocity::ZERO);
    }
}
