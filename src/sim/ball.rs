//! The ball: a moving body with serve and rebound physics

use glam::Vec2;

use super::body::MovingBody;
use super::velocity::{BounceDirection, Velocity, VelocityGenerator};

#[derive(Debug, Clone)]
pub struct Ball {
    pub body: MovingBody,
    generator: VelocityGenerator,
}

impl Ball {
    pub fn new(size: f32, bounds: Vec2, generator: VelocityGenerator) -> Self {
        Self {
            body: MovingBody::new(Vec2::splat(size), bounds),
            generator,
        }
    }

    /// Recenter and pick a fresh serve velocity
    pub fn serve(&mut self) {
        self.body.recenter();
        self.body.clear_previous_position();
        self.body.vel = self.generator.initial_velocity();
    }

    /// Left/right wall rebound
    pub fn reverse_horizontal(&mut self) {
        self.body.vel = self.body.vel.reversed_horizontal();
    }

    /// Paddle rebound with a re-randomized angle
    pub fn bounce_from(&mut self, direction: BounceDirection) {
        self.body.vel = self
            .generator
            .velocity_after_bounce(self.body.vel, direction);
    }

    pub fn set_velocity(&mut self, vel: Velocity) {
        self.body.vel = vel;
    }

    pub fn velocity(&self) -> Velocity {
        self.body.vel
    }

    pub fn speed_range(&self) -> (f32, f32) {
        self.generator.speed_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn ball() -> Ball {
        let generator = VelocityGenerator::new(&Settings::default(), 11);
        Ball::new(20.0, Vec2::new(300.0, 600.0), generator)
    }

    #[test]
    fn test_serve_recenters_and_moves_down() {
        let mut ball = ball();
        ball.body.pos = Vec2::new(3.0, 4.0);
        ball.serve();
        assert_eq!(ball.body.pos, Vec2::new(140.0, 290.0));
        assert!(ball.velocity().dy > 0.0);
    }

    #[test]
    fn test_bounce_directions() {
        let mut ball = ball();
        ball.set_velocity(Velocity::new(50.0, 300.0));
        ball.bounce_from(BounceDirection::Up);
        assert!(ball.velocity().dy < 0.0);
        ball.bounce_from(BounceDirection::Down);
        assert!(ball.velocity().dy > 0.0);
        let (lo, hi) = ball.speed_range();
        let speed = ball.velocity().speed();
        assert!(speed >= lo - 0.01 && speed <= hi + 0.01);
    }

    #[test]
    fn test_reverse_horizontal() {
        let mut ball = ball();
        ball.set_velocity(Velocity::new(120.0, -80.0));
        ball.reverse_horizontal();
        assert_eq!(ball.velocity(), Velocity::new(-120.0, -80.0));
    }
}
