//! Velocity values and the randomized rebound generator
//!
//! Screen coordinates: +x right, +y down. "Up" means a negative `dy`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Velocity in pixels/second. Replaced wholesale, never edited per component.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    pub fn speed(self) -> f32 {
        self.as_vec2().length()
    }

    /// Same speed, horizontal component negated
    pub fn reversed_horizontal(self) -> Self {
        Self::new(-self.dx, self.dy)
    }
}

impl From<(f32, f32)> for Velocity {
    fn from((dx, dy): (f32, f32)) -> Self {
        Self::new(dx, dy)
    }
}

/// Which way the ball leaves a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BounceDirection {
    /// Away from the bottom paddle (negative `dy`)
    Up,
    /// Away from the top paddle (positive `dy`)
    Down,
}

impl BounceDirection {
    fn sign(self) -> f32 {
        match self {
            BounceDirection::Up => -1.0,
            BounceDirection::Down => 1.0,
        }
    }
}

/// Produces serve and rebound velocities from a seeded RNG
#[derive(Debug, Clone)]
pub struct VelocityGenerator {
    min_speed: f32,
    max_speed: f32,
    /// Serve cone half-angle (radians)
    serve_cone: f32,
    /// Rebound cone half-angle (radians)
    bounce_cone: f32,
    rng: Pcg32,
}

/// Cones are kept short of horizontal so `dy` never vanishes
const MAX_CONE: f32 = 80.0;

impl VelocityGenerator {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let (min_speed, max_speed) = settings.speed_range();
        Self {
            min_speed,
            max_speed,
            serve_cone: settings.serve_cone_deg.clamp(0.0, MAX_CONE).to_radians(),
            bounce_cone: settings.bounce_cone_deg.clamp(0.0, MAX_CONE).to_radians(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn speed_range(&self) -> (f32, f32) {
        (self.min_speed, self.max_speed)
    }

    fn random_speed(&mut self) -> f32 {
        if self.max_speed > self.min_speed {
            self.rng.random_range(self.min_speed..=self.max_speed)
        } else {
            self.min_speed
        }
    }

    fn random_angle(&mut self, cone: f32) -> f32 {
        if cone > 0.0 {
            self.rng.random_range(-cone..=cone)
        } else {
            0.0
        }
    }

    /// Serve velocity: random speed, heading down toward the bottom paddle
    pub fn initial_velocity(&mut self) -> Velocity {
        let speed = self.random_speed();
        let angle = self.random_angle(self.serve_cone);
        Velocity::new(speed * angle.sin(), speed * angle.cos())
    }

    /// Rebound velocity: the incoming speed kept in range, a fresh angle,
    /// and a vertical sign that matches `direction`
    pub fn velocity_after_bounce(
        &mut self,
        incoming: Velocity,
        direction: BounceDirection,
    ) -> Velocity {
        let speed = incoming.speed().clamp(self.min_speed, self.max_speed);
        let angle = self.random_angle(self.bounce_cone);
        Velocity::new(
            speed * angle.sin(),
            direction.sign() * speed * angle.cos(),
        )
    }
}
