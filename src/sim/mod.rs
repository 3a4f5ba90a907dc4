//! Frame simulation module
//!
//! All gameplay physics lives here:
//! - Bodies are axis-aligned rectangles in screen pixels (+y down)
//! - Bounds and collisions are checked against predicted positions
//! - Randomness comes from a seeded generator only
//! - No rendering, audio, or storage dependencies

pub mod ball;
pub mod body;
pub mod paddle;
pub mod state;
pub mod tick;
pub mod velocity;

pub use ball::Ball;
pub use body::{Axis, MovingBody};
pub use paddle::{Facing, Paddle, mirrored_x};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
pub use velocity::{BounceDirection, Velocity, VelocityGenerator};
