//! Per-frame simulation step
//!
//! Advances the game state by a measured frame delta and reports what
//! happened as [`GameEvent`]s. Audio, UI and storage are left to the caller.

use std::time::Instant;

use super::body::Axis;
use super::paddle::Facing;
use super::state::{GameEvent, GameState};
use super::velocity::BounceDirection;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32, now: Instant) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // The grace runs out on wall-clock time, paused or not
    if state.serve_delay > 0.0 {
        state.serve_delay -= dt;
        return events;
    }
    if !state.is_running() || !state.has_canvas() {
        return events;
    }

    check_collision(state, dt, &mut events);
    if check_ball_bounds(state, dt, now, &mut events) {
        return events;
    }
    advance(state, dt);

    events
}

/// Resolve at most one paddle contact, bottom paddle first
fn check_collision(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let ball = &state.ball.body;
    let hit = if state.bottom.body.collides_with(ball, dt) {
        Some(Facing::Bottom)
    } else if state.top.body.collides_with(ball, dt) {
        Some(Facing::Top)
    } else {
        None
    };

    let Some(facing) = hit else {
        // Separated: the next overlap is a new contact
        state.ball.body.clear_previous_position();
        return;
    };

    // Still overlapping the contact we already resolved
    if state.ball.body.previous_position().is_some() {
        return;
    }

    let direction = match facing {
        Facing::Bottom => BounceDirection::Up,
        Facing::Top => BounceDirection::Down,
    };
    state.ball.body.set_previous_position(dt);
    state.ball.bounce_from(direction);
    log::debug!("Paddle hit ({facing:?}), ball velocity {:?}", state.ball.velocity());
    events.push(GameEvent::PaddleHit(facing));
}

/// Wall rebounds and misses. Returns true when the session just ended.
fn check_ball_bounds(
    state: &mut GameState,
    dt: f32,
    now: Instant,
    events: &mut Vec<GameEvent>,
) -> bool {
    if state.ball.body.is_out_of_bounds(Axis::Horizontal, dt) {
        state.ball.reverse_horizontal();
        events.push(GameEvent::WallHit);
    }

    if state.ball.body.is_out_of_bounds(Axis::Vertical, dt) {
        let attempts_left = state.record_miss();
        if attempts_left == 0 {
            let elapsed_secs = state.elapsed_secs(now);
            log::info!("Last attempt lost after {elapsed_secs} sec");
            events.push(GameEvent::GameOver { elapsed_secs });
            return true;
        }
        log::debug!("Missed, {attempts_left} attempts left");
        events.push(GameEvent::Missed { attempts_left });
    }

    false
}

fn advance(state: &mut GameState, dt: f32) {
    state.ball.body.advance(dt);
    state.top.body.advance(dt);
    state.bottom.body.advance(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::GamePhase;
    use crate::sim::velocity::Velocity;
    use glam::Vec2;

    fn running_state() -> GameState {
        let now = Instant::now();
        let mut state = GameState::new(&Settings::default(), 12345, now);
        state.resize(300.0, 600.0);
        state.start(now);
        state.serve_delay = 0.0;
        state
    }

    #[test]
    fn test_paused_does_nothing() {
        let mut state = running_state();
        state.pause();
        let before = state.ball.body.pos;
        let events = tick(&mut state, 0.1, Instant::now());
        assert!(events.is_empty());
        assert_eq!(state.ball.body.pos, before);
    }

    #[test]
    fn test_serve_grace_freezes_physics() {
        let mut state = running_state();
        state.serve_delay = 2.0;
        let before = state.ball.body.pos;
        tick(&mut state, 0.5, Instant::now());
        assert_eq!(state.ball.body.pos, before);
        assert!((state.serve_delay - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_serve_grace_runs_out_while_paused() {
        let now = Instant::now();
        let mut state = GameState::new(&Settings::default(), 12345, now);
        state.resize(300.0, 600.0);
        state.start(now);
        state.pause();
        let before = state.ball.body.pos;

        for _ in 0..30 {
            tick(&mut state, 0.1, now);
        }
        assert!(state.serve_delay <= 0.0);
        assert_eq!(state.ball.body.pos, before);

        // Resuming after the grace moves the ball straight away
        state.resume();
        tick(&mut state, 0.1, now);
        assert_ne!(state.ball.body.pos, before);
    }

    #[test]
    fn test_ball_moves_when_running() {
        let mut state = running_state();
        state.ball.set_velocity(Velocity::new(10.0, 20.0));
        let before = state.ball.body.pos;
        tick(&mut state, 0.5, Instant::now());
        assert_eq!(state.ball.body.pos, before + Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_wall_hit_reverses() {
        let mut state = running_state();
        state.ball.body.pos = Vec2::new(2.0, 200.0);
        state.ball.set_velocity(Velocity::new(-100.0, 10.0));
        let events = tick(&mut state, 0.1, Instant::now());
        assert_eq!(events, vec![GameEvent::WallHit]);
        assert_eq!(state.ball.velocity().dx, 100.0);
    }

    #[test]
    fn test_bottom_paddle_bounces_up_once() {
        let mut state = running_state();
        let paddle_top = state.bottom.body.pos.y;
        state.ball.body.pos = Vec2::new(state.bottom.body.pos.x + 10.0, paddle_top - 30.0);
        state.ball.set_velocity(Velocity::new(0.0, 300.0));

        let events = tick(&mut state, 0.1, Instant::now());
        assert_eq!(events, vec![GameEvent::PaddleHit(Facing::Bottom)]);
        assert!(state.ball.velocity().dy < 0.0);

        // Only the ball carries the contact latch
        assert!(state.ball.body.previous_position().is_some());
        assert!(state.bottom.body.previous_position().is_none());
        assert!(state.top.body.previous_position().is_none());

        // Still overlapping on the next frame: no second bounce
        state.ball.body.pos.y = paddle_top - 10.0;
        let events = tick(&mut state, 0.0, Instant::now());
        assert!(events.is_empty());
    }

    #[test]
    fn test_bottom_wins_double_contact() {
        let mut state = running_state();
        // Collapse both paddles onto the same row
        state.top.body.pos = state.bottom.body.pos;
        state.ball.body.pos = state.bottom.body.pos + Vec2::new(5.0, -5.0);
        state.ball.set_velocity(Velocity::new(0.0, 50.0));
        let events = tick(&mut state, 0.05, Instant::now());
        assert_eq!(events, vec![GameEvent::PaddleHit(Facing::Bottom)]);
        assert!(state.ball.velocity().dy < 0.0);
    }

    #[test]
    fn test_top_paddle_bounces_down() {
        let mut state = running_state();
        let paddle_bottom = state.top.body.pos.y + state.top.body.size.y;
        state.ball.body.pos = Vec2::new(state.top.body.pos.x + 10.0, paddle_bottom + 5.0);
        state.ball.set_velocity(Velocity::new(0.0, -300.0));
        let events = tick(&mut state, 0.05, Instant::now());
        assert_eq!(events, vec![GameEvent::PaddleHit(Facing::Top)]);
        assert!(state.ball.velocity().dy > 0.0);
    }

    #[test]
    fn test_miss_counts_down_then_ends() {
        let mut state = running_state();
        let now = Instant::now();
        for expected in (1..10).rev() {
            state.serve_delay = 0.0;
            state.ball.body.pos = Vec2::new(0.0, 570.0);
            state.ball.set_velocity(Velocity::new(0.0, 400.0));
            let events = tick(&mut state, 0.1, now);
            assert_eq!(events, vec![GameEvent::Missed { attempts_left: expected }]);
        }
        state.serve_delay = 0.0;
        state.ball.body.pos = Vec2::new(0.0, 570.0);
        state.ball.set_velocity(Velocity::new(0.0, 400.0));
        let events = tick(&mut state, 0.1, now);
        assert!(matches!(events.as_slice(), [GameEvent::GameOver { .. }]));
        assert_eq!(state.attempts_remaining, 0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_no_canvas_no_physics() {
        let now = Instant::now();
        let mut state = GameState::new(&Settings::default(), 1, now);
        state.start(now);
        state.serve_delay = 0.0;
        assert!(tick(&mut state, 0.1, now).is_empty());
    }
}
