//! Dedicated frame loop thread
//!
//! The loop thread owns the [`Surface`]. The [`Game`] is shared with the
//! UI/input side behind one `parking_lot::Mutex`; every [`GameHandle`]
//! operation and every tick takes that lock for its whole duration, so a
//! draw always sees the state the same tick produced.
//!
//! Per tick: measure delta, lock a buffer, lock the game, update, draw,
//! unlock the game, present the buffer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use parking_lot::Mutex;

use crate::game::Game;
use crate::highscores::HighScores;
use crate::platform::FrameClock;
use crate::renderer::{FrameGuard, Surface};
use crate::sim::GamePhase;

/// Cloneable, thread-safe access to a running game
#[derive(Clone)]
pub struct GameHandle {
    game: Arc<Mutex<Game>>,
}

impl GameHandle {
    pub fn new(game: Game) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
        }
    }

    pub fn start(&self) {
        self.game.lock().start(Instant::now());
    }

    pub fn pause(&self) {
        self.game.lock().pause();
    }

    pub fn resume(&self) {
        self.game.lock().resume();
    }

    /// Input drag coordinates; fire-and-forget
    pub fn set_paddle_position(&self, x: f32, y: f32) {
        self.game.lock().set_paddle_position(x, y);
    }

    pub fn on_surface_resize(&self, width: f32, height: f32) {
        self.game.lock().on_surface_resize(width, height);
    }

    pub fn phase(&self) -> GamePhase {
        self.game.lock().state().phase
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.game.lock().state().attempts_remaining
    }

    pub fn high_scores(&self) -> HighScores {
        self.game.lock().high_scores().clone()
    }

    /// Run `f` with the game locked
    pub fn with_game<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut self.game.lock())
    }
}

/// A running frame loop thread
pub struct FrameLoop<S: Surface + Send + 'static> {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<S>>,
}

impl<S: Surface + Send + 'static> FrameLoop<S> {
    /// Spawn the loop thread. It ticks until [`FrameLoop::stop`].
    pub fn spawn(handle: &GameHandle, surface: S, max_frame_dt: f32) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let thread = {
            let game = Arc::clone(&handle.game);
            let running = Arc::clone(&running);
            thread::Builder::new()
                .name("frame-loop".into())
                .spawn(move || run(game, surface, running, max_frame_dt))?
        };
        log::info!("Frame loop started");
        Ok(Self {
            running,
            thread: Some(thread),
        })
    }

    /// Ask the loop to finish its current tick and exit; returns the surface
    pub fn stop(mut self) -> Option<S> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<S> {
        self.running.store(false, Ordering::Release);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(surface) => {
                log::info!("Frame loop stopped");
                Some(surface)
            }
            Err(_) => {
                log::warn!("Frame loop thread panicked");
                None
            }
        }
    }
}

impl<S: Surface + Send + 'static> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<S: Surface>(
    game: Arc<Mutex<Game>>,
    mut surface: S,
    running: Arc<AtomicBool>,
    max_frame_dt: f32,
) -> S {
    let mut clock = FrameClock::new(max_frame_dt);
    while running.load(Ordering::Acquire) {
        let dt = clock.tick();
        let mut frame = FrameGuard::lock(&mut surface);
        {
            let mut game = game.lock();
            game.update(dt, Instant::now());
            if let Some(buffer) = frame.buffer() {
                if let Err(err) = game.draw(buffer) {
                    log::warn!("Draw failed: {err}");
                }
            }
        }
        drop(frame);
        // Surfaces without vsync would otherwise spin
        thread::yield_now();
    }
    surface
}
