//! Game session: simulation plus its collaborators
//!
//! [`Game`] owns the simulation state and the injected audio, UI channel and
//! score store. It turns [`GameEvent`]s into cues, posts score text, runs the
//! game-over sequence and issues draw commands. It is not thread-aware; the
//! frame loop wraps it in a lock.

use std::time::Instant;

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::renderer::{DrawCommand, FrameBuffer, RenderError};
use crate::settings::{GameOverPolicy, Settings};
use crate::sim::{GameEvent, GameState, tick};
use crate::ui::{ScoreBoard, ScoreBoardTx};

pub struct Game {
    state: GameState,
    audio: AudioManager,
    scoreboard: ScoreBoardTx,
    store: Box<dyn ScoreStore>,
    high_scores: HighScores,
    game_over: GameOverPolicy,
}

impl Game {
    pub fn new(
        settings: &Settings,
        audio: AudioManager,
        scoreboard: ScoreBoardTx,
        store: Box<dyn ScoreStore>,
        seed: u64,
    ) -> Self {
        let high_scores = HighScores::load(&*store, settings.rank_order);
        Self {
            state: GameState::new(settings, seed, Instant::now()),
            audio,
            scoreboard,
            store,
            high_scores,
            game_over: settings.game_over,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn start(&mut self, now: Instant) {
        log::info!("Session started");
        self.state.start(now);
    }

    pub fn pause(&mut self) {
        self.state.pause();
    }

    pub fn resume(&mut self) {
        self.state.resume();
    }

    pub fn set_paddle_position(&mut self, x: f32, y: f32) {
        self.state.set_paddle_position(x, y);
    }

    pub fn on_surface_resize(&mut self, width: f32, height: f32) {
        log::debug!("Surface resized to {width}x{height}");
        self.state.resize(width, height);
    }

    /// One frame of game logic: physics, cues, scoring, score text
    pub fn update(&mut self, dt: f32, now: Instant) {
        let mut finished = false;
        for event in tick(&mut self.state, dt, now) {
            match event {
                GameEvent::PaddleHit(_) => self.audio.play(SoundEffect::PaddleHit),
                GameEvent::WallHit => self.audio.play(SoundEffect::WallHit),
                GameEvent::Missed { .. } => self.audio.play(SoundEffect::Miss),
                GameEvent::GameOver { elapsed_secs } => {
                    self.finish_game(elapsed_secs, now);
                    finished = true;
                }
            }
        }

        // The game-over text stays the last message of its tick
        if self.state.is_running() && !finished {
            let message =
                ScoreBoard::running(self.state.attempts_remaining, self.state.elapsed_secs(now));
            self.scoreboard.post(message);
        }
    }

    fn finish_game(&mut self, elapsed_secs: u64, now: Instant) {
        self.scoreboard.post(ScoreBoard::game_over(
            self.state.attempts_remaining,
            elapsed_secs,
        ));
        self.audio.play(SoundEffect::GameOver);
        self.state.pause();

        match self.high_scores.record(&mut *self.store, elapsed_secs) {
            Ok(Some(rank)) => log::info!("New high score #{rank}: {elapsed_secs} sec"),
            Ok(None) => log::info!("{elapsed_secs} sec did not make the high score table"),
            Err(err) => log::warn!("Could not save high score: {err}"),
        }

        self.state.reset_session(now);
        if self.game_over == GameOverPolicy::AutoRestart {
            self.state.resume();
        }
    }

    /// Draw the current state back to front
    pub fn draw<B: FrameBuffer>(&self, buffer: &mut B) -> Result<(), RenderError> {
        let state = &self.state;
        buffer.draw(DrawCommand::Background)?;
        buffer.draw(DrawCommand::Ball {
            pos: state.ball.body.pos,
            size: state.ball.body.size,
        })?;
        for paddle in [&state.top, &state.bottom] {
            buffer.draw(DrawCommand::Paddle {
                facing: paddle.facing,
                pos: paddle.body.pos,
                size: paddle.body.size,
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("high_scores", &self.high_scores)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}
