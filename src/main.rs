//! Bounce Pong headless driver
//!
//! Runs the frame loop against a recording surface for a few seconds while a
//! scripted drag gesture sweeps the paddles, then prints the high scores.
//!
//! Usage: `bounce-pong [settings.json] [scores.json] [seconds] [auto|hold]`

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use bounce_pong::audio::{AudioManager, LogBackend};
use bounce_pong::persistence::JsonFileStore;
use bounce_pong::renderer::RecordingSurface;
use bounce_pong::{FrameLoop, Game, GameHandle, GameOverPolicy, Settings, ui};

/// Canvas size used by the headless run
const CANVAS: (f32, f32) = (480.0, 800.0);

fn main() {
    env_logger::init();
    log::info!("Bounce Pong (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = args
        .next()
        .map(|path| Settings::load(&PathBuf::from(path)))
        .unwrap_or_default();
    let scores_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("bounce_pong_scores.json"));
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);
    if let Some(arg) = args.next() {
        match GameOverPolicy::from_str(&arg) {
            Some(policy) => settings.game_over = policy,
            None => log::warn!("Unknown game over policy {arg:?}, keeping the configured one"),
        }
    }
    log::info!("Game over policy: {}", settings.game_over.as_str());

    let (scoreboard, scoreboard_rx) = ui::channel();
    let audio = AudioManager::from_settings(Box::new(LogBackend), &settings);
    let store = Box::new(JsonFileStore::new(&scores_path));
    let game = Game::new(&settings, audio, scoreboard, store, rand::random());

    let handle = GameHandle::new(game);
    handle.on_surface_resize(CANVAS.0, CANVAS.1);
    handle.start();

    let surface = RecordingSurface::new().paced(Duration::from_millis(16));
    let frame_loop = match FrameLoop::spawn(&handle, surface.clone(), settings.max_frame_dt) {
        Ok(frame_loop) => frame_loop,
        Err(err) => {
            log::error!("Could not start frame loop: {err}");
            return;
        }
    };

    // Sweep the paddles back and forth like a finger dragging
    let started = Instant::now();
    let run_for = Duration::from_secs(seconds);
    while started.elapsed() < run_for {
        let t = started.elapsed().as_secs_f32();
        let x = (t * 1.3).sin() * 0.5 + 0.5;
        handle.set_paddle_position(x * (CANVAS.0 - settings.paddle_width), CANVAS.1 * 0.8);
        if let Some(board) = scoreboard_rx.latest() {
            log::debug!("{} | {}", board.score_text, board.time_text);
        }
        thread::sleep(Duration::from_millis(20));
    }

    frame_loop.stop();

    if let Some(board) = scoreboard_rx.latest() {
        println!("{} | {}", board.score_text, board.time_text);
    }
    println!("Frames recorded: {}", surface.frame_count());

    let scores = handle.high_scores();
    if scores.is_empty() {
        println!("No high scores yet ({})", scores_path.display());
    } else {
        println!("High scores ({}):", scores_path.display());
        for (i, secs) in scores.entries.iter().enumerate() {
            println!("{:>2}. {}", i + 1, bounce_pong::highscores::format_secs(*secs));
        }
    }
}
