//! Headless surface that records presented frames
//!
//! Used by the native binary and by tests. Clones share the recorded frames
//! and the availability switch, so a clone kept outside the frame loop
//! thread can observe and steer the one inside it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use super::{DrawCommand, FrameBuffer, RenderError, Surface};

/// Frames kept before the oldest are dropped
const MAX_FRAMES: usize = 256;

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    frames: Arc<Mutex<Vec<Vec<DrawCommand>>>>,
    available: Arc<AtomicBool>,
    reject_draws: bool,
    frame_interval: Duration,
}

/// Buffer handed out by [`RecordingSurface`]
#[derive(Debug, Default)]
pub struct RecordedFrame {
    commands: Vec<DrawCommand>,
    reject_draws: bool,
}

impl FrameBuffer for RecordedFrame {
    fn draw(&mut self, command: DrawCommand) -> Result<(), RenderError> {
        if self.reject_draws {
            return Err(RenderError::Rejected(format!("{command:?}")));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
            available: Arc::new(AtomicBool::new(true)),
            reject_draws: false,
            frame_interval: Duration::ZERO,
        }
    }

    /// Block for `interval` on every buffer lock, like a vsync'd display
    pub fn paced(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Every draw call fails (the buffer is still presented)
    pub fn rejecting_draws(mut self) -> Self {
        self.reject_draws = true;
        self
    }

    /// Simulate the presentation backend withholding buffers
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    /// Presented frames, oldest first
    pub fn presented(&self) -> Vec<Vec<DrawCommand>> {
        self.frames.lock().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }
}

impl Surface for RecordingSurface {
    type Buffer = RecordedFrame;

    fn lock_buffer(&mut self) -> Option<RecordedFrame> {
        if !self.frame_interval.is_zero() {
            thread::sleep(self.frame_interval);
        }
        if !self.available.load(Ordering::Acquire) {
            return None;
        }
        Some(RecordedFrame {
            commands: Vec::with_capacity(4),
            reject_draws: self.reject_draws,
        })
    }

    fn unlock_and_present(&mut self, buffer: RecordedFrame) {
        let mut frames = self.frames.lock();
        if frames.len() >= MAX_FRAMES {
            frames.remove(0);
        }
        frames.push(buffer.commands);
    }
}
