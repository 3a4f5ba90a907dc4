//! Drawing surface abstraction
//!
//! A frame is drawn as a short list of [`DrawCommand`]s against a buffer
//! locked from a [`Surface`]. [`FrameGuard`] presents the buffer when it goes
//! out of scope, so a failed draw still releases it.

pub mod recording;

use glam::Vec2;
use thiserror::Error;

use crate::sim::Facing;

pub use recording::RecordingSurface;

/// One draw call. Frames are drawn back to front in the order issued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Background,
    Ball { pos: Vec2, size: Vec2 },
    Paddle { facing: Facing, pos: Vec2, size: Vec2 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("draw call rejected: {0}")]
    Rejected(String),
}

/// A locked frame buffer
pub trait FrameBuffer {
    fn draw(&mut self, command: DrawCommand) -> Result<(), RenderError>;
}

/// Presentation backend
pub trait Surface {
    type Buffer: FrameBuffer;

    /// Lock the next buffer. May block briefly; `None` skips drawing this tick.
    fn lock_buffer(&mut self) -> Option<Self::Buffer>;

    /// Release a buffer and show it
    fn unlock_and_present(&mut self, buffer: Self::Buffer);
}

/// Scoped buffer lock: presents on drop
pub struct FrameGuard<'a, S: Surface> {
    surface: &'a mut S,
    buffer: Option<S::Buffer>,
}

impl<'a, S: Surface> FrameGuard<'a, S> {
    pub fn lock(surface: &'a mut S) -> Self {
        let buffer = surface.lock_buffer();
        Self { surface, buffer }
    }

    /// The locked buffer, if one was available
    pub fn buffer(&mut self) -> Option<&mut S::Buffer> {
        self.buffer.as_mut()
    }
}

impl<S: Surface> Drop for FrameGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.surface.unlock_and_present(buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_presents_on_drop() {
        let mut surface = RecordingSurface::new();
        {
            let mut frame = FrameGuard::lock(&mut surface);
            let buffer = frame.buffer().unwrap();
            buffer.draw(DrawCommand::Background).unwrap();
        }
        assert_eq!(surface.presented(), vec![vec![DrawCommand::Background]]);
    }

    #[test]
    fn test_guard_presents_after_failed_draw() {
        let mut surface = RecordingSurface::new().rejecting_draws();
        {
            let mut frame = FrameGuard::lock(&mut surface);
            let buffer = frame.buffer().unwrap();
            assert!(buffer.draw(DrawCommand::Background).is_err());
        }
        assert_eq!(surface.presented().len(), 1);
    }

    #[test]
    fn test_unavailable_buffer_presents_nothing() {
        let mut surface = RecordingSurface::new();
        surface.set_available(false);
        {
            let mut frame = FrameGuard::lock(&mut surface);
            assert!(frame.buffer().is_none());
        }
        assert!(surface.presented().is_empty());
    }
}
