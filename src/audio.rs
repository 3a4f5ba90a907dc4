//! Sound cues
//!
//! The game never plays audio itself: it hands cues to an injected
//! [`AudioManager`], which applies volume settings and forwards them to an
//! [`AudioBackend`]. Playback is fire-and-forget.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits side wall
    WallHit,
    /// Ball got past a paddle
    Miss,
    /// Last attempt lost
    GameOver,
}

impl SoundEffect {
    /// Playback priority; higher wins when the backend has to drop cues
    pub fn priority(self) -> u8 {
        match self {
            SoundEffect::WallHit => 2,
            SoundEffect::PaddleHit | SoundEffect::Miss | SoundEffect::GameOver => 1,
        }
    }
}

/// A cue as delivered to a backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub priority: u8,
    pub volume: f32,
}

/// Something that can actually make noise. Must not block.
pub trait AudioBackend: Send {
    fn play_cue(&mut self, cue: Cue);
}

/// Backend that only logs cues
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_cue(&mut self, cue: Cue) {
        log::debug!(
            "Cue {:?} (priority {}, volume {:.2})",
            cue.effect,
            cue.priority,
            cue.volume
        );
    }
}

/// Backend forwarding cues to a playback thread over a channel
#[derive(Debug)]
pub struct ChannelBackend(Sender<Cue>);

impl ChannelBackend {
    pub fn new() -> (Self, Receiver<Cue>) {
        let (tx, rx) = mpsc::channel();
        (Self(tx), rx)
    }
}

impl AudioBackend for ChannelBackend {
    fn play_cue(&mut self, cue: Cue) {
        // Receiver gone means nobody is listening; drop the cue
        let _ = self.0.send(cue);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager with volume settings applied
    pub fn from_settings(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        self.backend.play_cue(Cue {
            effect,
            priority: effect.priority(),
            volume,
        });
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}
