//! Sound cues and the audio sink
//!
//! The simulation only names cues. Whatever plays them (a native mixer, Web
//! Audio, a test recorder) sits behind [`AudioSink`].

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Ball bounces off a normal block, mover or director side
    Normal,
    /// Breakable block shatters
    Breakable,
    /// Bounce block
    Bounce,
    /// Ball destroyed (trap, crushed, embedded)
    Trap,
    /// Goal reached
    Goal,
    /// Director engaged a directional lock
    Director,
    /// Player steering cancelled a directional lock
    DirectorCancel,
}

impl SoundCue {
    /// Asset file for this cue, relative to the audio directory
    pub fn asset(&self) -> &'static str {
        match self {
            SoundCue::Normal => "block_normal.wav",
            SoundCue::Breakable => "block_breakable.mp3",
            SoundCue::Bounce => "block_bounce.mp3",
            SoundCue::Trap => "block_trap.mp3",
            SoundCue::Goal => "block_goal.mp3",
            SoundCue::Director => "block_dir.mp3",
            SoundCue::DirectorCancel => "false_dir.mp3",
        }
    }
}

/// Looping background track
pub const MUSIC_TRACK: &str = "bensound-tenderness.mp3";
/// Music plays quieter than effects
const MUSIC_BASE_GAIN: f32 = 0.3;

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Records cues in order (headless runs and tests)
impl AudioSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// A cue waiting for the platform mixer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedSound {
    pub cue: SoundCue,
    pub volume: f32,
}

/// Audio manager for the game
///
/// Applies volume and mute settings, then queues cues for the platform layer
/// to drain once per frame.
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    queue: Vec<QueuedSound>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            queue: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
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

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective effect volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Gain for [`MUSIC_TRACK`]
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume * MUSIC_BASE_GAIN
        }
    }

    /// Take all queued cues
    pub fn drain(&mut self) -> Vec<QueuedSound> {
        std::mem::take(&mut self.queue)
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        log::trace!("Queue {} at {:.2}", cue.asset(), volume);
        self.queue.push(QueuedSound { cue, volume });
    }
}
