//! Sound cue subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher (after the response is written)
//!     → SoundCue (route asset | method default | not-found default)
//!     → SoundSink::play (returns immediately)
//!     → board.rs: resolve under asset_dir, apply themed aliases,
//!       spawn a task that checks the file can be opened
//! ```
//!
//! # Design Decisions
//! - Fire-and-forget: `play` never blocks and never reports failure
//! - Failures are logged and counted inside the sink
//! - Decoding and mixing are outside this crate

pub mod board;

pub use board::SoundBoard;

use std::fmt;

/// What to play after a request has been answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundCue {
    /// Asset registered for the route's path.
    Route(String),
    /// No asset registered; default for the request method.
    MethodDefault(String),
    /// The request did not match any route.
    NotFound,
    /// Looping background track, cued once when serving starts.
    Background(String),
}

impl SoundCue {
    /// File name of the asset this cue refers to, before theming.
    pub fn asset(&self) -> String {
        match self {
            SoundCue::Route(asset) | SoundCue::Background(asset) => asset.clone(),
            SoundCue::MethodDefault(method) => format!("{method}_default_sound.mp3"),
            SoundCue::NotFound => "404_sound.mp3".to_string(),
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.asset())
    }
}

/// Write-only audio collaborator.
pub trait SoundSink: Send + Sync {
    /// Request playback of a cue. Must return without waiting for playback.
    fn play(&self, cue: SoundCue);
}

/// A sink that drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&self, cue: SoundCue) {
        tracing::trace!(%cue, "Sound disabled, cue dropped");
    }
}
