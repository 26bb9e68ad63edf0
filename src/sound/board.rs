//! Asset-resolving sound sink.

use std::path::{Path, PathBuf};

use crate::config::SoundConfig;
use crate::observability::metrics;
use crate::sound::{SoundCue, SoundSink};

/// Themed replacements for the built-in default cues.
const THEMED_ALIASES: &[(&str, &str)] = &[
    ("GET_default_sound.mp3", "pvz_plant.mp3"),
    ("POST_default_sound.mp3", "pvz_shovel.mp3"),
    ("DELETE_default_sound.mp3", "pvz_scream.mp3"),
    ("404_sound.mp3", "pvz_zombie.mp3"),
];

/// Resolves cues to files under an asset directory.
#[derive(Debug, Clone)]
pub struct SoundBoard {
    asset_dir: PathBuf,
    themed: bool,
}

impl SoundBoard {
    pub fn new(asset_dir: impl Into<PathBuf>, themed: bool) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            themed,
        }
    }

    pub fn from_config(config: &SoundConfig) -> Self {
        Self::new(&config.asset_dir, config.themed)
    }

    /// Path of the file a cue would play.
    pub fn resolve(&self, cue: &SoundCue) -> PathBuf {
        let mut asset = cue.asset();

        if self.themed {
            let file_name = Path::new(&asset)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            if let Some((_, alias)) = THEMED_ALIASES.iter().find(|(from, _)| *from == file_name) {
                asset = (*alias).to_string();
            }
        }

        let path = Path::new(&asset);
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_dir.join(path)
        };
        std::path::absolute(&joined).unwrap_or(joined)
    }
}

impl SoundSink for SoundBoard {
    fn play(&self, cue: SoundCue) {
        let path = self.resolve(&cue);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(%cue, path = %path.display(), "No runtime available, cue dropped");
            return;
        };

        runtime.spawn(async move {
            match tokio::fs::File::open(&path).await {
                Ok(_file) => {
                    tracing::info!(%cue, path = %path.display(), "Playing sound");
                }
                Err(e) => {
                    metrics::record_sound_failure();
                    tracing::warn!(%cue, path = %path.display(), error = %e, "Failed to open sound file");
                }
            }
        });
    }
}
