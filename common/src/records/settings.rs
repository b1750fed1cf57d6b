use serde::{Deserialize, Serialize};

use crate::audio::AudioSettings;
use crate::config::Validate;
use crate::games::snake::{BoundaryMode, EngineOptions, GameConfig};

/// Player preferences that survive between sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub boundary_mode: BoundaryMode,
    pub speed_percentage: u8,
    pub bg_music_enabled: bool,
    pub sound_effects_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            boundary_mode: BoundaryMode::Lethal,
            speed_percentage: config.speed_percentage_for_interval(config.tick_interval),
            bg_music_enabled: true,
            sound_effects_enabled: true,
        }
    }
}

impl GameSettings {
    pub fn engine_options(&self, config: &GameConfig) -> EngineOptions {
        EngineOptions {
            tick_interval: config.interval_for_speed_percentage(self.speed_percentage),
            boundary_mode: self.boundary_mode,
        }
    }

    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings {
            muted: false,
            bg_music_enabled: self.bg_music_enabled,
            sound_effects_enabled: self.sound_effects_enabled,
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.speed_percentage > 100 {
            return Err("Speed percentage must be between 0 and 100".to_string());
        }
        Ok(())
    }
}
