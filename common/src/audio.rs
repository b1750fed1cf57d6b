use serde::{Deserialize, Serialize};

use crate::games::snake::GameEvent;

/// What the host's sound backend should do. The engine never plays anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    StartMusic,
    StopMusic,
    PlayEat,
    PlayCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    pub muted: bool,
    pub bg_music_enabled: bool,
    pub sound_effects_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            bg_music_enabled: true,
            sound_effects_enabled: true,
        }
    }
}

/// Translates game events into audio cues according to the player's switches.
///
/// One instance is created by the application and passed to whoever listens to
/// the engine; it also tracks whether music is currently meant to be playing so
/// toggling settings mid-game can start or stop it.
#[derive(Debug, Default)]
pub struct SoundBoard {
    settings: AudioSettings,
    music_playing: bool,
    in_game: bool,
}

impl SoundBoard {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            settings,
            music_playing: false,
            in_game: false,
        }
    }

    pub fn settings(&self) -> AudioSettings {
        self.settings
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn cues_for(&mut self, event: &GameEvent) -> Vec<AudioCue> {
        let mut cues = Vec::new();
        match event {
            GameEvent::Started | GameEvent::Resumed => {
                self.in_game = true;
                self.start_music(&mut cues);
            }
            GameEvent::Paused => {
                self.in_game = false;
                self.stop_music(&mut cues);
            }
            GameEvent::Eaten { .. } => {
                if self.effects_audible() {
                    cues.push(AudioCue::PlayEat);
                }
            }
            GameEvent::Collided { .. } => {
                self.in_game = false;
                self.stop_music(&mut cues);
                if self.effects_audible() {
                    cues.push(AudioCue::PlayCollision);
                }
            }
            GameEvent::BoardFilled | GameEvent::Stopped => {
                self.in_game = false;
                self.stop_music(&mut cues);
            }
        }
        cues
    }

    pub fn set_muted(&mut self, muted: bool) -> Option<AudioCue> {
        self.settings.muted = muted;
        self.sync_music()
    }

    pub fn set_bg_music_enabled(&mut self, enabled: bool) -> Option<AudioCue> {
        self.settings.bg_music_enabled = enabled;
        self.sync_music()
    }

    pub fn set_sound_effects_enabled(&mut self, enabled: bool) {
        self.settings.sound_effects_enabled = enabled;
    }

    fn music_audible(&self) -> bool {
        !self.settings.muted && self.settings.bg_music_enabled
    }

    fn effects_audible(&self) -> bool {
        !self.settings.muted && self.settings.sound_effects_enabled
    }

    fn start_music(&mut self, cues: &mut Vec<AudioCue>) {
        if self.music_audible() && !self.music_playing {
            self.music_playing = true;
            cues.push(AudioCue::StartMusic);
        }
    }

    fn stop_music(&mut self, cues: &mut Vec<AudioCue>) {
        if self.music_playing {
            self.music_playing = false;
            cues.push(AudioCue::StopMusic);
        }
    }

    fn sync_music(&mut self) -> Option<AudioCue> {
        let mut cues = Vec::new();
        if self.in_game && self.music_audible() {
            self.start_music(&mut cues);
        } else {
            self.stop_music(&mut cues);
        }
        cues.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{GameOverReason, Point};

    fn eaten() -> GameEvent {
        GameEvent::Eaten {
            score: 10,
            position: Point::new(1, 1),
        }
    }

    #[test]
    fn test_full_game_cues() {
        let mut board = SoundBoard::new(AudioSettings::default());
        assert_eq!(board.cues_for(&GameEvent::Started), vec![AudioCue::StartMusic]);
        assert_eq!(board.cues_for(&eaten()), vec![AudioCue::PlayEat]);
        assert_eq!(board.cues_for(&GameEvent::Paused), vec![AudioCue::StopMusic]);
        assert_eq!(board.cues_for(&GameEvent::Resumed), vec![AudioCue::StartMusic]);
        assert_eq!(
            board.cues_for(&GameEvent::Collided {
                reason: GameOverReason::HitSelf
            }),
            vec![AudioCue::StopMusic, AudioCue::PlayCollision]
        );
        assert!(!board.is_music_playing());
    }

    #[test]
    fn test_muted_board_is_silent() {
        let mut board = SoundBoard::new(AudioSettings {
            muted: true,
            ..AudioSettings::default()
        });
        assert!(board.cues_for(&GameEvent::Started).is_empty());
        assert!(board.cues_for(&eaten()).is_empty());
        assert!(
            board
                .cues_for(&GameEvent::Collided {
                    reason: GameOverReason::HitWall
                })
                .is_empty()
        );
    }

    #[test]
    fn test_effects_switch_keeps_music() {
        let mut board = SoundBoard::new(AudioSettings {
            sound_effects_enabled: false,
            ..AudioSettings::default()
        });
        assert_eq!(board.cues_for(&GameEvent::Started), vec![AudioCue::StartMusic]);
        assert!(board.cues_for(&eaten()).is_empty());
    }

    #[test]
    fn test_toggling_music_mid_game() {
        let mut board = SoundBoard::new(AudioSettings::default());
        board.cues_for(&GameEvent::Started);

        assert_eq!(board.set_bg_music_enabled(false), Some(AudioCue::StopMusic));
        assert_eq!(board.set_bg_music_enabled(true), Some(AudioCue::StartMusic));
        assert_eq!(board.set_muted(true), Some(AudioCue::StopMusic));
        assert_eq!(board.set_muted(true), None);
    }

    #[test]
    fn test_enabling_music_outside_game_is_silent() {
        let mut board = SoundBoard::new(AudioSettings {
            bg_music_enabled: false,
            ..AudioSettings::default()
        });
        assert_eq!(board.set_bg_music_enabled(true), None);
    }
}
