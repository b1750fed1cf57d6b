use common::audio::{AudioCue, SoundBoard};
use common::games::GameBroadcaster;
use common::games::snake::{GameEvent, GameSnapshot};
use common::log;

const PROGRESS_EVERY: u64 = 50;

/// Terminal stand-in for the renderer and the sound backend: progress and audio
/// cues go to the log.
pub struct ConsoleBroadcaster {
    sound_board: SoundBoard,
    published: u64,
}

impl ConsoleBroadcaster {
    pub fn new(sound_board: SoundBoard) -> Self {
        Self {
            sound_board,
            published: 0,
        }
    }

    pub fn sound_board_mut(&mut self) -> &mut SoundBoard {
        &mut self.sound_board
    }

    pub fn play(&self, cue: AudioCue) {
        log!("[audio] {:?}", cue);
    }
}

impl GameBroadcaster for ConsoleBroadcaster {
    fn broadcast_state(&mut self, snapshot: &GameSnapshot) {
        self.published += 1;
        if snapshot.paused {
            log!("Paused at score {}", snapshot.score);
        } else if self.published % PROGRESS_EVERY == 0 {
            let head = snapshot.head();
            log!(
                "Head ({}, {}) heading {:?}, length {}, score {}",
                head.x,
                head.y,
                snapshot.direction,
                snapshot.len(),
                snapshot.score
            );
        }
    }

    fn broadcast_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Eaten { score, position } => {
                log!("Ate food at ({}, {}), score {}", position.x, position.y, score)
            }
            GameEvent::Collided { reason } => log!("Collision: snake {}", reason),
            other => log!("{:?}", other),
        }

        for cue in self.sound_board.cues_for(event) {
            self.play(cue);
        }
    }
}
