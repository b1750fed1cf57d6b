use serde::Serialize;

use super::types::{GameOverReason, Point};

/// Discrete signals emitted by the driver, next to the snapshots. Sound and any
/// other side effects are the listener's business.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new game began; background music may start.
    Started,
    Eaten { score: u32, position: Point },
    Collided { reason: GameOverReason },
    BoardFilled,
    Paused,
    Resumed,
    /// The player ended the game.
    Stopped,
}
