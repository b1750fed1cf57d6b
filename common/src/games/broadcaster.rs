use super::snake::{GameEvent, GameSnapshot};

/// Observer seam of the engine. Calls arrive synchronously, in the order the
/// driver produces them within a single tick or lifecycle call.
pub trait GameBroadcaster {
    fn broadcast_state(&mut self, snapshot: &GameSnapshot);

    fn broadcast_event(&mut self, event: &GameEvent);
}

impl<B: GameBroadcaster + ?Sized> GameBroadcaster for &mut B {
    fn broadcast_state(&mut self, snapshot: &GameSnapshot) {
        (**self).broadcast_state(snapshot);
    }

    fn broadcast_event(&mut self, event: &GameEvent) {
        (**self).broadcast_event(event);
    }
}

/// Keeps everything it is sent. Handy for tests and headless measurements.
#[derive(Clone, Debug, Default)]
pub struct RecordingBroadcaster {
    pub snapshots: Vec<GameSnapshot>,
    pub events: Vec<GameEvent>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshots.last()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.events.clear();
    }
}

impl GameBroadcaster for RecordingBroadcaster {
    fn broadcast_state(&mut self, snapshot: &GameSnapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn broadcast_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
