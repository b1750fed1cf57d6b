mod broadcaster;
mod scheduler;
mod session_rng;

pub mod snake;

pub use broadcaster::{GameBroadcaster, RecordingBroadcaster};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use session_rng::SessionRng;
