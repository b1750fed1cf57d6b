use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Identifies one repeating timer. Handles are never reused, so a delivery that
/// arrives after its timer was cancelled can be recognised and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Capability to fire something periodically. The driver only asks for timers;
/// who calls it back on each period is up to the host.
pub trait Scheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;

    fn cancel(&mut self, handle: TimerHandle);
}

/// Deterministic scheduler: nothing fires on its own. Tests look up the active
/// handle and hand it to the driver to step one tick at a time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: BTreeMap<TimerHandle, Duration>,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently scheduled timer that is still active.
    pub fn active_handle(&self) -> Option<TimerHandle> {
        self.active.keys().next_back().copied()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn interval_of(&self, handle: TimerHandle) -> Option<Duration> {
        self.active.get(&handle).copied()
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.active.insert(handle, interval);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.active.remove(&handle).is_some() {
            self.cancelled += 1;
        }
    }
}

/// Scheduler backed by tokio timers. Every period the timer's handle is pushed
/// into a single-slot channel; if the host has not consumed the previous delivery
/// yet, the new one is dropped, so a stalled host never gets a burst of ticks.
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    sender: mpsc::Sender<TimerHandle>,
}

impl TokioScheduler {
    pub fn create() -> (Self, mpsc::Receiver<TimerHandle>) {
        let (sender, receiver) = mpsc::channel(1);
        let scheduler = Self {
            next_id: 0,
            tasks: HashMap::new(),
            sender,
        };
        (scheduler, receiver)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    /// Must be called from inside a tokio runtime.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let sender = self.sender.clone();

        let task = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                timer.tick().await;
                match sender.try_send(handle) {
                    Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => {}
                    Err(mpsc::error::TrySendError::Closed(_)) => break,
                }
            }
        });

        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
