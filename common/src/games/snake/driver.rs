use std::time::Duration;

use crate::config::Validate;
use crate::games::{GameBroadcaster, Scheduler, SessionRng, TimerHandle};
use crate::log;
use super::events::GameEvent;
use super::game_state::{GameSnapshot, SnakeGameState};
use super::settings::{EngineOptions, GameConfig};
use super::types::{BoundaryMode, Direction, GameOverReason};

/// Runs one game on a repeating timer and publishes what happens.
///
/// The driver never sleeps or spawns anything itself: it asks the scheduler for a
/// timer and expects the host to call [`SnakeDriver::on_timer`] with that handle on
/// every period. Snapshots and events go to the broadcaster synchronously, in the
/// order they happen.
pub struct SnakeDriver<S: Scheduler, B: GameBroadcaster> {
    state: SnakeGameState,
    scheduler: S,
    broadcaster: B,
    tick_interval: Duration,
    timer: Option<TimerHandle>,
    tick_count: u64,
}

impl<S: Scheduler, B: GameBroadcaster> SnakeDriver<S, B> {
    /// Fails when `config` does not pass validation.
    pub fn new(
        config: GameConfig,
        options: EngineOptions,
        rng: SessionRng,
        scheduler: S,
        broadcaster: B,
    ) -> Result<Self, String> {
        config
            .validate()
            .map_err(|e| format!("Invalid game config: {}", e))?;

        let tick_interval = config.clamp_interval(options.tick_interval);
        Ok(Self {
            state: SnakeGameState::new(config, options.boundary_mode, rng),
            scheduler,
            broadcaster,
            tick_interval,
            timer: None,
            tick_count: 0,
        })
    }

    /// Resets the board and begins ticking. Does nothing while already running.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }

        self.state.reset();
        self.tick_count = 0;
        self.timer = Some(self.scheduler.schedule_repeating(self.tick_interval));

        log!(
            "Game started: {}ms per tick, {:?} boundary",
            self.tick_interval.as_millis(),
            self.state.boundary_mode()
        );
        self.broadcaster.broadcast_event(&GameEvent::Started);
    }

    /// Flips the pause flag and returns the new value. Only a running game that is
    /// not over can be paused or resumed; otherwise the current flag is returned.
    pub fn pause(&mut self) -> bool {
        if self.timer.is_none() || self.state.is_game_over() {
            return self.state.is_paused();
        }

        let paused = self.state.toggle_pause();
        let event = if paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        };
        self.broadcaster.broadcast_event(&event);
        self.publish();
        paused
    }

    /// Cancels the timer and publishes the final state. Does nothing when idle.
    pub fn stop(&mut self) {
        let Some(timer) = self.timer.take() else {
            return;
        };
        self.scheduler.cancel(timer);

        log!(
            "Game stopped after {} ticks, score {}",
            self.tick_count,
            self.state.score()
        );
        self.publish();
    }

    /// Player gives up: the game ends with [`GameOverReason::UserStopped`].
    pub fn quit(&mut self) {
        if self.timer.is_none() {
            return;
        }
        if !self.state.is_game_over() {
            self.state.set_game_over(true, Some(GameOverReason::UserStopped));
            self.broadcaster.broadcast_event(&GameEvent::Stopped);
        }
        self.stop();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.state.set_direction(direction);
    }

    pub fn set_boundary_mode(&mut self, boundary_mode: BoundaryMode) {
        self.state.set_boundary_mode(boundary_mode);
    }

    /// Changes the pace. A running game keeps its state and continues on a fresh
    /// timer; otherwise the interval is kept for the next [`SnakeDriver::start`].
    /// Returns the interval actually used after clamping.
    pub fn set_speed(&mut self, interval: Duration) -> Duration {
        let interval = self.state.config().clamp_interval(interval);
        self.tick_interval = interval;

        if let Some(previous) = self.timer.take() {
            self.scheduler.cancel(previous);
            self.timer = Some(self.scheduler.schedule_repeating(interval));
            log!("Tick interval changed to {}ms", interval.as_millis());
        }

        interval
    }

    /// Entry point for the scheduler. Deliveries for cancelled timers are dropped.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.timer == Some(handle) {
            self.tick();
        }
    }

    fn tick(&mut self) {
        if self.state.is_game_over() || self.state.is_paused() {
            return;
        }

        self.state.apply_pending_direction();
        let candidate = self.state.candidate_head();

        let head = match self.state.resolve_head(candidate) {
            Ok(head) => head,
            Err(reason) => {
                self.state.set_game_over(true, Some(reason));
                log!(
                    "Snake {} at ({}, {}), final score {}",
                    reason,
                    candidate.x,
                    candidate.y,
                    self.state.score()
                );
                self.broadcaster.broadcast_event(&GameEvent::Collided { reason });
                self.stop();
                return;
            }
        };

        self.tick_count += 1;
        self.state.push_head(head);

        if self.state.is_food_at(head) {
            self.state.update_score();
            let placed = self.state.generate_food();
            self.broadcaster.broadcast_event(&GameEvent::Eaten {
                score: self.state.score(),
                position: head,
            });

            if let Err(e) = placed {
                self.state.set_game_over(true, Some(GameOverReason::BoardFilled));
                log!("{}; game over with score {}", e, self.state.score());
                self.broadcaster.broadcast_event(&GameEvent::BoardFilled);
                self.stop();
                return;
            }
        } else {
            self.state.drop_tail();
        }

        self.publish();
    }

    fn publish(&mut self) {
        let snapshot = self.state.snapshot();
        self.broadcaster.broadcast_state(&snapshot);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    pub fn broadcaster_mut(&mut self) -> &mut B {
        &mut self.broadcaster
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SnakeGameState {
        &mut self.state
    }
}
