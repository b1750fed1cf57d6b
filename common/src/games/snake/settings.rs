use std::time::Duration;

use crate::config::Validate;
use crate::defaults;
use super::types::{BoundaryMode, Direction, Point};

/// Fixed rules of a game. Built once and shared read-only by the store and driver.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub grid_size: usize,
    pub tick_interval: Duration,
    pub slowest_interval: Duration,
    pub fastest_interval: Duration,
    pub direction_cooldown: Duration,
    pub initial_snake: Point,
    pub initial_direction: Direction,
    pub initial_food: Point,
    pub score_increment: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: defaults::GRID_SIZE,
            tick_interval: defaults::TICK_INTERVAL,
            slowest_interval: defaults::SLOWEST_TICK_INTERVAL,
            fastest_interval: defaults::FASTEST_TICK_INTERVAL,
            direction_cooldown: defaults::DIRECTION_COOLDOWN,
            initial_snake: Point::from(defaults::INITIAL_SNAKE_POSITION),
            initial_direction: Direction::Right,
            initial_food: Point::from(defaults::INITIAL_FOOD_POSITION),
            score_increment: defaults::SCORE_INCREMENT,
        }
    }
}

impl GameConfig {
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn clamp_interval(&self, interval: Duration) -> Duration {
        interval.clamp(self.fastest_interval, self.slowest_interval)
    }

    /// 0% is the slowest pace, 100% the fastest.
    pub fn interval_for_speed_percentage(&self, percentage: u8) -> Duration {
        let percentage = u32::from(percentage.min(100));
        let span = self.slowest_interval - self.fastest_interval;
        self.slowest_interval - span * percentage / 100
    }

    /// Inverse of [`GameConfig::interval_for_speed_percentage`], rounded to the nearest percent.
    pub fn speed_percentage_for_interval(&self, interval: Duration) -> u8 {
        let interval = self.clamp_interval(interval);
        let span = (self.slowest_interval - self.fastest_interval).as_millis();
        if span == 0 {
            return 100;
        }
        let offset = (self.slowest_interval - interval).as_millis();
        ((offset * 100 + span / 2) / span) as u8
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size < 2 || self.grid_size > 1000 {
            return Err("Grid size must be between 2 and 1000".to_string());
        }
        if !self.initial_snake.is_within(self.grid_size) {
            return Err("Initial snake position must be inside the grid".to_string());
        }
        if !self.initial_food.is_within(self.grid_size) {
            return Err("Initial food position must be inside the grid".to_string());
        }
        if self.initial_snake == self.initial_food {
            return Err("Initial food must not start under the snake".to_string());
        }
        if self.fastest_interval.is_zero() {
            return Err("Fastest tick interval must be positive".to_string());
        }
        if self.fastest_interval > self.slowest_interval {
            return Err("Fastest tick interval must not exceed the slowest".to_string());
        }
        if self.tick_interval < self.fastest_interval || self.tick_interval > self.slowest_interval {
            return Err("Default tick interval must lie within the speed range".to_string());
        }
        Ok(())
    }
}

/// Construction-time choices of the host: pacing and edge policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    pub tick_interval: Duration,
    pub boundary_mode: BoundaryMode,
}

impl EngineOptions {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            tick_interval: config.tick_interval,
            boundary_mode: BoundaryMode::default(),
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
