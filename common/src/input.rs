use std::time::{Duration, Instant};

use crate::games::snake::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Turn(Direction),
    TogglePause,
}

impl KeyCommand {
    /// Arrow keys (browser key names or plain words), WASD and space.
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "ArrowUp" | "up" | "w" | "W" => KeyCommand::Turn(Direction::Up),
            "ArrowDown" | "down" | "s" | "S" => KeyCommand::Turn(Direction::Down),
            "ArrowLeft" | "left" | "a" | "A" => KeyCommand::Turn(Direction::Left),
            "ArrowRight" | "right" | "d" | "D" => KeyCommand::Turn(Direction::Right),
            " " | "Space" | "space" | "p" | "P" => KeyCommand::TogglePause,
            _ => return None,
        };
        Some(command)
    }
}

/// Direction of a swipe from its start to its end, along the dominant axis.
/// A zero-length gesture yields nothing.
pub fn swipe_direction(dx: f32, dy: f32) -> Option<Direction> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// Rate limit for direction changes coming from one input device.
#[derive(Debug)]
pub struct DirectionThrottle {
    cooldown: Duration,
    last_accepted: Option<Instant>,
}

impl DirectionThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: None,
        }
    }

    pub fn accept(&mut self, direction: Direction) -> Option<Direction> {
        self.accept_at(direction, Instant::now())
    }

    pub fn accept_at(&mut self, direction: Direction, now: Instant) -> Option<Direction> {
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.cooldown
        {
            return None;
        }
        self.last_accepted = Some(now);
        Some(direction)
    }
}
