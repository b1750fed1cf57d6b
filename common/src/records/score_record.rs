use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::games::snake::BoundaryMode;

const DEFAULT_PLAYER_NAME: &str = "Player";
const MAX_PLAYER_NAME_CHARS: usize = 24;

/// One finished game, as kept in the high-score list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: u32,
    pub boundary_mode: BoundaryMode,
    pub speed_percentage: u8,
    /// Unix time in milliseconds.
    pub timestamp: i64,
}

impl ScoreRecord {
    pub fn new(player_name: &str, score: u32, boundary_mode: BoundaryMode, speed_percentage: u8) -> Self {
        Self::with_timestamp(
            player_name,
            score,
            boundary_mode,
            speed_percentage,
            Utc::now().timestamp_millis(),
        )
    }

    pub fn with_timestamp(
        player_name: &str,
        score: u32,
        boundary_mode: BoundaryMode,
        speed_percentage: u8,
        timestamp: i64,
    ) -> Self {
        let trimmed = player_name.trim();
        let player_name = if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            trimmed.chars().take(MAX_PLAYER_NAME_CHARS).collect()
        };

        Self {
            player_name,
            score,
            boundary_mode,
            speed_percentage: speed_percentage.min(100),
            timestamp,
        }
    }

    /// `"Ann - 120 pts - walls mode (speed 67%) - 2024-03-01 18:05"`, in local time.
    pub fn display_text(&self) -> String {
        self.display_text_in(&Local)
    }

    pub fn display_text_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let when = tz
            .timestamp_millis_opt(self.timestamp)
            .single()
            .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        let mode = match self.boundary_mode {
            BoundaryMode::Lethal => "walls",
            BoundaryMode::Wrap => "wrap",
        };
        format!(
            "{} - {} pts - {} mode (speed {}%) - {}",
            self.player_name, self.score, mode, self.speed_percentage, when
        )
    }
}
