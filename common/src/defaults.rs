use std::time::Duration;

pub const GRID_SIZE: usize = 20;

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const SLOWEST_TICK_INTERVAL: Duration = Duration::from_millis(200);
pub const FASTEST_TICK_INTERVAL: Duration = Duration::from_millis(50);
pub const DIRECTION_COOLDOWN: Duration = Duration::from_millis(100);

pub const INITIAL_SNAKE_POSITION: (i32, i32) = (10, 10);
pub const INITIAL_FOOD_POSITION: (i32, i32) = (5, 5);

pub const SCORE_INCREMENT: u32 = 10;

pub const MAX_RECORDS: usize = 10;

pub const SETTINGS_FILE_NAME: &str = "snake_settings.yaml";
pub const RECORDS_FILE_NAME: &str = "snake_records.yaml";
