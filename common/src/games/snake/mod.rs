mod driver;
mod events;
mod game_state;
mod settings;
mod snake;
mod types;

pub use driver::SnakeDriver;
pub use events::GameEvent;
pub use game_state::{GameSnapshot, GridExhausted, SnakeGameState};
pub use settings::{EngineOptions, GameConfig};
pub use snake::Snake;
pub use types::{BoundaryMode, Direction, Food, FoodKind, GameOverReason, Point};
