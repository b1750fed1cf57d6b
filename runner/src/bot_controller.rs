use common::games::snake::{BoundaryMode, Direction, GameSnapshot, Point};
use rand::Rng;

/// Autopilot: heads for the food along the shortest safe step, otherwise wanders.
pub struct BotController;

impl BotController {
    pub fn calculate_move(snapshot: &GameSnapshot) -> Option<Direction> {
        if snapshot.game_over || snapshot.paused || snapshot.is_empty() {
            return None;
        }

        let Some(food) = snapshot.food else {
            return Self::random_valid_move(snapshot);
        };

        let head = snapshot.head();
        let mut best_dir = None;
        let mut best_distance = i32::MAX;

        for dir in Self::get_valid_directions(snapshot.direction) {
            if let Some(next_pos) = Self::calculate_next_position(head, dir, snapshot)
                && Self::is_safe_position(next_pos, snapshot)
            {
                let distance = Self::manhattan_distance(next_pos, food.position, snapshot);
                if distance < best_distance {
                    best_distance = distance;
                    best_dir = Some(dir);
                }
            }
        }

        best_dir.or_else(|| Self::random_valid_move(snapshot))
    }

    fn random_valid_move(snapshot: &GameSnapshot) -> Option<Direction> {
        let head = snapshot.head();
        let safe_directions: Vec<Direction> = Self::get_valid_directions(snapshot.direction)
            .into_iter()
            .filter(|&dir| {
                Self::calculate_next_position(head, dir, snapshot)
                    .is_some_and(|next_pos| Self::is_safe_position(next_pos, snapshot))
            })
            .collect();

        if safe_directions.is_empty() {
            Some(snapshot.direction)
        } else {
            let idx = rand::rng().random_range(0..safe_directions.len());
            Some(safe_directions[idx])
        }
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn manhattan_distance(a: Point, b: Point, snapshot: &GameSnapshot) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();

        match snapshot.boundary_mode {
            BoundaryMode::Lethal => dx + dy,
            BoundaryMode::Wrap => {
                let size = snapshot.grid_size as i32;
                dx.min(size - dx) + dy.min(size - dy)
            }
        }
    }

    fn calculate_next_position(from: Point, direction: Direction, snapshot: &GameSnapshot) -> Option<Point> {
        let candidate = from.shifted(direction);
        match snapshot.boundary_mode {
            BoundaryMode::Lethal => candidate.is_within(snapshot.grid_size).then_some(candidate),
            BoundaryMode::Wrap => Some(candidate.wrapped(snapshot.grid_size)),
        }
    }

    // The engine treats the tail as solid for the coming tick.
    fn is_safe_position(pos: Point, snapshot: &GameSnapshot) -> bool {
        !snapshot.snake.contains(&pos)
    }
}
