use serde::Serialize;

use crate::games::SessionRng;
use crate::log;
use super::settings::GameConfig;
use super::snake::Snake;
use super::types::{BoundaryMode, Direction, Food, FoodKind, GameOverReason, Point};

const FOOD_SAMPLING_ATTEMPTS: usize = 100;

/// Every cell is covered by the snake; there is nowhere to put food.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridExhausted;

impl std::fmt::Display for GridExhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No free cell left for food")
    }
}

impl std::error::Error for GridExhausted {}

/// Owned copy of the whole game state, handed to observers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub snake: Vec<Point>,
    pub food: Option<Food>,
    pub score: u32,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub paused: bool,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub boundary_mode: BoundaryMode,
    pub grid_size: usize,
}

impl GameSnapshot {
    pub fn head(&self) -> Point {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Direction the next tick will move in.
    pub fn next_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }
}

/// Canonical mutable state of one game. All changes go through these methods.
#[derive(Debug)]
pub struct SnakeGameState {
    config: GameConfig,
    rng: SessionRng,
    snake: Snake,
    direction: Direction,
    pending_direction: Option<Direction>,
    food: Option<Food>,
    score: u32,
    game_over: bool,
    game_over_reason: Option<GameOverReason>,
    paused: bool,
    boundary_mode: BoundaryMode,
}

impl SnakeGameState {
    pub fn new(config: GameConfig, boundary_mode: BoundaryMode, rng: SessionRng) -> Self {
        Self {
            snake: Snake::new(config.initial_snake),
            direction: config.initial_direction,
            pending_direction: None,
            food: Some(Food::new(config.initial_food, None)),
            score: 0,
            game_over: false,
            game_over_reason: None,
            paused: false,
            boundary_mode,
            config,
            rng,
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.game_over = false;
        self.game_over_reason = None;
        self.paused = false;
        self.snake = Snake::new(self.config.initial_snake);
        self.direction = self.config.initial_direction;
        self.pending_direction = None;
        if let Err(e) = self.generate_food() {
            log!("Reset could not place food: {}", e);
        }
    }

    pub fn set_boundary_mode(&mut self, boundary_mode: BoundaryMode) {
        self.boundary_mode = boundary_mode;
    }

    /// Buffers `requested` for the next tick unless it reverses the direction
    /// currently in effect. Later requests before the tick replace earlier ones.
    pub fn set_direction(&mut self, requested: Direction) {
        if requested.is_opposite(&self.direction) {
            return;
        }
        self.pending_direction = Some(requested);
    }

    pub fn set_game_over(&mut self, game_over: bool, reason: Option<GameOverReason>) {
        self.game_over = game_over;
        self.game_over_reason = if game_over { reason } else { None };
    }

    pub fn update_score(&mut self) {
        self.score = self.score.saturating_add(self.config.score_increment);
    }

    /// Places food on a uniformly random free cell and picks its decoration.
    ///
    /// Rejection sampling is tried a bounded number of times; a crowded grid then
    /// falls back to choosing among the enumerated free cells.
    pub fn generate_food(&mut self) -> Result<Food, GridExhausted> {
        if self.snake.len() >= self.config.cell_count() {
            self.food = None;
            return Err(GridExhausted);
        }

        let size = self.config.grid_size as i32;
        let mut position = None;
        for _ in 0..FOOD_SAMPLING_ATTEMPTS {
            let candidate = Point::new(self.rng.random_range(0..size), self.rng.random_range(0..size));
            if !self.snake.occupies(&candidate) {
                position = Some(candidate);
                break;
            }
        }

        let position = match position {
            Some(position) => position,
            None => {
                let free_cells: Vec<Point> = (0..size)
                    .flat_map(|y| (0..size).map(move |x| Point::new(x, y)))
                    .filter(|cell| !self.snake.occupies(cell))
                    .collect();
                *self.rng.choose(&free_cells).ok_or(GridExhausted)?
            }
        };

        let kind = self.rng.choose(&FoodKind::PALETTE).copied();
        let food = Food::new(position, kind);
        self.food = Some(food);
        Ok(food)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            game_over: self.game_over,
            game_over_reason: self.game_over_reason,
            paused: self.paused,
            direction: self.direction,
            pending_direction: self.pending_direction,
            boundary_mode: self.boundary_mode,
            grid_size: self.config.grid_size,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary_mode
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    pub(crate) fn candidate_head(&self) -> Point {
        self.snake.head().shifted(self.direction)
    }

    /// Applies the boundary policy to `candidate` and checks it against the
    /// current (pre-move) body, tail included.
    pub(crate) fn resolve_head(&self, candidate: Point) -> Result<Point, GameOverReason> {
        let head = match self.boundary_mode {
            BoundaryMode::Wrap => candidate.wrapped(self.config.grid_size),
            BoundaryMode::Lethal => {
                if !candidate.is_within(self.config.grid_size) {
                    return Err(GameOverReason::HitWall);
                }
                candidate
            }
        };

        if self.snake.occupies(&head) {
            return Err(GameOverReason::HitSelf);
        }

        Ok(head)
    }

    pub(crate) fn push_head(&mut self, head: Point) {
        self.snake.push_head(head);
    }

    pub(crate) fn drop_tail(&mut self) {
        self.snake.pop_tail();
    }

    pub(crate) fn is_food_at(&self, point: Point) -> bool {
        self.food.is_some_and(|food| food.position == point)
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, segments: &[Point], direction: Direction) {
        self.snake = Snake::from_segments(segments.iter().copied()).expect("valid test body");
        self.direction = direction;
        self.pending_direction = None;
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, position: Point) {
        self.food = Some(Food::new(position, None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_state(boundary_mode: BoundaryMode) -> SnakeGameState {
        SnakeGameState::new(GameConfig::default(), boundary_mode, SessionRng::new(42))
    }

    fn small_config(grid_size: usize) -> GameConfig {
        GameConfig {
            grid_size,
            initial_snake: Point::new(0, 0),
            initial_food: Point::new(1, 1),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_new_uses_configured_start() {
        let state = create_state(BoundaryMode::Lethal);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.snake, vec![Point::new(10, 10)]);
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.food, Some(Food::new(Point::new(5, 5), None)));
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.game_over);
        assert!(!snapshot.paused);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = create_state(BoundaryMode::Wrap);
        state.set_snake(&[Point::new(3, 3), Point::new(3, 4)], Direction::Up);
        state.update_score();
        state.toggle_pause();
        state.set_game_over(true, Some(GameOverReason::HitSelf));
        state.set_direction(Direction::Left);

        state.reset();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.snake, vec![Point::new(10, 10)]);
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.pending_direction, None);
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.game_over_reason, None);
        assert!(!snapshot.paused);
        assert_eq!(snapshot.boundary_mode, BoundaryMode::Wrap);
        let food = snapshot.food.unwrap();
        assert_ne!(food.position, Point::new(10, 10));
        assert!(food.kind.is_some());
    }

    #[test]
    fn test_opposite_direction_is_ignored() {
        let mut state = create_state(BoundaryMode::Lethal);
        state.set_direction(Direction::Left);
        assert_eq!(state.next_direction(), Direction::Right);
        assert_eq!(state.snapshot().pending_direction, None);
    }

    #[test]
    fn test_same_and_perpendicular_directions_are_accepted() {
        let mut state = create_state(BoundaryMode::Lethal);
        state.set_direction(Direction::Right);
        assert_eq!(state.next_direction(), Direction::Right);
        state.set_direction(Direction::Down);
        state.set_direction(Direction::Down);
        assert_eq!(state.next_direction(), Direction::Down);
    }

    #[test]
    fn test_two_requests_cannot_reverse_within_one_tick() {
        let mut state = create_state(BoundaryMode::Lethal);
        state.set_direction(Direction::Down);
        state.set_direction(Direction::Left);
        assert_eq!(state.next_direction(), Direction::Down);

        state.apply_pending_direction();
        state.set_direction(Direction::Left);
        assert_eq!(state.next_direction(), Direction::Left);
    }

    #[test]
    fn test_set_game_over_false_clears_reason() {
        let mut state = create_state(BoundaryMode::Lethal);
        state.set_game_over(true, Some(GameOverReason::HitWall));
        assert!(state.is_game_over());
        assert_eq!(state.game_over_reason(), Some(GameOverReason::HitWall));

        state.set_game_over(false, Some(GameOverReason::HitWall));
        assert!(!state.is_game_over());
        assert_eq!(state.game_over_reason(), None);
    }

    #[test]
    fn test_update_score_adds_increment() {
        let mut state = create_state(BoundaryMode::Lethal);
        state.update_score();
        state.update_score();
        assert_eq!(state.score(), 20);
    }

    #[test]
    fn test_toggle_pause_returns_new_value() {
        let mut state = create_state(BoundaryMode::Lethal);
        assert!(state.toggle_pause());
        assert!(!state.toggle_pause());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let state = create_state(BoundaryMode::Lethal);
        let mut snapshot = state.snapshot();
        snapshot.snake.push(Point::new(0, 0));
        snapshot.score = 99;
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_generate_food_avoids_snake() {
        let mut state = create_state(BoundaryMode::Lethal);
        let body: Vec<Point> = (0..20).map(|x| Point::new(x, 7)).collect();
        state.set_snake(&body, Direction::Right);
        for _ in 0..500 {
            let food = state.generate_food().unwrap();
            assert!(!state.snake().occupies(&food.position));
            assert!(food.position.is_within(20));
        }
    }

    #[test]
    fn test_generate_food_finds_last_free_cell() {
        let mut state = SnakeGameState::new(small_config(4), BoundaryMode::Lethal, SessionRng::new(3));
        let free = Point::new(2, 1);
        let mut body: Vec<Point> = Vec::new();
        for y in 0..4 {
            let row: Vec<i32> = if y % 2 == 0 { (0..4).collect() } else { (0..4).rev().collect() };
            for x in row {
                body.push(Point::new(x, y));
            }
        }
        body.retain(|p| *p != free);
        state.set_snake(&body, Direction::Right);

        for _ in 0..1000 {
            assert_eq!(state.generate_food().unwrap().position, free);
        }
    }

    #[test]
    fn test_generate_food_reports_exhausted_grid() {
        let mut state = SnakeGameState::new(small_config(2), BoundaryMode::Wrap, SessionRng::new(3));
        state.set_snake(
            &[Point::new(0, 0), Point::new(1, 0), Point::new(1, 1), Point::new(0, 1)],
            Direction::Up,
        );
        assert_eq!(state.generate_food(), Err(GridExhausted));
        assert_eq!(state.food(), None);
    }

    #[test]
    fn test_resolve_head_lethal_wall() {
        let mut state = create_state(BoundaryMode::Lethal);
        state.set_snake(&[Point::new(0, 4)], Direction::Left);
        let candidate = state.candidate_head();
        assert_eq!(candidate, Point::new(-1, 4));
        assert_eq!(state.resolve_head(candidate), Err(GameOverReason::HitWall));
    }

    #[test]
    fn test_resolve_head_wraps() {
        let mut state = create_state(BoundaryMode::Wrap);
        state.set_snake(&[Point::new(19, 0)], Direction::Up);
        assert_eq!(state.resolve_head(state.candidate_head()), Ok(Point::new(19, 19)));
    }

    #[test]
    fn test_resolve_head_counts_tail_as_body() {
        let mut state = create_state(BoundaryMode::Lethal);
        state.set_snake(
            &[Point::new(5, 5), Point::new(5, 6), Point::new(4, 6), Point::new(4, 5)],
            Direction::Left,
        );
        assert_eq!(state.resolve_head(state.candidate_head()), Err(GameOverReason::HitSelf));
    }

    #[test]
    fn test_same_seed_places_same_food() {
        let mut a = create_state(BoundaryMode::Lethal);
        let mut b = create_state(BoundaryMode::Lethal);
        for _ in 0..10 {
            assert_eq!(a.generate_food(), b.generate_food());
        }
    }
}
