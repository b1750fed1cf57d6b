use serde::{Deserialize, Serialize};

/// Grid cell. Signed so a candidate head may sit one step outside the grid
/// before the boundary policy decides what that means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn shifted(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    pub fn wrapped(&self, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self::new(self.x.rem_euclid(size), self.y.rem_euclid(size))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    /// Screen coordinates: y grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What happens when the head crosses the grid edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    #[default]
    Lethal,
    Wrap,
}

impl BoundaryMode {
    pub fn is_lethal(&self) -> bool {
        matches!(self, BoundaryMode::Lethal)
    }
}

impl From<bool> for BoundaryMode {
    fn from(lethal: bool) -> Self {
        if lethal {
            BoundaryMode::Lethal
        } else {
            BoundaryMode::Wrap
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    UserStopped,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

impl std::fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            GameOverReason::HitWall => "hit the wall",
            GameOverReason::HitSelf => "hit itself",
            GameOverReason::UserStopped => "stopped by player",
            GameOverReason::BoardFilled => "filled the board",
        };
        write!(f, "{}", text)
    }
}

/// Decorative variant of a food item. Has no effect on gameplay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Apple,
    Pear,
    Orange,
    Lemon,
    Banana,
    Watermelon,
    Grapes,
    Strawberry,
    Cherries,
    Peach,
    Kiwi,
    Tomato,
}

impl FoodKind {
    pub const PALETTE: [FoodKind; 12] = [
        FoodKind::Apple,
        FoodKind::Pear,
        FoodKind::Orange,
        FoodKind::Lemon,
        FoodKind::Banana,
        FoodKind::Watermelon,
        FoodKind::Grapes,
        FoodKind::Strawberry,
        FoodKind::Cherries,
        FoodKind::Peach,
        FoodKind::Kiwi,
        FoodKind::Tomato,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            FoodKind::Apple => "🍎",
            FoodKind::Pear => "🍐",
            FoodKind::Orange => "🍊",
            FoodKind::Lemon => "🍋",
            FoodKind::Banana => "🍌",
            FoodKind::Watermelon => "🍉",
            FoodKind::Grapes => "🍇",
            FoodKind::Strawberry => "🍓",
            FoodKind::Cherries => "🍒",
            FoodKind::Peach => "🍑",
            FoodKind::Kiwi => "🥝",
            FoodKind::Tomato => "🍅",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Point,
    pub kind: Option<FoodKind>,
}

impl Food {
    pub fn new(position: Point, kind: Option<FoodKind>) -> Self {
        Self { position, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        for direction in Direction::ALL {
            assert!(direction.is_opposite(&direction.opposite()));
            assert!(!direction.is_opposite(&direction));
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert!(!Direction::Up.is_opposite(&Direction::Left));
    }

    #[test]
    fn test_wrapped_crosses_every_edge() {
        assert_eq!(Point::new(-1, 4).wrapped(20), Point::new(19, 4));
        assert_eq!(Point::new(20, 4).wrapped(20), Point::new(0, 4));
        assert_eq!(Point::new(4, -1).wrapped(20), Point::new(4, 19));
        assert_eq!(Point::new(4, 20).wrapped(20), Point::new(4, 0));
    }

    #[test]
    fn test_is_within() {
        assert!(Point::new(0, 0).is_within(20));
        assert!(Point::new(19, 19).is_within(20));
        assert!(!Point::new(20, 0).is_within(20));
        assert!(!Point::new(0, -1).is_within(20));
    }

    #[test]
    fn test_boundary_mode_from_flag() {
        assert_eq!(BoundaryMode::from(true), BoundaryMode::Lethal);
        assert_eq!(BoundaryMode::from(false), BoundaryMode::Wrap);
    }
}
