use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Head-first body with an occupancy index kept in sync with it.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(head: Point) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            body_set: HashSet::new(),
        };
        snake.push_head(head);
        snake
    }

    /// Builds a body from head to tail. Returns `None` for an empty or
    /// self-overlapping body.
    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Option<Self> {
        let body: VecDeque<Point> = segments.into_iter().collect();
        let body_set: HashSet<Point> = body.iter().copied().collect();
        if body.is_empty() || body_set.len() != body.len() {
            return None;
        }
        Some(Self { body, body_set })
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    /// Never removes the last segment.
    pub fn pop_tail(&mut self) -> Option<Point> {
        if self.body.len() <= 1 {
            return None;
        }
        let tail = self.body.pop_back()?;
        // Only the freshly pushed head can share the tail's cell.
        if self.body.front() != Some(&tail) {
            self.body_set.remove(&tail);
        }
        Some(tail)
    }
}
