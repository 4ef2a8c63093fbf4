use super::direction::Direction;
use crate::constants::{BOTTOM_BOUNDARY, TOP_BOUNDARY};

/// A shot in flight. Player shots travel up, enemy shots travel down.
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
}

impl Shot {
    pub fn new(x: f32, y: f32, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    pub fn from_player(&self) -> bool {
        self.direction == Direction::Up
    }

    /// Shots only travel vertically and are not clamped to the field
    pub fn advance(&mut self, distance: f32) {
        let (_, dy) = self.direction.vector();
        self.y += dy * distance;
    }

    /// True once the shot has flown past the edge it was heading for
    pub fn is_spent(&self) -> bool {
        match self.direction {
            Direction::Up => self.y < TOP_BOUNDARY,
            Direction::Down => self.y > BOTTOM_BOUNDARY,
            Direction::Left | Direction::Right => false,
        }
    }
}
