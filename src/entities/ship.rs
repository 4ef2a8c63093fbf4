use super::direction::Direction;
use super::shot::Shot;
use crate::constants::{
    BOTTOM_BOUNDARY, CANVAS_WIDTH, ENEMY_PADDING, MAX_PLAYER_LIVES, SPRITE_RADIUS,
    SPRITE_SIZE, clamp_to_field,
};

/// The player-controlled ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    /// Spare ships left; a hit with none left destroys the ship
    pub lives: u8,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new(MAX_PLAYER_LIVES)
    }
}

impl Ship {
    /// Creates a ship parked at the bottom center of the field
    pub fn new(lives: u8) -> Self {
        Self {
            x: CANVAS_WIDTH / 2.0 - SPRITE_SIZE / 2.0,
            y: BOTTOM_BOUNDARY - SPRITE_RADIUS,
            lives,
        }
    }

    pub fn move_toward(&mut self, direction: Direction, distance: f32) {
        let (dx, dy) = direction.vector();
        let (x, y) = clamp_to_field(self.x + dx * distance, self.y + dy * distance);
        self.x = x;
        self.y = y;
    }

    /// Twin shots from the wing tips
    pub fn fire(&self) -> [Shot; 2] {
        let wing = SPRITE_RADIUS - ENEMY_PADDING;
        let nose = self.y - SPRITE_RADIUS;
        [
            Shot::new(self.x - wing, nose, Direction::Up),
            Shot::new(self.x + wing, nose, Direction::Up),
        ]
    }

    /// Takes a hit. Returns true when the ship had no lives to spare.
    pub fn take_hit(&mut self) -> bool {
        match self.lives.checked_sub(1) {
            Some(lives) => {
                self.lives = lives;
                false
            }
            None => true,
        }
    }

    pub fn get_sprite_lines(&self) -> &'static [&'static str] {
        &["  A  ", "<=H=>"]
    }
}
