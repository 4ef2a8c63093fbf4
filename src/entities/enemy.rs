use super::direction::Direction;
use crate::constants::{SPRITE_RADIUS, clamp_to_field};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyType {
    AtAt,
    Fighter,
    Asteroid,
}

impl EnemyType {
    pub const ALL: [EnemyType; 3] = [EnemyType::AtAt, EnemyType::Fighter, EnemyType::Asteroid];

    /// Chance of firing when a volley comes around
    pub fn fire_probability(&self) -> f32 {
        match self {
            EnemyType::AtAt => 0.2,
            EnemyType::Fighter => 0.1,
            EnemyType::Asteroid => 0.0,
        }
    }

    /// Chance that a spawn slot holds this type
    pub fn spawn_probability(&self) -> f32 {
        match self {
            EnemyType::AtAt => 0.2,
            EnemyType::Fighter => 0.4,
            EnemyType::Asteroid => 0.3,
        }
    }

    pub fn get_points(&self) -> u32 {
        match self {
            EnemyType::AtAt => 200,
            EnemyType::Fighter => 150,
            EnemyType::Asteroid => 100,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            EnemyType::AtAt => "AT-AT",
            EnemyType::Fighter => "Fighter",
            EnemyType::Asteroid => "Asteroid",
        }
    }

    pub fn get_sprite_lines(&self) -> &'static [&'static str] {
        match self {
            EnemyType::AtAt => &["[##]>", "/\\ /\\"],
            EnemyType::Fighter => &["|-O-|"],
            EnemyType::Asteroid => &[" .-. ", "(   )", " '-' "],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub enemy_type: EnemyType,
}

impl Enemy {
    pub fn new(x: f32, y: f32, enemy_type: EnemyType) -> Self {
        Self { x, y, enemy_type }
    }

    /// Moves along `direction`, staying inside the field
    pub fn move_toward(&mut self, direction: Direction, distance: f32) {
        let (dx, dy) = direction.vector();
        let (x, y) = clamp_to_field(self.x + dx * distance, self.y + dy * distance);
        self.x = x;
        self.y = y;
    }

    pub fn can_fire(&self) -> bool {
        self.enemy_type.fire_probability() > 0.0
    }

    /// Where this enemy's shots appear: top center of the sprite
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x, self.y - SPRITE_RADIUS)
    }

    pub fn get_points(&self) -> u32 {
        self.enemy_type.get_points()
    }
}
