//! Weighted-random enemy generation.

use rand::Rng;

use crate::constants::{
    CANVAS_WIDTH, ENEMY_COLUMN_SIZE, ENEMY_PITCH, ENEMY_ROW_SIZE, LEFT_BOUNDARY, ROW_SPAN,
    SPRITE_RADIUS, TOP_BOUNDARY,
};
use crate::entities::{Enemy, EnemyType};

/// Cumulative-bucket table, walked in order. `None` is an empty slot.
const SPAWN_TABLE: [(Option<EnemyType>, f32); 4] = [
    (Some(EnemyType::AtAt), 0.2),
    (Some(EnemyType::Fighter), 0.4),
    (Some(EnemyType::Asteroid), 0.3),
    (None, 0.1),
];

/// Picks the type for one spawn slot from a uniform draw in `[0, 1)`
pub fn enemy_type_for(draw: f32) -> Option<EnemyType> {
    let mut cap = 0.0;
    for (enemy_type, probability) in SPAWN_TABLE {
        cap += probability;
        if draw <= cap {
            return enemy_type;
        }
    }
    None
}

pub fn roll_enemy_type<R: Rng>(rng: &mut R) -> Option<EnemyType> {
    enemy_type_for(rng.random::<f32>())
}

/// Fills one row of slots starting at `first_x`. An empty slot takes no
/// room, so the enemies of a row always sit side by side.
fn fill_row<R: Rng>(rng: &mut R, first_x: f32, y: f32, enemies: &mut Vec<Enemy>) {
    let mut x = first_x;
    for _ in 0..ENEMY_ROW_SIZE {
        if let Some(enemy_type) = roll_enemy_type(rng) {
            enemies.push(Enemy::new(x, y, enemy_type));
            x += ENEMY_PITCH;
        }
    }
}

/// The opening block of rows, centered on the field
pub fn initial_wave<R: Rng>(rng: &mut R) -> Vec<Enemy> {
    let first_x = CANVAS_WIDTH / 2.0 - ROW_SPAN / 2.0 + SPRITE_RADIUS;
    let mut enemies = Vec::with_capacity(ENEMY_ROW_SIZE * ENEMY_COLUMN_SIZE);
    for row in 0..ENEMY_COLUMN_SIZE {
        let y = TOP_BOUNDARY + row as f32 * ENEMY_PITCH;
        fill_row(rng, first_x, y, &mut enemies);
    }
    enemies
}

/// A fresh row entering at the top-left corner
pub fn spawn_row<R: Rng>(rng: &mut R) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(ENEMY_ROW_SIZE);
    fill_row(rng, LEFT_BOUNDARY + SPRITE_RADIUS, TOP_BOUNDARY, &mut enemies);
    enemies
}
