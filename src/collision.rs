//! Circle collision checks.

use crate::constants::{SPRITE_COLLISION_RADIUS, SPRITE_SIZE};
use crate::entities::{Enemy, Shot};

/// True when the shot lies strictly inside the collision circle around `(x, y)`
pub fn has_collided(shot: &Shot, x: f32, y: f32) -> bool {
    let dx = x - shot.x;
    let dy = y - shot.y;
    // Squared distance avoids the sqrt
    dx * dx + dy * dy < SPRITE_COLLISION_RADIUS * SPRITE_COLLISION_RADIUS
}

/// Index of the first enemy the shot hits, in enemy order
pub fn first_hit(shot: &Shot, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| has_collided(shot, e.x, e.y))
}

/// Center y of the enemy nearest the ship
pub fn front_row_y(enemies: &[Enemy]) -> Option<f32> {
    enemies.iter().map(|e| e.y).reduce(f32::max)
}

/// The front row has reached the ship once its sprite overlaps the ship's center line
pub fn front_row_reached(front_y: f32, ship_y: f32) -> bool {
    front_y + SPRITE_SIZE > ship_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Direction, EnemyType};

    #[test]
    fn test_collision_inside_radius() {
        let shot = Shot::new(100.0, 100.0, Direction::Up);
        assert!(has_collided(&shot, 100.0, 100.0));
        assert!(has_collided(&shot, 110.0, 110.0));
        assert!(has_collided(&shot, 123.9, 100.0));
    }

    #[test]
    fn test_no_collision_on_or_past_radius() {
        let shot = Shot::new(100.0, 100.0, Direction::Up);
        assert!(!has_collided(&shot, 124.0, 100.0));
        assert!(!has_collided(&shot, 100.0, 76.0));
        assert!(!has_collided(&shot, 120.0, 120.0));
    }

    #[test]
    fn test_first_hit_prefers_earliest_enemy() {
        let enemies = vec![
            Enemy::new(300.0, 100.0, EnemyType::Fighter),
            Enemy::new(100.0, 100.0, EnemyType::AtAt),
            Enemy::new(110.0, 100.0, EnemyType::Asteroid),
        ];
        let shot = Shot::new(105.0, 100.0, Direction::Up);
        assert_eq!(first_hit(&shot, &enemies), Some(1));

        let miss = Shot::new(700.0, 100.0, Direction::Up);
        assert_eq!(first_hit(&miss, &enemies), None);
    }

    #[test]
    fn test_front_row() {
        assert_eq!(front_row_y(&[]), None);
        let enemies = vec![
            Enemy::new(100.0, 50.0, EnemyType::Fighter),
            Enemy::new(100.0, 322.0, EnemyType::AtAt),
            Enemy::new(100.0, 118.0, EnemyType::Asteroid),
        ];
        assert_eq!(front_row_y(&enemies), Some(322.0));

        assert!(!front_row_reached(654.0, 718.0));
        assert!(front_row_reached(655.0, 718.0));
    }
}
