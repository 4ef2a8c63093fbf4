//! The simulated game world and its per-frame update.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::collision;
use crate::constants::{ENEMY_SHOT_COOLDOWN, ENEMY_SPEED, MAX_PLAYER_LIVES, SHIP_SPEED, SHOT_SPEED};
use crate::entities::{Direction, Enemy, EnemyType, Formation, GameOver, Ship, Shot};
use crate::spawner;

/// What the player wants this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    /// Fire was pressed since the last frame
    pub fire: bool,
}

/// Things that happened during an update, for sound and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    PlayerFired,
    EnemyFired,
    EnemyDestroyed { enemy_type: EnemyType, points: u32 },
    ShipHit { lives_left: u8 },
    RowSpawned,
    GameOver(GameOver),
}

pub struct World {
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    pub shots: Vec<Shot>,
    pub score: u32,
    pub formation: Formation,
    /// Frames until the next enemy volley
    pub fire_cooldown: u32,
    outcome: Option<GameOver>,
    starting_lives: u8,
    rng: StdRng,
}

impl World {
    pub fn new(rng: StdRng, starting_lives: u8) -> Self {
        let mut world = Self {
            ship: Ship::new(starting_lives),
            enemies: Vec::new(),
            shots: Vec::new(),
            score: 0,
            formation: Formation::new(),
            fire_cooldown: ENEMY_SHOT_COOLDOWN,
            outcome: None,
            starting_lives,
            rng,
        };
        world.enemies = spawner::initial_wave(&mut world.rng);
        world
    }

    /// A world with a reproducible random stream
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), MAX_PLAYER_LIVES)
    }

    /// A world with no enemies, for driving scenarios by hand
    #[doc(hidden)]
    pub fn empty(seed: u64) -> Self {
        let mut world = Self::with_seed(seed);
        world.enemies.clear();
        world
    }

    pub fn outcome(&self) -> Option<GameOver> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Starts over with a fresh wave. The random stream carries on.
    pub fn restart(&mut self) {
        self.ship = Ship::new(self.starting_lives);
        self.shots.clear();
        self.score = 0;
        self.formation = Formation::new();
        self.fire_cooldown = ENEMY_SHOT_COOLDOWN;
        self.outcome = None;
        self.enemies = spawner::initial_wave(&mut self.rng);
        info!(enemies = self.enemies.len(), "world restarted");
    }

    /// Advances the world by `elapsed_ms` milliseconds
    pub fn update(&mut self, elapsed_ms: f32, intent: Intent) -> Vec<WorldEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }

        self.move_enemies(elapsed_ms, &mut events);
        self.move_shots(elapsed_ms);
        self.handle_intent(elapsed_ms, intent, &mut events);
        self.handle_enemy_fire(&mut events);
        self.handle_shot_collisions(&mut events);

        events
    }

    fn finish(&mut self, reason: GameOver, events: &mut Vec<WorldEvent>) {
        if self.outcome.is_none() {
            info!(?reason, score = self.score, "game over");
            self.outcome = Some(reason);
            events.push(WorldEvent::GameOver(reason));
        }
    }

    fn move_enemies(&mut self, elapsed_ms: f32, events: &mut Vec<WorldEvent>) {
        let distance = ENEMY_SPEED * elapsed_ms;
        let step = self.formation.advance(distance);

        if step.descending
            && let Some(front_y) = collision::front_row_y(&self.enemies)
            && collision::front_row_reached(front_y, self.ship.y)
        {
            self.finish(GameOver::Overrun, events);
        }

        if step.spawn_row {
            let row = spawner::spawn_row(&mut self.rng);
            debug!(spawned = row.len(), "new row entered");
            self.enemies.extend(row);
            events.push(WorldEvent::RowSpawned);
        }

        for enemy in &mut self.enemies {
            enemy.move_toward(step.direction, distance);
        }
    }

    fn move_shots(&mut self, elapsed_ms: f32) {
        let distance = SHOT_SPEED * elapsed_ms;
        for shot in &mut self.shots {
            shot.advance(distance);
        }
    }

    fn handle_intent(&mut self, elapsed_ms: f32, intent: Intent, events: &mut Vec<WorldEvent>) {
        if intent.fire {
            self.shots.extend(self.ship.fire());
            events.push(WorldEvent::PlayerFired);
        }

        let distance = SHIP_SPEED * elapsed_ms;
        if intent.left {
            self.ship.move_toward(Direction::Left, distance);
        }
        if intent.right {
            self.ship.move_toward(Direction::Right, distance);
        }
    }

    fn handle_enemy_fire(&mut self, events: &mut Vec<WorldEvent>) {
        if self.fire_cooldown != 0 {
            self.fire_cooldown -= 1;
            return;
        }

        for enemy in &self.enemies {
            // Every enemy draws, even ones that can never fire
            let draw: f32 = self.rng.random();
            if enemy.can_fire() && draw < enemy.enemy_type.fire_probability() {
                let (x, y) = enemy.muzzle();
                self.shots.push(Shot::new(x, y, Direction::Down));
                events.push(WorldEvent::EnemyFired);
            }
        }

        self.fire_cooldown = ENEMY_SHOT_COOLDOWN;
    }

    fn handle_shot_collisions(&mut self, events: &mut Vec<WorldEvent>) {
        let mut ship_destroyed = false;
        let Self {
            shots,
            enemies,
            ship,
            score,
            ..
        } = &mut *self;

        shots.retain(|shot| {
            if shot.from_player() {
                if let Some(idx) = collision::first_hit(shot, enemies.as_slice()) {
                    let enemy = enemies.remove(idx);
                    let points = enemy.get_points();
                    *score += points;
                    debug!(enemy = enemy.enemy_type.get_name(), points, "enemy destroyed");
                    events.push(WorldEvent::EnemyDestroyed {
                        enemy_type: enemy.enemy_type,
                        points,
                    });
                    return false;
                }
            } else if collision::has_collided(shot, ship.x, ship.y) {
                if ship.take_hit() {
                    ship_destroyed = true;
                } else {
                    info!(lives_left = ship.lives, "ship hit");
                    events.push(WorldEvent::ShipHit {
                        lives_left: ship.lives,
                    });
                }
                return false;
            }
            !shot.is_spent()
        });

        if ship_destroyed {
            self.finish(GameOver::ShipDestroyed, events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f32 = 16.0;

    #[test]
    fn test_new_world() {
        let world = World::with_seed(1);
        assert_eq!(world.score, 0);
        assert_eq!(world.ship.lives, 4);
        assert!(world.shots.is_empty());
        assert!(!world.enemies.is_empty());
        assert_eq!(world.fire_cooldown, 30);
        assert!(!world.is_over());
    }

    #[test]
    fn test_fire_adds_two_shots() {
        let mut world = World::empty(1);
        let events = world.update(
            0.0,
            Intent {
                fire: true,
                ..Intent::default()
            },
        );
        assert_eq!(world.shots.len(), 2);
        assert!(events.contains(&WorldEvent::PlayerFired));
    }

    #[test]
    fn test_ship_moves_with_intent() {
        let mut world = World::empty(1);
        world.update(
            100.0,
            Intent {
                left: true,
                ..Intent::default()
            },
        );
        assert_eq!(world.ship.x, 548.0);
        world.update(
            50.0,
            Intent {
                right: true,
                ..Intent::default()
            },
        );
        assert_eq!(world.ship.x, 558.0);
    }

    #[test]
    fn test_enemy_fire_waits_for_cooldown() {
        let mut world = World::with_seed(3);
        world.enemies = vec![Enemy::new(600.0, 200.0, EnemyType::Asteroid)];
        for _ in 0..30 {
            world.update(0.0, Intent::default());
        }
        assert_eq!(world.fire_cooldown, 0);
        world.update(0.0, Intent::default());
        assert_eq!(world.fire_cooldown, 30);
        // Asteroids never fire
        assert!(world.shots.is_empty());
    }

    #[test]
    fn test_enemy_volley_fires_down_from_muzzles() {
        let mut world = World::empty(21);
        world.enemies = (0..10)
            .map(|i| {
                let enemy_type = if i % 2 == 0 {
                    EnemyType::AtAt
                } else {
                    EnemyType::Fighter
                };
                Enemy::new(200.0 + i as f32 * 80.0, 200.0, enemy_type)
            })
            .collect();

        let mut fired = 0;
        for _ in 0..50 {
            world.fire_cooldown = 0;
            let events = world.update(0.0, Intent::default());
            fired += events.iter().filter(|e| **e == WorldEvent::EnemyFired).count();
            assert_eq!(world.fire_cooldown, 30);
        }

        assert!(fired > 0);
        assert_eq!(world.shots.len(), fired);
        for shot in &world.shots {
            assert_eq!(shot.direction, Direction::Down);
            assert_eq!(shot.y, 168.0);
            assert!(world.enemies.iter().any(|e| e.muzzle() == (shot.x, shot.y)));
        }
    }

    #[test]
    fn test_shot_destroys_enemy_and_scores() {
        let mut world = World::empty(1);
        world.enemies = vec![Enemy::new(400.0, 300.0, EnemyType::AtAt)];
        world.shots = vec![Shot::new(405.0, 305.0, Direction::Up)];
        let events = world.update(0.0, Intent::default());
        assert!(world.enemies.is_empty());
        assert!(world.shots.is_empty());
        assert_eq!(world.score, 200);
        assert!(events.contains(&WorldEvent::EnemyDestroyed {
            enemy_type: EnemyType::AtAt,
            points: 200
        }));
    }

    #[test]
    fn test_enemy_shot_costs_a_life() {
        let mut world = World::empty(1);
        world.shots = vec![Shot::new(world.ship.x, world.ship.y, Direction::Down)];
        let events = world.update(0.0, Intent::default());
        assert_eq!(world.ship.lives, 3);
        assert!(world.shots.is_empty());
        assert_eq!(events, vec![WorldEvent::ShipHit { lives_left: 3 }]);
    }

    #[test]
    fn test_spent_shots_removed() {
        let mut world = World::empty(1);
        world.shots = vec![
            Shot::new(300.0, 55.0, Direction::Up),
            Shot::new(300.0, 745.0, Direction::Down),
            Shot::new(300.0, 400.0, Direction::Up),
        ];
        world.update(FRAME_MS, Intent::default());
        assert_eq!(world.shots.len(), 1);
        assert_eq!(world.shots[0].y, 400.0 - 0.8 * FRAME_MS);
    }

    #[test]
    fn test_no_updates_after_game_over() {
        let mut world = World::empty(1);
        world.ship.lives = 0;
        world.shots = vec![Shot::new(world.ship.x, world.ship.y, Direction::Down)];
        let events = world.update(0.0, Intent::default());
        assert_eq!(events, vec![WorldEvent::GameOver(GameOver::ShipDestroyed)]);
        assert_eq!(world.outcome(), Some(GameOver::ShipDestroyed));

        let x = world.ship.x;
        let events = world.update(
            FRAME_MS,
            Intent {
                left: true,
                fire: true,
                right: false,
            },
        );
        assert!(events.is_empty());
        assert_eq!(world.ship.x, x);
    }

    #[test]
    fn test_restart_resets_state() {
        let mut world = World::with_seed(9);
        world.score = 1234;
        world.ship.lives = 0;
        world.shots.push(Shot::new(1.0, 1.0, Direction::Up));
        world.outcome = Some(GameOver::Overrun);
        world.restart();
        assert_eq!(world.score, 0);
        assert_eq!(world.ship.lives, 4);
        assert!(world.shots.is_empty());
        assert!(!world.is_over());
        assert_eq!(world.formation.direction, Direction::Right);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = World::with_seed(77);
        let mut b = World::with_seed(77);
        for frame in 0..600 {
            let intent = Intent {
                fire: frame % 20 == 0,
                left: frame % 200 < 100,
                right: frame % 200 >= 100,
            };
            assert_eq!(a.update(FRAME_MS, intent), b.update(FRAME_MS, intent));
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.shots, b.shots);
    }
}
