mod direction;
mod enemy;
mod formation;
mod game_state;
mod ship;
mod shot;

// Re-export all public types
pub use direction::Direction;
pub use enemy::{Enemy, EnemyType};
pub use formation::{Formation, SweepStep};
pub use game_state::{GameOver, GameState};
pub use ship::Ship;
pub use shot::Shot;
