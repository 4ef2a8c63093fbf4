// Library exports for testing
pub use config::{Cli, Settings};
pub use entities::{Direction, Enemy, EnemyType, Formation, GameOver, GameState, Ship, Shot, SweepStep};
pub use world::{Intent, World, WorldEvent};

pub mod app;
pub mod audio;
pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod spawner;
pub mod world;
