//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Time only arrives as a `dt` argument
//! - Randomness only from the state's seeded RNG
//! - Obstacles are kept in spawn order
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit, obstacle_hitbox, player_hitbox};
pub use difficulty::{speed_mul, world_speed};
pub use obstacle::{Body, Obstacle, ObstacleKind};
pub use player::Player;
pub use spawner::{Spawner, advance_obstacles};
pub use state::{GameEvent, GameState, Intent, RunState};
pub use tick::{frame_dt, tick};
