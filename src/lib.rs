//! Dinoish - a side-scrolling jump-and-duck runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, spawning, difficulty, collisions, run state)
//! - `session`: Host-side loop controller (frame clock, best score, score reporting)
//! - `platform`: Tick sources and key-to-intent mapping
//! - `persistence`: Best-score storage
//! - `leaderboard`: Period-bucketed leaderboard collaborator
//! - `autopilot`: Rule-based bot used by the headless runner
//! - `web`: Browser bindings (wasm32 only)

pub mod autopilot;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use session::{Session, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation will integrate (≈30 fps floor)
    pub const MAX_DT: f32 = 0.033;

    /// Visible field width; obstacles spawn just past this edge
    pub const FIELD_WIDTH: f32 = 900.0;
    /// Baseline the player's feet rest on (y grows downward)
    pub const GROUND_Y: f32 = 205.0;
    /// Obstacles are dropped once their right edge passes this x
    pub const DESPAWN_X: f32 = -40.0;

    /// Player physics (px/s², px/s)
    pub const GRAVITY: f32 = 2400.0;
    pub const FAST_FALL: f32 = 3600.0;
    pub const JUMP_V0: f32 = 760.0;

    /// Player body
    pub const PLAYER_X: f32 = 120.0;
    pub const PLAYER_W: f32 = 34.0;
    pub const PLAYER_H: f32 = 40.0;
    /// Ducking widens the body and squashes it to this fraction of its height
    pub const DUCK_EXTRA_W: f32 = 6.0;
    pub const DUCK_HEIGHT_FACTOR: f32 = 0.62;

    /// Hitbox insets per side
    pub const PLAYER_HITBOX_PAD: f32 = 6.0;
    pub const BIRD_HITBOX_PAD: f32 = 6.0;
    pub const CACTUS_HITBOX_PAD: f32 = 2.0;

    /// Obstacle bodies
    pub const BIRD_W: f32 = 44.0;
    pub const BIRD_H: f32 = 26.0;
    pub const BIRD_LOW_Y: f32 = GROUND_Y - 56.0;
    pub const BIRD_HIGH_Y: f32 = GROUND_Y - 90.0;
    pub const CACTUS_SHORT: (f32, f32) = (14.0, 34.0);
    pub const CACTUS_TALL: (f32, f32) = (18.0, 48.0);

    /// World scroll speed at speed multiplier 1 (px/s)
    pub const BASE_SPEED: f32 = 360.0;
    /// Score gained per second at speed multiplier 1
    pub const SCORE_RATE: f64 = 100.0;
    pub const SPEED_MUL_MAX: f32 = 3.25;

    /// Spawning
    pub const SPAWN_SPACING: f32 = 240.0;
    pub const FIRST_SPAWN_DELAY: f32 = 0.85;
    pub const CLUSTER_CHANCE: f64 = 0.22;
}
