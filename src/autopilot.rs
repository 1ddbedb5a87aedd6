//! Rule-based bot for headless runs
//!
//! Looks only at the current `GameState` and answers with intents, exactly
//! like a player pressing keys. Jumps when a ground threat comes within a
//! speed-scaled lead distance and fast-falls once it is behind.

use crate::sim::{
    GameState, Intent, Player, Rect, RunState, obstacle_hitbox, player_hitbox, world_speed,
};

/// Seconds of warning before an obstacle reaches the player
pub const DEFAULT_LEAD_S: f32 = 0.15;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Time-to-contact at which to jump (s)
    pub lead_s: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lead_s: DEFAULT_LEAD_S,
        }
    }
}

impl Autopilot {
    pub fn new(lead_s: f32) -> Self {
        Self { lead_s }
    }

    /// Intents for this frame; empty when nothing needs doing
    pub fn next_intents(&self, state: &GameState) -> Vec<Intent> {
        let mut intents = Vec::new();
        if state.phase != RunState::Running {
            return intents;
        }

        let player = &state.player;
        let hitbox = player_hitbox(player);
        let standing = player_hitbox(&Player::new());

        // hitboxes that would touch a player standing on the ground
        let threats: Vec<Rect> = state
            .obstacles
            .iter()
            .map(obstacle_hitbox)
            .filter(|rect| rect.min.y < standing.max().y && rect.max().y > standing.min.y)
            .collect();

        if player.on_ground {
            if player.ducking {
                intents.push(Intent::Duck(false));
            }
            let lead = world_speed(state.speed_mul) * self.lead_s;
            let gap = threats
                .iter()
                .filter(|rect| rect.max().x > hitbox.min.x)
                .map(|rect| rect.min.x - hitbox.max().x)
                .fold(f32::INFINITY, f32::min);
            if gap <= lead {
                intents.push(Intent::Jump);
            }
        } else if player.vy > 0.0 {
            let overhead = threats
                .iter()
                .any(|rect| rect.max().x > hitbox.min.x && rect.min.x < hitbox.max().x);
            if overhead == player.ducking {
                intents.push(Intent::Duck(!overhead));
            }
        }

        intents
    }
}
