//! Collision detection between the player and obstacles
//!
//! Everything collides through inset axis-aligned hitboxes, smaller than the
//! drawn bodies. Coordinates are y-down and each hitbox's top edge is
//! `bottom - height + pad`.

use glam::Vec2;
use serde::Serialize;

use super::obstacle::Obstacle;
use super::player::Player;
use crate::consts::{BIRD_HITBOX_PAD, CACTUS_HITBOX_PAD, PLAYER_HITBOX_PAD};

/// Axis-aligned rectangle: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Negative extents are clamped to zero
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w.max(0.0), h.max(0.0)),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test; rectangles that only share an edge don't overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Shrink a body whose bottom edge sits at `bottom` by `pad` on every side
fn inset(x: f32, bottom: f32, w: f32, h: f32, pad: f32) -> Rect {
    Rect::new(x + pad, bottom - h + pad, w - pad * 2.0, h - pad * 2.0)
}

/// Player hitbox; ducking widens and flattens the body before the inset
pub fn player_hitbox(player: &Player) -> Rect {
    let (w, h) = player.body_size();
    inset(player.x, player.y, w, h, PLAYER_HITBOX_PAD)
}

/// Obstacle hitbox. Cacti get the smaller inset, so they are stricter to clear.
pub fn obstacle_hitbox(obstacle: &Obstacle) -> Rect {
    let pad = match obstacle {
        Obstacle::Bird(_) => BIRD_HITBOX_PAD,
        Obstacle::Cactus(_) => CACTUS_HITBOX_PAD,
    };
    let body = obstacle.body();
    inset(body.x, body.y, body.w, body.h, pad)
}

/// Index of the first obstacle (in spawn order) touching the player, if any
pub fn first_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let hitbox = player_hitbox(player);
    obstacles
        .iter()
        .position(|obstacle| hitbox.overlaps(&obstacle_hitbox(obstacle)))
}
