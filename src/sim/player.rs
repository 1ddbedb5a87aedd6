//! Player body and vertical physics

use serde::Serialize;

use crate::consts::*;

/// The runner. `y` is the feet anchor; y grows downward so `GROUND_Y` is a floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Nominal (standing) width
    pub w: f32,
    /// Nominal (standing) height
    pub h: f32,
    /// Vertical velocity, negative is up (px/s)
    pub vy: f32,
    pub on_ground: bool,
    pub ducking: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y,
            w: PLAYER_W,
            h: PLAYER_H,
            vy: 0.0,
            on_ground: true,
            ducking: false,
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the player back on the ground, standing
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Leave the ground. Returns false (and does nothing) while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = -JUMP_V0;
        self.on_ground = false;
        true
    }

    /// Downward acceleration for the current pose (px/s²)
    pub fn gravity(&self) -> f32 {
        if self.ducking && !self.on_ground {
            GRAVITY + FAST_FALL
        } else {
            GRAVITY
        }
    }

    /// Semi-implicit Euler step followed by the ground clamp.
    ///
    /// The clamp only catches a player moving down (or already below the
    /// floor), so a jump taken this frame survives a zero-length step.
    /// Returns true if this step brought the player back onto the ground.
    pub fn integrate(&mut self, dt: f32) -> bool {
        let was_airborne = !self.on_ground;

        self.vy += self.gravity() * dt;
        self.y += self.vy * dt;

        if self.y > GROUND_Y || (self.y >= GROUND_Y && self.vy >= 0.0) {
            self.y = GROUND_Y;
            self.vy = 0.0;
            self.on_ground = true;
        }

        was_airborne && self.on_ground
    }

    /// Body size as drawn and as used for the hitbox: (width, height)
    pub fn body_size(&self) -> (f32, f32) {
        if self.ducking {
            (self.w + DUCK_EXTRA_W, (self.h * DUCK_HEIGHT_FACTOR).floor())
        } else {
            (self.w, self.h)
        }
    }

    /// Two-frame leg cycle for the running animation, derived from render time
    pub fn stride(&self, time_ms: f64) -> bool {
        self.on_ground && (time_ms / 1000.0 * 18.0).sin() > 0.0
    }
}
