//! Obstacle entities

use serde::Serialize;

use crate::consts::*;

/// Position and size of an obstacle. `y` is the bottom edge (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Obstacle kinds, without their geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Cactus,
    Bird,
}

/// An obstacle. Kind and size are fixed for its whole lifetime; only `x` moves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Obstacle {
    /// Ground-anchored
    Cactus(Body),
    /// Airborne at one of two fixed altitude bands
    Bird(Body),
}

impl Obstacle {
    pub fn short_cactus(x: f32) -> Self {
        let (w, h) = CACTUS_SHORT;
        Obstacle::Cactus(Body { x, y: GROUND_Y, w, h })
    }

    pub fn tall_cactus(x: f32) -> Self {
        let (w, h) = CACTUS_TALL;
        Obstacle::Cactus(Body { x, y: GROUND_Y, w, h })
    }

    /// Bird in the low band (`high == false`) or the high band
    pub fn bird(x: f32, high: bool) -> Self {
        let y = if high { BIRD_HIGH_Y } else { BIRD_LOW_Y };
        Obstacle::Bird(Body {
            x,
            y,
            w: BIRD_W,
            h: BIRD_H,
        })
    }

    #[inline]
    pub fn body(&self) -> &Body {
        match self {
            Obstacle::Cactus(body) | Obstacle::Bird(body) => body,
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Cactus(_) => ObstacleKind::Cactus,
            Obstacle::Bird(_) => ObstacleKind::Bird,
        }
    }

    /// Scroll left by `dx` pixels
    pub fn shift_left(&mut self, dx: f32) {
        match self {
            Obstacle::Cactus(body) | Obstacle::Bird(body) => body.x -= dx,
        }
    }

    /// True once the right edge has passed the despawn line
    pub fn is_offscreen(&self) -> bool {
        let body = self.body();
        body.x + body.w <= DESPAWN_X
    }

    /// Wing phase for birds, derived from render time. Always false for cacti.
    pub fn wings_up(&self, time_ms: f64) -> bool {
        matches!(self, Obstacle::Bird(_)) && (time_ms / 1000.0 * 16.0).sin() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let tall = Obstacle::tall_cactus(500.0);
        assert_eq!(tall.kind(), ObstacleKind::Cactus);
        assert_eq!((tall.body().w, tall.body().h), (18.0, 48.0));
        assert_eq!(tall.body().y, GROUND_Y);

        let bird = Obstacle::bird(500.0, true);
        assert_eq!(bird.kind(), ObstacleKind::Bird);
        assert_eq!(bird.body().y, GROUND_Y - 90.0);
        assert_eq!(Obstacle::bird(0.0, false).body().y, GROUND_Y - 56.0);
    }

    #[test]
    fn test_offscreen_boundary() {
        // right edge at exactly -40 is gone
        let mut cactus = Obstacle::short_cactus(-54.0);
        assert!(cactus.is_offscreen());
        cactus = Obstacle::short_cactus(-53.5);
        assert!(!cactus.is_offscreen());
        cactus.shift_left(0.5);
        assert!(cactus.is_offscreen());
    }

    #[test]
    fn test_cactus_never_flaps() {
        let cactus = Obstacle::short_cactus(0.0);
        assert!(!cactus.wings_up(50.0));
        let bird = Obstacle::bird(0.0, false);
        // sin(0.05 * 16) > 0, sin(0.25 * 16) < 0
        assert!(bird.wings_up(50.0));
        assert!(!bird.wings_up(250.0));
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(Obstacle::bird(10.0, false)).unwrap();
        assert_eq!(json["kind"], "bird");
        assert_eq!(json["w"], 44.0);
    }
}
