//! Procedural obstacle spawning and the per-frame scroll/prune pass

use rand::Rng;
use serde::Serialize;

use super::difficulty;
use super::obstacle::{Obstacle, ObstacleKind};
use crate::consts::*;

/// Spawn timer state for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spawner {
    /// Seconds since the last spawn attempt
    pub timer: f32,
    /// Seconds between the last successful spawn and the next attempt
    pub next_spawn_in: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            timer: 0.0,
            next_spawn_in: FIRST_SPAWN_DELAY,
        }
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the timer and attempt a spawn when it fires.
    ///
    /// Returns the kind of the leading obstacle if anything was appended.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        speed_mul: f32,
        obstacles: &mut Vec<Obstacle>,
        rng: &mut R,
    ) -> Option<ObstacleKind> {
        self.timer += dt;
        if self.timer < self.next_spawn_in {
            return None;
        }
        self.timer = 0.0;
        self.spawn(speed_mul, obstacles, rng)
    }

    /// One spawn attempt. A refused attempt keeps the current interval.
    pub fn spawn<R: Rng>(
        &mut self,
        speed_mul: f32,
        obstacles: &mut Vec<Obstacle>,
        rng: &mut R,
    ) -> Option<ObstacleKind> {
        if !has_room(obstacles) {
            return None;
        }

        let is_bird = rng.random::<f32>() < difficulty::bird_chance(speed_mul);
        let kind = if is_bird {
            let high = rng.random_bool(0.5);
            obstacles.push(Obstacle::bird(FIELD_WIDTH + rng.random_range(10.0..80.0), high));
            ObstacleKind::Bird
        } else {
            let tall = rng.random::<f32>() < difficulty::tall_chance(speed_mul);
            let x = FIELD_WIDTH + rng.random_range(10.0..80.0);
            obstacles.push(if tall {
                Obstacle::tall_cactus(x)
            } else {
                Obstacle::short_cactus(x)
            });
            // clusters only ever add a short one
            if rng.random_bool(CLUSTER_CHANCE) {
                obstacles.push(Obstacle::short_cactus(
                    FIELD_WIDTH + rng.random_range(90.0..160.0),
                ));
            }
            ObstacleKind::Cactus
        };

        let jitter = rng.random_range(0.75..1.25);
        self.next_spawn_in = difficulty::spawn_interval(speed_mul, jitter);

        log::debug!(
            "Spawned {:?} (speed x{:.2}), next in {:.2}s",
            kind,
            speed_mul,
            self.next_spawn_in
        );
        Some(kind)
    }
}

/// Spacing guard: the newest obstacle must have cleared `SPAWN_SPACING` from the right edge
fn has_room(obstacles: &[Obstacle]) -> bool {
    obstacles
        .last()
        .is_none_or(|last| last.body().x < FIELD_WIDTH - SPAWN_SPACING)
}

/// Scroll every obstacle left and drop the ones that left the field
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, world_speed: f32, dt: f32) {
    let dx = world_speed * dt;
    for obstacle in obstacles.iter_mut() {
        obstacle.shift_left(dx);
    }
    obstacles.retain(|o| !o.is_offscreen());
}
