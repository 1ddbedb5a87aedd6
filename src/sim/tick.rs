//! Per-frame simulation step
//!
//! Variable timestep: each frame integrates its own clamped `dt` once.

use super::collision;
use super::difficulty;
use super::spawner::advance_obstacles;
use super::state::{GameEvent, GameState, RunState};
use crate::consts::{MAX_DT, SCORE_RATE};

/// Seconds between two frame timestamps (ms), clamped to `[0, MAX_DT]`.
///
/// Stalled frames (tab switches, debugger pauses) degrade to a slow frame
/// rather than a long jump that could tunnel through obstacles.
pub fn frame_dt(prev_ms: f64, now_ms: f64) -> f32 {
    clamp_dt(((now_ms - prev_ms) / 1000.0) as f32)
}

#[inline]
fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_DT) }
}

/// Advance a running game by one frame. Does nothing outside `Running`.
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != RunState::Running {
        return events;
    }
    let dt = clamp_dt(dt);

    // Score first, then difficulty from the new score
    state.score += dt as f64 * SCORE_RATE * state.speed_mul as f64;
    state.speed_mul = difficulty::speed_mul(state.score);

    if state.player.integrate(dt) {
        log::debug!("Landed at score {:.0}", state.score);
        events.push(GameEvent::Landed);
    }

    let speed_mul = state.speed_mul;
    let (spawner, obstacles, rng) = state.spawn_parts();
    if let Some(kind) = spawner.update(dt, speed_mul, obstacles, rng) {
        events.push(GameEvent::ObstacleSpawned { kind });
    }

    advance_obstacles(&mut state.obstacles, difficulty::world_speed(speed_mul), dt);

    if let Some(index) = collision::first_hit(&state.player, &state.obstacles) {
        log::debug!("Hit {:?}", state.obstacles[index].kind());
        let score = state.finish();
        events.push(GameEvent::ScoreFinalized { score });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacle::Obstacle;
    use crate::sim::state::Intent;

    /// A running game that never spawns on its own
    fn quiet_run() -> GameState {
        let mut state = GameState::new(42);
        state.apply(Intent::Jump);
        state.spawner.next_spawn_in = f32::INFINITY;
        state
    }

    #[test]
    fn test_frame_dt_clamps() {
        assert!((frame_dt(1000.0, 1016.0) - 0.016).abs() < 1e-6);
        assert_eq!(frame_dt(1000.0, 5000.0), MAX_DT);
        assert_eq!(frame_dt(1000.0, 900.0), 0.0);
        assert_eq!(frame_dt(f64::NAN, 900.0), 0.0);
    }

    #[test]
    fn test_idle_and_game_over_do_not_simulate() {
        let mut state = GameState::new(1);
        assert!(tick(&mut state, MAX_DT).is_empty());
        assert_eq!(state.score, 0.0);

        state.start();
        state.finish();
        let before = state.clone();
        assert!(tick(&mut state, MAX_DT).is_empty());
        assert_eq!(state.score, before.score);
        assert_eq!(state.player, before.player);
    }

    #[test]
    fn test_twelve_seconds_of_stalled_frames() {
        let mut state = quiet_run();
        assert_eq!(state.phase, RunState::Running);

        // every 0.5s frame is clamped to MAX_DT, so cover 12s at that rate
        let frames = (12.0 / MAX_DT).ceil() as usize;
        let mut last_score = state.score;
        let mut landed = false;
        for _ in 0..frames {
            let events = tick(&mut state, 0.5);
            landed |= events.contains(&GameEvent::Landed);
            assert_eq!(state.phase, RunState::Running);
            assert!(state.score > last_score);
            last_score = state.score;
        }
        // speed_mul >= 1 and only reaches ~1.2 by the end
        let expected = frames as f64 * MAX_DT as f64 * SCORE_RATE;
        assert!(state.score >= expected);
        assert!(state.score < expected * 1.15);
        assert!(landed);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_collision_ends_run_on_that_frame() {
        let mut state = quiet_run();
        for _ in 0..10 {
            tick(&mut state, 0.016);
        }
        // wait until the opening jump has landed
        while !state.player.on_ground {
            tick(&mut state, 0.016);
        }
        assert_eq!(state.phase, RunState::Running);

        state.obstacles.push(Obstacle::short_cactus(140.0));
        let score_before = state.score;
        let events = tick(&mut state, 0.016);

        assert_eq!(state.phase, RunState::GameOver);
        assert!(state.score > score_before);
        assert_eq!(state.final_score, state.score as u64);
        assert_eq!(
            events.last(),
            Some(&GameEvent::ScoreFinalized {
                score: state.final_score
            })
        );

        // frozen afterwards
        let frozen = state.score;
        assert!(tick(&mut state, 0.016).is_empty());
        assert_eq!(state.score, frozen);
    }

    #[test]
    fn test_speed_tracks_score() {
        let mut state = quiet_run();
        state.score = 1200.0 / 0.18;
        tick(&mut state, 0.0);
        assert!((state.speed_mul - 2.0).abs() < 1e-4);

        let x = 600.0;
        state.obstacles.push(Obstacle::bird(x, true));
        tick(&mut state, 0.01);
        let moved = x - state.obstacles[0].body().x;
        assert!((moved - BASE_SPEED * state.speed_mul * 0.01).abs() < 1e-2);
    }

    #[test]
    fn test_spawns_arrive_and_scroll_off() {
        let mut state = GameState::new(9);
        state.start();
        let mut spawned = 0;
        // the runner stands still, so keep the lane clear of its hitbox by
        // dropping obstacles before they reach it
        for _ in 0..3_000 {
            let events = tick(&mut state, 0.016);
            spawned += events
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
                .count();
            state.obstacles.retain(|o| o.body().x > 200.0);
            assert_eq!(state.phase, RunState::Running);
        }
        assert!(spawned > 10);
    }

    #[test]
    fn test_ground_invariant_holds_every_frame() {
        let mut state = quiet_run();
        for i in 0..600 {
            if i % 50 == 0 {
                state.apply(Intent::Jump);
            }
            state.apply(Intent::Duck(i % 70 > 40));
            tick(&mut state, 0.016 + (i % 3) as f32 * 0.008);
            let p = &state.player;
            assert!(p.y <= GROUND_Y);
            assert_eq!(p.on_ground, p.y == GROUND_Y && p.vy == 0.0);
        }
    }
}
