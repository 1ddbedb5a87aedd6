//! Run state and the simulation context
//!
//! `GameState` owns everything a run mutates: the player, the obstacle set,
//! the spawner, score and the RNG. Input intents are applied here; time is
//! advanced by `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use super::spawner::Spawner;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RunState {
    /// Waiting for the first jump; nothing is simulated
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; only a restart leaves this state
    GameOver,
}

/// Logical player intents, already decoupled from keys and pointers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Jump,
    Duck(bool),
    Start,
    Restart,
}

/// Things that happened during a tick or an intent
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Entered `Running` (first jump, start, or restart)
    RunStarted,
    Jumped,
    Landed,
    ObstacleSpawned { kind: ObstacleKind },
    /// The run ended by touching an obstacle; `score` is the final integer score
    ScoreFinalized { score: u64 },
}

/// Complete simulation context for one process
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: RunState,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Cumulative score; fractional, shown floored
    pub score: f64,
    /// Derived from `score` every frame
    pub speed_mul: f32,
    pub spawner: Spawner,
    /// Floored score captured when the run ended
    pub final_score: u64,
    /// Render clock (ms), drives animation phases only
    pub time_ms: f64,
    seed: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle game whose spawns are drawn from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            phase: RunState::Idle,
            player: Player::new(),
            obstacles: Vec::new(),
            score: 0.0,
            speed_mul: 1.0,
            spawner: Spawner::new(),
            final_score: 0,
            time_ms: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split borrow used by `tick`: the spawner appends to obstacles using the RNG
    pub(crate) fn spawn_parts(&mut self) -> (&mut Spawner, &mut Vec<Obstacle>, &mut Pcg32) {
        (&mut self.spawner, &mut self.obstacles, &mut self.rng)
    }

    /// Floored score as displayed
    pub fn display_score(&self) -> u64 {
        match self.phase {
            RunState::GameOver => self.final_score,
            _ => self.score.max(0.0) as u64,
        }
    }

    /// Clear the run back to `Idle`. The RNG keeps its stream.
    pub fn reset(&mut self) {
        self.phase = RunState::Idle;
        self.player.reset();
        self.obstacles.clear();
        self.score = 0.0;
        self.speed_mul = 1.0;
        self.spawner.reset();
        self.final_score = 0;
    }

    /// Idle -> Running. Ignored in any other state.
    pub fn start(&mut self) -> bool {
        if self.phase != RunState::Idle {
            return false;
        }
        self.phase = RunState::Running;
        log::info!("Run started");
        true
    }

    /// Reinitialize everything and start a fresh run, from any state
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Jump if grounded. Starts the run from `Idle`; ignored after game over.
    pub fn jump(&mut self) -> bool {
        self.start();
        if self.phase != RunState::Running {
            return false;
        }
        self.player.jump()
    }

    /// Duck on/off; only while running
    pub fn set_duck(&mut self, on: bool) {
        if self.phase == RunState::Running {
            self.player.ducking = on;
        }
    }

    /// Apply an intent, reporting what it changed
    pub fn apply(&mut self, intent: Intent) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let was_running = self.phase == RunState::Running;
        match intent {
            Intent::Jump => {
                if self.jump() {
                    events.push(GameEvent::Jumped);
                }
            }
            Intent::Duck(on) => self.set_duck(on),
            Intent::Start => {
                self.start();
            }
            Intent::Restart => {
                self.restart();
                // a restart always begins a new run, even from Running
                events.push(GameEvent::RunStarted);
            }
        }
        if !was_running && self.phase == RunState::Running && intent != Intent::Restart {
            events.insert(0, GameEvent::RunStarted);
        }
        events
    }

    /// Running -> GameOver, capturing the floored score
    pub(crate) fn finish(&mut self) -> u64 {
        self.final_score = self.score.max(0.0) as u64;
        self.phase = RunState::GameOver;
        log::info!("Game over, score {}", self.final_score);
        self.final_score
    }
}
