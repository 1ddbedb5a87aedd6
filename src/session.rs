//! Host-side loop controller
//!
//! A `Session` wraps the simulation with the things a real host needs: turning
//! frame timestamps into `dt`, reading and writing the best score, forwarding
//! finished runs to a score reporter, and producing render snapshots.

use std::sync::mpsc::Sender;

use serde::Serialize;

use crate::leaderboard::ReportCommand;
use crate::persistence::ScoreStore;
use crate::platform::{KeyEvent, map_key};
use crate::sim::{GameEvent, GameState, Intent, Obstacle, Player, RunState, frame_dt, tick};

/// Read-only view handed to a renderer each frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub run_state: RunState,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub time_ms: f64,
    pub score: u64,
    pub best: u64,
    pub speed_mul: f32,
}

/// One game plus its best-score store and optional score reporter
pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
    best: u64,
    /// Timestamp of the previous simulated frame; None until the first frame of a run
    prev_ms: Option<f64>,
    reports: Option<Sender<ReportCommand>>,
    status: Option<String>,
}

impl<S: ScoreStore> Session<S> {
    /// Start a session, reading the best score. An unreadable store counts as 0.
    pub fn new(state: GameState, store: S) -> Self {
        let mut status = None;
        let best = store.read_best().unwrap_or_else(|err| {
            log::warn!("Could not read best score: {}", err);
            status = Some(format!("Best score unavailable: {err}"));
            0
        });
        Self {
            state,
            store,
            best,
            prev_ms: None,
            reports: None,
            status,
        }
    }

    /// Send each finalized score to a reporter
    pub fn with_reporter(mut self, reports: Sender<ReportCommand>) -> Self {
        self.attach_reporter(reports);
        self
    }

    /// Replace the reporter channel, e.g. after the nickname changes
    pub fn attach_reporter(&mut self, reports: Sender<ReportCommand>) {
        self.reports = Some(reports);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that inject obstacles or tweak timers
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Latest advisory message from storage, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Apply a logical intent
    pub fn apply(&mut self, intent: Intent) -> Vec<GameEvent> {
        let events = self.state.apply(intent);
        if events.contains(&GameEvent::RunStarted) {
            // the first frame of a run integrates nothing
            self.prev_ms = None;
        }
        events
    }

    /// Apply a raw key/pointer event through the default key map
    pub fn key(&mut self, event: KeyEvent) -> Vec<GameEvent> {
        match map_key(event, self.state.phase) {
            Some(intent) => self.apply(intent),
            None => Vec::new(),
        }
    }

    /// Advance one display frame stamped `now_ms`.
    ///
    /// Outside `Running` this only moves the render clock.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        self.state.time_ms = now_ms;
        if self.state.phase != RunState::Running {
            self.prev_ms = None;
            return Vec::new();
        }

        let dt = self.prev_ms.map_or(0.0, |prev| frame_dt(prev, now_ms));
        self.prev_ms = Some(now_ms);

        let events = tick(&mut self.state, dt);
        for event in &events {
            if let GameEvent::ScoreFinalized { score } = event {
                self.record_final(*score);
            }
        }
        events
    }

    fn record_final(&mut self, score: u64) {
        if score > self.best {
            self.best = score;
            log::info!("New best score: {}", score);
            match self.store.write_best(score) {
                Ok(()) => self.status = None,
                Err(err) => {
                    log::warn!("Could not save best score: {}", err);
                    self.status = Some(format!("Best score not saved: {err}"));
                }
            }
        }

        if let Some(reports) = &self.reports {
            if reports.send(ReportCommand::Submit { score }).is_err() {
                log::warn!("Score reporter is gone; dropping score {}", score);
                self.reports = None;
            }
        }
    }

    /// Current frame for a renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            run_state: self.state.phase,
            player: &self.state.player,
            obstacles: &self.state.obstacles,
            time_ms: self.state.time_ms,
            score: self.state.display_score(),
            best: self.best,
            speed_mul: self.state.speed_mul,
        }
    }
}
