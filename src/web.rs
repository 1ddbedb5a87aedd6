//! Browser bindings
//!
//! A page's `requestAnimationFrame` callback calls `frame(now)` and draws from
//! `snapshot_json()`; key listeners forward `KeyboardEvent.code`. The best
//! score and the player's settings live in LocalStorage. With a nickname set
//! and auto-submit on, finished runs go to the leaderboard; the page has no
//! threads, so queued reports are handled at the end of each frame.

use std::sync::mpsc::{Receiver, channel};

use wasm_bindgen::prelude::*;

use crate::leaderboard::{
    CivilDate, InMemoryLeaderboard, ReportCommand, ReportStatus, ScoreReporter,
};
use crate::persistence::LocalStorageStore;
use crate::platform::{Key, KeyEvent};
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState};

/// The browser's local calendar day
fn local_today() -> CivilDate {
    let now = js_sys::Date::new_0();
    CivilDate::new(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

struct WebReporter {
    reporter: ScoreReporter<InMemoryLeaderboard>,
    commands: Receiver<ReportCommand>,
    status: Receiver<ReportStatus>,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // a second init (hot reload) just keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Dinoish loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore>,
    settings: Settings,
    reporter: Option<WebReporter>,
    /// Latest leaderboard message for the status line
    board_message: String,
}

#[wasm_bindgen]
impl WebGame {
    /// New idle game seeded from the wall clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        Self::with_seed(js_sys::Date::now())
    }

    pub fn with_seed(seed: f64) -> WebGame {
        let seed = seed.max(0.0) as u64;
        log::info!("Game initialized with seed: {}", seed);
        let mut game = WebGame {
            session: Session::new(GameState::new(seed), LocalStorageStore),
            settings: Settings::load(),
            reporter: None,
            board_message: String::new(),
        };
        game.connect_reporter();
        game
    }

    /// Store a new nickname and submit under it from now on
    pub fn set_player_name(&mut self, name: &str) {
        self.settings.set_player_name(name);
        self.settings.save();
        self.connect_reporter();
    }

    pub fn player_name(&self) -> String {
        self.settings.player_name.clone()
    }

    /// Leaderboard progress or error text; empty when there is nothing to say
    pub fn board_message(&self) -> String {
        self.board_message.clone()
    }

    pub fn key_down(&mut self, code: &str) {
        self.session.key(KeyEvent::Down(Key::from_code(code)));
    }

    pub fn key_up(&mut self, code: &str) {
        self.session.key(KeyEvent::Up(Key::from_code(code)));
    }

    /// Mouse button or touch start
    pub fn pointer_down(&mut self) {
        self.session.key(KeyEvent::Down(Key::Pointer));
    }

    /// Advance to the frame stamped `now_ms`; returns true if the run just ended
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let ended = self
            .session
            .frame(now_ms)
            .iter()
            .any(|event| matches!(event, GameEvent::ScoreFinalized { .. }));
        self.pump_reports();
        ended
    }

    /// Everything a renderer needs this frame, as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn best(&self) -> f64 {
        self.session.best() as f64
    }

    /// Storage problem worth showing the player, if any
    pub fn status(&self) -> Option<String> {
        self.session.status().map(str::to_string)
    }
}

impl WebGame {
    fn connect_reporter(&mut self) {
        self.reporter = self
            .settings
            .reporter(InMemoryLeaderboard::new())
            .map(|(reporter, status)| {
                let (tx, commands) = channel();
                self.session.attach_reporter(tx);
                WebReporter {
                    reporter: reporter.with_today(local_today),
                    commands,
                    status,
                }
            });
    }

    fn pump_reports(&mut self) {
        if let Some(web) = &mut self.reporter {
            web.reporter.drain(&web.commands);
            for status in web.status.try_iter() {
                self.board_message = status.message();
            }
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
