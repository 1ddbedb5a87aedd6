//! Score reporter: drains finished scores into a leaderboard service
//!
//! The game loop only ever sends on a channel. Everything slow (network,
//! retries) happens on the reporter's side, and results come back as status
//! messages that never touch the simulation.

use std::sync::mpsc::{Receiver, Sender, channel};

use super::{
    CivilDate, LeaderboardEntry, LeaderboardError, LeaderboardService, PeriodKind, Submission,
    period_start, sanitize_name,
};

/// Work for the reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportCommand {
    /// Submit a finished run's score under the configured name
    Submit { score: u64 },
    /// Reload the top list for the configured period
    Refresh,
}

/// Progress and results, meant for a status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    Submitting,
    Submitted,
    Loading,
    Loaded(Vec<LeaderboardEntry>),
    Failed(String),
}

impl ReportStatus {
    /// Short human-readable message; empty once a board is loaded
    pub fn message(&self) -> String {
        match self {
            ReportStatus::Submitting => "Submitting score...".to_string(),
            ReportStatus::Submitted => "Score submitted!".to_string(),
            ReportStatus::Loading => "Loading leaderboard...".to_string(),
            ReportStatus::Loaded(_) => String::new(),
            ReportStatus::Failed(msg) => msg.clone(),
        }
    }
}

/// Owns the service and the player's identity for submissions
pub struct ScoreReporter<S> {
    service: S,
    name: String,
    period: PeriodKind,
    today: Box<dyn Fn() -> CivilDate + Send>,
    status: Sender<ReportStatus>,
}

impl<S: LeaderboardService> ScoreReporter<S> {
    /// Build a reporter and the channel its statuses arrive on.
    /// Dates come from the UTC clock until `with_today` overrides it.
    pub fn new(service: S, name: &str, period: PeriodKind) -> (Self, Receiver<ReportStatus>) {
        let (status, status_rx) = channel();
        let reporter = Self {
            service,
            name: sanitize_name(name),
            period,
            today: Box::new(CivilDate::today_utc),
            status,
        };
        (reporter, status_rx)
    }

    /// Use another source for "today" (local time zone, fixed date in tests)
    pub fn with_today(mut self, today: impl Fn() -> CivilDate + Send + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn emit(&self, status: ReportStatus) {
        // nobody listening is fine
        let _ = self.status.send(status);
    }

    /// Handle one command, reporting progress on the status channel
    pub fn handle(&mut self, command: ReportCommand) {
        match command {
            ReportCommand::Submit { score } => {
                self.emit(ReportStatus::Submitting);
                match self.submit(score) {
                    Ok(()) => {
                        log::info!("Submitted score {} as {:?}", score, self.name);
                        self.emit(ReportStatus::Submitted);
                        self.refresh();
                    }
                    Err(err) => {
                        log::warn!("Score submission failed: {}", err);
                        self.emit(ReportStatus::Failed(err.to_string()));
                    }
                }
            }
            ReportCommand::Refresh => self.refresh(),
        }
    }

    fn submit(&mut self, score: u64) -> Result<(), LeaderboardError> {
        if self.name.is_empty() {
            return Err(LeaderboardError::InvalidName);
        }
        let submission = Submission {
            name: self.name.clone(),
            score,
            period: self.period,
            period_start: period_start(self.period, (self.today)()),
        };
        self.service.submit(&submission)
    }

    fn refresh(&mut self) {
        self.emit(ReportStatus::Loading);
        let start = period_start(self.period, (self.today)());
        match self.service.fetch_top(self.period, start) {
            Ok(rows) => self.emit(ReportStatus::Loaded(rows)),
            Err(err) => {
                log::warn!("Leaderboard fetch failed: {}", err);
                self.emit(ReportStatus::Failed(err.to_string()));
            }
        }
    }

    /// Handle whatever is queued without blocking; for hosts with no threads
    pub fn drain(&mut self, commands: &Receiver<ReportCommand>) -> usize {
        let mut handled = 0;
        while let Ok(command) = commands.try_recv() {
            self.handle(command);
            handled += 1;
        }
        handled
    }

    /// Process commands until every sender is dropped, then hand the service back
    pub fn run(mut self, commands: Receiver<ReportCommand>) -> S {
        while let Ok(command) = commands.recv() {
            self.handle(command);
        }
        self.service
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<S: LeaderboardService + Send + 'static> ScoreReporter<S> {
    /// Run on a background thread; returns the command sender and the join handle
    pub fn spawn(self) -> (Sender<ReportCommand>, std::thread::JoinHandle<S>) {
        let (tx, rx) = channel();
        let handle = std::thread::spawn(move || self.run(rx));
        (tx, handle)
    }
}
