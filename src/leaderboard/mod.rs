//! Leaderboard collaborator
//!
//! Scores are bucketed by period (`all`, `daily`, `weekly`), each bucket keyed
//! by the date it starts on. The simulation never calls into this module; the
//! session forwards finished scores to a `ScoreReporter` over a channel.

pub mod memory;
pub mod period;
pub mod reporter;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use memory::InMemoryLeaderboard;
pub use period::{CivilDate, period_start};
pub use reporter::{ReportCommand, ReportStatus, ScoreReporter};

/// Maximum rows returned by `fetch_top`
pub const TOP_N: usize = 10;

/// Longest nickname kept, in characters
pub const MAX_NAME_CHARS: usize = 16;

/// Leaderboard time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    #[default]
    All,
    Daily,
    Weekly,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::All => "all",
            PeriodKind::Daily => "daily",
            PeriodKind::Weekly => "weekly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(PeriodKind::All),
            "daily" | "day" => Some(PeriodKind::Daily),
            "weekly" | "week" => Some(PeriodKind::Weekly),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Milliseconds since the Unix epoch of the first submission
    pub created_at: u64,
}

impl LeaderboardEntry {
    /// Name as shown on the board
    pub fn display_name(&self) -> String {
        let name = sanitize_name(&self.name);
        if name.is_empty() {
            "anonymous".to_string()
        } else {
            name
        }
    }
}

/// A score submission for one period bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub score: u64,
    pub period: PeriodKind,
    pub period_start: CivilDate,
}

/// Leaderboard failures, surfaced to the player as status text only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// No backend configured
    Disabled,
    /// Nickname empty after sanitizing
    InvalidName,
    Backend(String),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "leaderboard is not configured"),
            Self::InvalidName => write!(f, "enter a nickname first"),
            Self::Backend(msg) => write!(f, "leaderboard error: {msg}"),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// Remote (or local) ranking service
pub trait LeaderboardService {
    /// Best scores for one bucket: score descending, earlier entries first on ties
    fn fetch_top(
        &self,
        period: PeriodKind,
        start: CivilDate,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;

    /// Insert or replace the row for `(period, period_start, name)`
    fn submit(&mut self, submission: &Submission) -> Result<(), LeaderboardError>;
}

/// Placeholder service when no backend is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLeaderboard;

impl LeaderboardService for DisabledLeaderboard {
    fn fetch_top(
        &self,
        _period: PeriodKind,
        _start: CivilDate,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        Err(LeaderboardError::Disabled)
    }

    fn submit(&mut self, _submission: &Submission) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::Disabled)
    }
}

/// Trim, collapse whitespace runs to one space, cap at `MAX_NAME_CHARS` characters
pub fn sanitize_name(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_NAME_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}
