//! In-process leaderboard
//!
//! Same contract as the hosted board: one row per `(period, period_start,
//! name)`, resubmitting replaces the score but keeps the original timestamp.

use super::{
    CivilDate, LeaderboardEntry, LeaderboardError, LeaderboardService, PeriodKind, Submission,
    TOP_N, sanitize_name,
};

#[derive(Debug, Clone)]
struct Row {
    period: PeriodKind,
    period_start: CivilDate,
    entry: LeaderboardEntry,
}

/// Leaderboard kept in memory, for tests and the headless runner
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboard {
    rows: Vec<Row>,
    /// Stand-in for the server clock; bumped on every insert
    next_created_at: u64,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows across all buckets
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn bucket(&self, period: PeriodKind, start: CivilDate) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .filter(move |r| r.period == period && r.period_start == start)
    }

    /// Rank (1-indexed) a score would take in a bucket, or None past `TOP_N`
    pub fn potential_rank(&self, period: PeriodKind, start: CivilDate, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        // ties go to the earlier entry
        let better = self
            .bucket(period, start)
            .filter(|r| r.entry.score >= score)
            .count();
        (better < TOP_N).then_some(better + 1)
    }
}

impl LeaderboardService for InMemoryLeaderboard {
    fn fetch_top(
        &self,
        period: PeriodKind,
        start: CivilDate,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut entries: Vec<LeaderboardEntry> =
            self.bucket(period, start).map(|r| r.entry.clone()).collect();
        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        entries.truncate(TOP_N);
        Ok(entries)
    }

    fn submit(&mut self, submission: &Submission) -> Result<(), LeaderboardError> {
        let name = sanitize_name(&submission.name);
        if name.is_empty() {
            return Err(LeaderboardError::InvalidName);
        }

        let existing = self.rows.iter_mut().find(|r| {
            r.period == submission.period
                && r.period_start == submission.period_start
                && r.entry.name == name
        });
        match existing {
            Some(row) => row.entry.score = submission.score,
            None => {
                self.next_created_at += 1;
                self.rows.push(Row {
                    period: submission.period,
                    period_start: submission.period_start,
                    entry: LeaderboardEntry {
                        name,
                        score: submission.score,
                        created_at: self.next_created_at,
                    },
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(board: &mut InMemoryLeaderboard, name: &str, score: u64, period: PeriodKind) {
        board
            .submit(&Submission {
                name: name.to_string(),
                score,
                period,
                period_start: CivilDate::new(2024, 5, 13),
            })
            .unwrap();
    }

    fn names(entries: &[LeaderboardEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_ranking_order() {
        let mut board = InMemoryLeaderboard::new();
        let week = CivilDate::new(2024, 5, 13);
        submit(&mut board, "amy", 300, PeriodKind::Weekly);
        submit(&mut board, "bob", 500, PeriodKind::Weekly);
        submit(&mut board, "cid", 300, PeriodKind::Weekly);

        let top = board.fetch_top(PeriodKind::Weekly, week).unwrap();
        assert_eq!(names(&top), vec!["bob", "amy", "cid"]);
    }

    #[test]
    fn test_upsert_replaces_score_keeps_timestamp() {
        let mut board = InMemoryLeaderboard::new();
        let week = CivilDate::new(2024, 5, 13);
        submit(&mut board, "amy", 300, PeriodKind::Weekly);
        submit(&mut board, "bob", 200, PeriodKind::Weekly);
        submit(&mut board, "  amy ", 100, PeriodKind::Weekly);

        assert_eq!(board.len(), 2);
        let top = board.fetch_top(PeriodKind::Weekly, week).unwrap();
        assert_eq!(names(&top), vec!["bob", "amy"]);
        assert_eq!(top[1].score, 100);
        assert_eq!(top[1].created_at, 1);
    }

    #[test]
    fn test_buckets_are_separate() {
        let mut board = InMemoryLeaderboard::new();
        submit(&mut board, "amy", 300, PeriodKind::Weekly);
        submit(&mut board, "amy", 900, PeriodKind::Daily);

        let week = CivilDate::new(2024, 5, 13);
        assert_eq!(board.fetch_top(PeriodKind::Weekly, week).unwrap()[0].score, 300);
        assert_eq!(board.fetch_top(PeriodKind::Daily, week).unwrap()[0].score, 900);
        assert!(board.fetch_top(PeriodKind::All, week).unwrap().is_empty());
        assert!(
            board
                .fetch_top(PeriodKind::Weekly, week.add_days(7))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_top_is_capped() {
        let mut board = InMemoryLeaderboard::new();
        for i in 0..15u64 {
            submit(&mut board, &format!("p{i}"), i * 10 + 10, PeriodKind::All);
        }
        let start = CivilDate::new(2024, 5, 13);
        let top = board.fetch_top(PeriodKind::All, start).unwrap();
        assert_eq!(top.len(), TOP_N);
        assert_eq!(top[0].score, 150);
        assert_eq!(top[9].score, 60);

        assert_eq!(board.potential_rank(PeriodKind::All, start, 1000), Some(1));
        assert_eq!(board.potential_rank(PeriodKind::All, start, 60), None);
        assert_eq!(board.potential_rank(PeriodKind::All, start, 61), Some(10));
        assert_eq!(board.potential_rank(PeriodKind::All, start, 0), None);
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut board = InMemoryLeaderboard::new();
        let result = board.submit(&Submission {
            name: " \t ".into(),
            score: 10,
            period: PeriodKind::All,
            period_start: CivilDate::EPOCH,
        });
        assert_eq!(result, Err(LeaderboardError::InvalidName));
        assert!(board.is_empty());
    }
}
