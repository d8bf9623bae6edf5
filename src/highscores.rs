//! Best endless-mode runs
//!
//! The achievement metric for an endless session is how many birds were kept
//! aloft. Storage is the embedding application's concern; this is just the
//! ordered top-10 list.

use serde::{Deserialize, Serialize};

use crate::sim::SessionReport;

/// Maximum number of runs to keep
pub const MAX_BEST_RUNS: usize = 10;

/// A single recorded run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunEntry {
    /// Birds aloft when the session ended
    pub birds: u32,
    /// Session length in ticks
    pub ticks: u64,
    /// Seed, so a run can be replayed
    pub seed: u64,
}

/// Leaderboard of endless runs, sorted descending by bird count
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestRuns {
    pub entries: Vec<RunEntry>,
}

impl BestRuns {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the list
    pub fn qualifies(&self, birds: u32) -> bool {
        if birds == 0 {
            return false;
        }
        if self.entries.len() < MAX_BEST_RUNS {
            return true;
        }
        self.entries.last().map(|e| birds > e.birds).unwrap_or(true)
    }

    /// Rank a run would achieve (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, birds: u32) -> Option<usize> {
        if !self.qualifies(birds) {
            return None;
        }
        let rank = self.entries.iter().position(|e| birds > e.birds);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished session; returns the rank achieved, if any
    pub fn record(&mut self, report: &SessionReport, seed: u64) -> Option<usize> {
        if !self.qualifies(report.live_birds) {
            return None;
        }

        let entry = RunEntry {
            birds: report.live_birds,
            ticks: report.at_tick,
            seed,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| report.live_birds > e.birds);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_BEST_RUNS);
        Some(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(birds: u32) -> SessionReport {
        SessionReport {
            live_birds: birds,
            at_tick: 1000,
        }
    }

    #[test]
    fn test_empty_list_qualifies_any_nonzero_run() {
        let runs = BestRuns::new();
        assert!(runs.qualifies(1));
        assert!(!runs.qualifies(0));
    }

    #[test]
    fn test_record_keeps_descending_order() {
        let mut runs = BestRuns::new();
        assert_eq!(runs.record(&report(3), 1), Some(1));
        assert_eq!(runs.record(&report(7), 2), Some(1));
        assert_eq!(runs.record(&report(5), 3), Some(2));
        let birds: Vec<u32> = runs.entries.iter().map(|e| e.birds).collect();
        assert_eq!(birds, vec![7, 5, 3]);
    }

    #[test]
    fn test_list_truncates_at_capacity() {
        let mut runs = BestRuns::new();
        for i in 1..=12 {
            runs.record(&report(i), i as u64);
        }
        assert_eq!(runs.entries.len(), MAX_BEST_RUNS);
        assert_eq!(runs.entries[0].birds, 12);
        assert!(!runs.qualifies(2), "below the cut once full");
        assert_eq!(runs.potential_rank(8), Some(6), "ties rank below existing entries");
    }
}
