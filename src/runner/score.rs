//! Elapsed-time score and the process-lifetime high score.

use crate::constants::SCORE_UNIT_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreKeeper {
    pub score: u32,
    pub high_score: u32,
    /// Clock reading when the current run started.
    pub session_start_ms: u64,
}

impl ScoreKeeper {
    pub fn new(now_ms: u64) -> Self {
        Self {
            score: 0,
            high_score: 0,
            session_start_ms: now_ms,
        }
    }

    /// Recompute the score from the clock: one point per 100ms survived.
    pub fn update(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.session_start_ms);
        self.score = (elapsed / SCORE_UNIT_MS) as u32;
    }

    /// Fold the current score into the high score. Returns true on a new record.
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Start a new run at `now_ms`. The high score is kept.
    pub fn reset(&mut self, now_ms: u64) {
        self.score = 0;
        self.session_start_ms = now_ms;
    }
}
