use std::time::Duration;

use crate::session::{Session, Status};

/// Characters per word when converting to words per minute.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Results of a completed lesson
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessonStats {
    pub elapsed: Duration,
    pub chars_per_minute: f64,
    pub words_per_minute: f64,
    pub correct: usize,
    pub fixed: usize,
    pub unfixed: usize,
    pub total: usize,
    /// Fraction of characters right first time, 0.0 to 1.0.
    pub accuracy: f64,
}

impl LessonStats {
    /// `None` until the session is complete.
    pub fn from_session(session: &Session) -> Option<Self> {
        if !session.is_completed() {
            return None;
        }

        let elapsed = match (session.started_at(), session.last_keystroke_at()) {
            (Some(start), Some(last)) => last.saturating_duration_since(start),
            _ => Duration::ZERO,
        };

        let (correct, fixed, unfixed) =
            session
                .records()
                .iter()
                .fold((0, 0, 0), |(c, f, u), r| match r.status {
                    Status::Correct => (c + 1, f, u),
                    Status::ErrorFixed => (c, f + 1, u),
                    Status::ErrorUnfixed => (c, f, u + 1),
                    Status::Untyped => (c, f, u),
                });
        let total = session.records().len();

        Some(Self::compute(elapsed, total, correct, fixed, unfixed))
    }

    fn compute(
        elapsed: Duration,
        total: usize,
        correct: usize,
        fixed: usize,
        unfixed: usize,
    ) -> Self {
        let minutes = elapsed.as_secs_f64() / 60.0;
        let chars_per_minute = if minutes > 0.0 {
            total as f64 / minutes
        } else {
            0.0
        };
        let accuracy = if total > 0 {
            correct as f64 / total as f64
        } else {
            0.0
        };

        Self {
            elapsed,
            chars_per_minute,
            words_per_minute: chars_per_minute / CHARS_PER_WORD,
            correct,
            fixed,
            unfixed,
            total,
            accuracy,
        }
    }

    pub fn met_target(&self, target_wpm: u32) -> bool {
        self.words_per_minute >= f64::from(target_wpm)
    }
}
