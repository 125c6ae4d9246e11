use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::input::InputEvent;
use crate::session::{LessonConfig, Session};
use crate::stats::LessonStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the live lesson and turns input events into session operations
#[derive(Debug)]
pub struct App {
    session: Session,
    rng: StdRng,
    status_message: Option<String>,
}

impl App {
    /// `seed` makes every generated lesson reproducible.
    pub fn new(corpus: Arc<Corpus>, config: LessonConfig, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = Session::new(corpus, config, &mut rng)?;

        Ok(Self {
            session,
            rng,
            status_message: None,
        })
    }

    pub fn from_session(session: Session, seed: u64) -> Self {
        Self {
            session,
            rng: StdRng::seed_from_u64(seed),
            status_message: None,
        }
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Flow {
        if event == InputEvent::Quit {
            return Flow::Quit;
        }

        match event {
            InputEvent::Restart => self.new_lesson(),
            InputEvent::Retry => {
                self.session.retry();
                self.status_message = None;
            }
            InputEvent::IncreaseUnlocked => self.adjust(1),
            InputEvent::DecreaseUnlocked => self.adjust(-1),
            InputEvent::Character(_) if self.session.is_completed() => self.new_lesson(),
            other => {
                if let Some(key) = other.keystroke() {
                    // only edits start the clock
                    self.session.begin_if_needed(now);
                    self.session.process_keystroke(key, now);
                    if self.session.is_completed() {
                        self.log_completion();
                    }
                }
            }
        }

        Flow::Continue
    }

    /// Whether a tick should trigger a redraw.
    pub fn on_tick(&self) -> bool {
        self.session.is_started() && !self.session.is_completed()
    }

    fn new_lesson(&mut self) {
        let result = self.session.restart(&mut self.rng);
        self.report(result);
    }

    fn adjust(&mut self, delta: isize) {
        let result = self.session.adjust_unlocked_letters(delta, &mut self.rng);
        self.report(result);
    }

    fn report(&mut self, result: Result<()>) {
        self.status_message = match result {
            Ok(()) => None,
            Err(err @ Error::EmptyVocabulary) => {
                tracing::warn!("keeping current lesson: {err}");
                Some(err.to_string())
            }
            Err(err) => {
                tracing::error!("failed to build lesson: {err}");
                Some(err.to_string())
            }
        };
    }

    fn log_completion(&self) {
        if let Some(stats) = LessonStats::from_session(&self.session) {
            tracing::info!(
                wpm = stats.words_per_minute,
                accuracy = stats.accuracy,
                correct = stats.correct,
                fixed = stats.fixed,
                unfixed = stats.unfixed,
                "lesson complete"
            );
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stats(&self) -> Option<LessonStats> {
        LessonStats::from_session(&self.session)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Status;
    use std::time::Duration;

    fn corpus() -> Arc<Corpus> {
        Arc::new(Corpus::from_words([
            "line", "rain", "near", "real", "alien", "learn", "tail", "zebra",
        ]))
    }

    fn app_with_text(text: &str) -> App {
        let session = Session::with_target(corpus(), LessonConfig::default(), text).unwrap();
        App::from_session(session, 11)
    }

    fn type_str(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle(InputEvent::Character(c), now);
        }
    }

    #[test]
    fn test_new_app_builds_lesson() {
        let app = App::new(corpus(), LessonConfig::default(), Some(3)).unwrap();
        assert!(!app.session().target().is_empty());
        assert!(app.status_message().is_none());
    }

    #[test]
    fn test_same_seed_same_lesson() {
        let a = App::new(corpus(), LessonConfig::default(), Some(3)).unwrap();
        let b = App::new(corpus(), LessonConfig::default(), Some(3)).unwrap();
        assert_eq!(a.session().target_text(), b.session().target_text());
    }

    #[test]
    fn test_new_app_empty_vocabulary() {
        let config = LessonConfig {
            unlocked_letters: 1,
            ..LessonConfig::default()
        };
        assert!(matches!(
            App::new(corpus(), config, Some(1)),
            Err(Error::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_quit() {
        let mut app = app_with_text("line");
        assert_eq!(app.handle(InputEvent::Quit, Instant::now()), Flow::Quit);
        assert!(!app.session().is_started());
    }

    #[test]
    fn test_first_key_starts_clock() {
        let now = Instant::now();
        let mut app = app_with_text("line");
        assert!(!app.on_tick());

        app.handle(InputEvent::Character('l'), now);
        assert!(app.session().is_started());
        assert_eq!(app.session().started_at(), Some(now));
        assert!(app.on_tick());
    }

    #[test]
    fn test_typing_to_completion() {
        let now = Instant::now();
        let mut app = app_with_text("a b");
        type_str(&mut app, "a x", now);

        assert!(app.session().is_completed());
        assert!(!app.on_tick());
        let stats = app.stats().unwrap();
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.unfixed, 1);
    }

    #[test]
    fn test_character_after_completion_starts_new_lesson() {
        let now = Instant::now();
        let mut app = app_with_text("a b");
        type_str(&mut app, "a b", now);
        assert!(app.session().is_completed());

        app.handle(InputEvent::Character('q'), now);
        assert!(!app.session().is_completed());
        assert!(!app.session().is_started());
        assert!(app
            .session()
            .records()
            .iter()
            .all(|r| r.status == Status::Untyped));
    }

    #[test]
    fn test_backspace_after_completion_is_ignored() {
        let now = Instant::now();
        let mut app = app_with_text("ab");
        type_str(&mut app, "ab", now);
        app.handle(InputEvent::Backspace, now);
        assert!(app.session().is_completed());
        assert_eq!(app.session().index(), 2);
    }

    #[test]
    fn test_restart() {
        let now = Instant::now();
        let mut app = app_with_text("ab");
        type_str(&mut app, "a", now);
        app.handle(InputEvent::Restart, now);

        assert_eq!(app.session().index(), 0);
        assert!(!app.session().is_started());
        assert_ne!(app.session().target_text(), "ab");
    }

    #[test]
    fn test_retry_keeps_text() {
        let now = Instant::now();
        let mut app = app_with_text("ab");
        type_str(&mut app, "x", now);
        app.handle(InputEvent::Retry, now);

        assert_eq!(app.session().target_text(), "ab");
        assert_eq!(app.session().index(), 0);
    }

    #[test]
    fn test_unlock_more_letters() {
        let now = Instant::now();
        let mut app = app_with_text("ab");
        app.handle(InputEvent::IncreaseUnlocked, now);
        assert_eq!(app.session().unlocked_letters(), 7);
        // "tail" becomes available once 't' is unlocked
        assert_eq!(app.session().words().len(), 7);
    }

    #[test]
    fn test_empty_vocabulary_keeps_lesson() {
        let now = Instant::now();
        let config = LessonConfig {
            unlocked_letters: 3,
            ..LessonConfig::default()
        };
        // "nine" survives with e, n, i unlocked
        let corpus = Arc::new(Corpus::from_words(["nine", "line"]));
        let session = Session::with_target(corpus, config, "nine").unwrap();
        let mut app = App::from_session(session, 1);

        app.handle(InputEvent::DecreaseUnlocked, now);
        assert_eq!(app.session().unlocked_letters(), 3);
        assert_eq!(app.session().target_text(), "nine");
        assert!(app.status_message().unwrap().contains("no words left"));

        app.handle(InputEvent::IncreaseUnlocked, now);
        assert_eq!(app.session().unlocked_letters(), 4);
        assert!(app.status_message().is_none());
    }

    #[test]
    fn test_failed_adjust_does_not_start_clock() {
        let t0 = Instant::now();
        let config = LessonConfig {
            unlocked_letters: 3,
            ..LessonConfig::default()
        };
        let corpus = Arc::new(Corpus::from_words(["nine"]));
        let session = Session::with_target(corpus, config, "nine").unwrap();
        let mut app = App::from_session(session, 1);

        app.handle(InputEvent::DecreaseUnlocked, t0);
        assert!(app.status_message().is_some());
        assert!(!app.session().is_started());
        assert!(!app.on_tick());

        let t1 = t0 + Duration::from_secs(60);
        type_str(&mut app, "nine", t1);
        assert_eq!(app.session().started_at(), Some(t1));
        assert_eq!(app.stats().unwrap().elapsed, Duration::ZERO);
    }

    #[test]
    fn test_control_keys_do_not_start_clock() {
        let now = Instant::now();
        let mut app = app_with_text("line");
        app.handle(InputEvent::Retry, now);
        app.handle(InputEvent::IncreaseUnlocked, now);
        assert!(!app.session().is_started());

        app.handle(InputEvent::Backspace, now);
        assert!(app.session().is_started());
    }
}
