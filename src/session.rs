//! One lesson: the target text, a keystroke record per character, the
//! cursor and the lesson timing.
//!
//! A [`Session`] is driven by [`Session::process_keystroke`] and replaced
//! wholesale by the restart operations. Every record moves through the
//! [`Status`] state machine on each character written to it; backspaces
//! blank the typed value but leave the status alone, so a later correct
//! write over an earlier mistake becomes [`Status::ErrorFixed`].

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::words::{locked_letters, WordList, ALPHABET_LEN};

/// Shortest lesson that still samples a non-empty stream.
pub const MIN_LESSON_LENGTH: usize = 4;
pub const MIN_UNLOCKED_LETTERS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Status {
    Untyped,
    Correct,
    ErrorUnfixed,
    ErrorFixed,
}

impl Status {
    /// Status after a character is written; `matches` is whether it was the expected one.
    pub fn after(self, matches: bool) -> Status {
        match (self, matches) {
            (Status::Untyped, true) => Status::Correct,
            (Status::Correct, true) => Status::Correct,
            (Status::ErrorUnfixed, true) => Status::ErrorFixed,
            (Status::ErrorFixed, true) => Status::ErrorFixed,
            (_, false) => Status::ErrorUnfixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeystrokeRecord {
    pub expected: char,
    pub typed: Option<char>,
    pub typed_at: Option<Instant>,
    pub status: Status,
}

impl KeystrokeRecord {
    fn new(expected: char) -> Self {
        Self {
            expected,
            typed: None,
            typed_at: None,
            status: Status::Untyped,
        }
    }

    fn clear(&mut self) {
        self.typed = None;
    }
}

/// Edits a session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Character(char),
    Backspace,
    WordBackspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonConfig {
    pub unlocked_letters: usize,
    pub rank_cap: usize,
    pub min_word_length: usize,
    pub lesson_length: usize,
    pub target_wpm: u32,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            unlocked_letters: 6,
            rank_cap: 10_000,
            min_word_length: 3,
            lesson_length: 100,
            target_wpm: 40,
        }
    }
}

impl LessonConfig {
    pub fn validate(&self) -> Result<()> {
        if self.lesson_length < MIN_LESSON_LENGTH {
            return Err(Error::invalid(format!(
                "lesson length must be at least {MIN_LESSON_LENGTH} characters, got {}",
                self.lesson_length
            )));
        }
        if !(MIN_UNLOCKED_LETTERS..=ALPHABET_LEN).contains(&self.unlocked_letters) {
            return Err(Error::invalid(format!(
                "unlocked letters must be between {MIN_UNLOCKED_LETTERS} and {ALPHABET_LEN}, got {}",
                self.unlocked_letters
            )));
        }
        Ok(())
    }

    /// Rank cap, then minimum length, then locked letters.
    pub fn word_list(&self, corpus: &Corpus) -> WordList {
        corpus
            .top_k(self.rank_cap)
            .longer_than(self.min_word_length)
            .filter_out_letters(&locked_letters(self.unlocked_letters))
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    corpus: Arc<Corpus>,
    config: LessonConfig,
    words: WordList,
    target: Vec<char>,
    records: Vec<KeystrokeRecord>,
    index: usize,
    started: bool,
    completed: bool,
    started_at: Option<Instant>,
    last_keystroke_at: Option<Instant>,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(
        corpus: Arc<Corpus>,
        config: LessonConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let words = config.word_list(&corpus);
        let text = words.sample_character_stream(config.lesson_length, rng)?;

        tracing::debug!(
            vocabulary = words.len(),
            length = text.chars().count(),
            unlocked = config.unlocked_letters,
            "new lesson"
        );

        Ok(Self::build(corpus, config, words, &text))
    }

    /// Session over a fixed text instead of a sampled one.
    pub fn with_target(corpus: Arc<Corpus>, config: LessonConfig, text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::invalid("lesson text is empty"));
        }
        let words = config.word_list(&corpus);
        Ok(Self::build(corpus, config, words, text))
    }

    fn build(corpus: Arc<Corpus>, config: LessonConfig, words: WordList, text: &str) -> Self {
        let target: Vec<char> = text.chars().collect();
        let records = target.iter().copied().map(KeystrokeRecord::new).collect();

        Self {
            corpus,
            config,
            words,
            target,
            records,
            index: 0,
            started: false,
            completed: false,
            started_at: None,
            last_keystroke_at: None,
        }
    }

    /// Fresh lesson with the same configuration.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        *self = Session::new(self.corpus.clone(), self.config, rng)?;
        Ok(())
    }

    /// Same text again, all progress discarded.
    pub fn retry(&mut self) {
        let text: String = self.target.iter().collect();
        *self = Self::build(self.corpus.clone(), self.config, self.words.clone(), &text);
    }

    /// Unlock (`delta > 0`) or lock letters and start a new lesson.
    ///
    /// The count saturates at the alphabet bounds. On failure the session is
    /// left exactly as it was.
    pub fn adjust_unlocked_letters<R: Rng + ?Sized>(
        &mut self,
        delta: isize,
        rng: &mut R,
    ) -> Result<()> {
        let unlocked = self
            .config
            .unlocked_letters
            .saturating_add_signed(delta)
            .clamp(MIN_UNLOCKED_LETTERS, ALPHABET_LEN);

        let config = LessonConfig {
            unlocked_letters: unlocked,
            ..self.config
        };
        let session = Session::new(self.corpus.clone(), config, rng)?;

        if unlocked != self.config.unlocked_letters {
            tracing::info!(
                from = self.config.unlocked_letters,
                to = unlocked,
                "unlocked letters changed"
            );
        }
        *self = session;
        Ok(())
    }

    pub fn begin_if_needed(&mut self, now: Instant) {
        if !self.started {
            self.started = true;
            self.started_at = Some(now);
        }
    }

    pub fn process_keystroke(&mut self, key: Keystroke, now: Instant) {
        if self.completed {
            return;
        }

        match key {
            Keystroke::Character(c) => self.write(c, now),
            Keystroke::Backspace => self.backspace(),
            Keystroke::WordBackspace => self.word_backspace(),
        }
    }

    fn write(&mut self, c: char, now: Instant) {
        let Some(record) = self.records.get_mut(self.index) else {
            return;
        };

        record.typed = Some(c);
        record.typed_at = Some(now);
        record.status = record.status.after(c == record.expected);
        self.last_keystroke_at = Some(now);
        self.index += 1;

        self.completed = self
            .records
            .last()
            .is_some_and(|r| r.status != Status::Untyped);
    }

    fn backspace(&mut self) {
        if self.index <= 1 {
            if let Some(first) = self.records.first_mut() {
                first.clear();
            }
            self.index = 0;
            return;
        }

        self.index -= 1;
        self.records[self.index].clear();
    }

    fn word_backspace(&mut self) {
        if self.index <= 1 {
            self.backspace();
            return;
        }

        self.index -= 1;
        self.records[self.index].clear();

        while self.index > 0 && self.records[self.index - 1].typed != Some(' ') {
            self.index -= 1;
            self.records[self.index].clear();
        }
    }

    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn records(&self) -> &[KeystrokeRecord] {
        &self.records
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn last_keystroke_at(&self) -> Option<Instant> {
        self.last_keystroke_at
    }

    pub fn unlocked_letters(&self) -> usize {
        self.config.unlocked_letters
    }

    /// Time on the clock: frozen at the last keystroke once complete.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.started_at, self.completed, self.last_keystroke_at) {
            (Some(start), true, Some(last)) => last.saturating_duration_since(start),
            (Some(start), _, _) => now.saturating_duration_since(start),
            (None, _, _) => Duration::ZERO,
        }
    }
}
