use rand::Rng;

use crate::corpus::Corpus;
use crate::error::{Error, Result};

/// Alphabet ordered by how early a letter is unlocked.
pub const LETTERS: &str = "eniarltosudycghpmkbwfzvxqj";

pub const ALPHABET_LEN: usize = 26;

/// Letters not yet unlocked when `unlocked` letters are available.
pub fn locked_letters(unlocked: usize) -> Vec<char> {
    LETTERS.chars().skip(unlocked).collect()
}

pub fn unlocked_letters(unlocked: usize) -> Vec<char> {
    LETTERS.chars().take(unlocked).collect()
}

/// Ordered list of words derived from a [`Corpus`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl Corpus {
    /// The `k` most frequent words.
    pub fn top_k(&self, k: usize) -> WordList {
        WordList {
            words: self.words()[..k.min(self.len())].to_vec(),
        }
    }
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words of at least `min_len` characters.
    pub fn longer_than(&self, min_len: usize) -> WordList {
        WordList {
            words: self
                .words
                .iter()
                .filter(|w| w.chars().count() >= min_len)
                .cloned()
                .collect(),
        }
    }

    /// Words containing none of `letters`.
    pub fn filter_out_letters(&self, letters: &[char]) -> WordList {
        if letters.is_empty() {
            return self.clone();
        }

        WordList {
            words: self
                .words
                .iter()
                .filter(|w| !w.contains(letters))
                .cloned()
                .collect(),
        }
    }

    /// Random words joined by single spaces, between `len - 3` and `len`
    /// characters long. Shorter requests than 4 yield an empty stream.
    pub fn sample_character_stream<R: Rng + ?Sized>(
        &self,
        len: usize,
        rng: &mut R,
    ) -> Result<String> {
        if self.words.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let floor = len.saturating_sub(3);
        let mut stream = String::new();
        let mut count = 0;

        while count < floor {
            if count > 0 {
                stream.push(' ');
                count += 1;
            }
            let word = &self.words[rng.gen_range(0..self.words.len())];
            stream.push_str(word);
            count += word.chars().count();
        }

        if count > len {
            stream = stream.chars().take(len).collect();
        }

        Ok(stream)
    }
}
