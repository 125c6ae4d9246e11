use include_dir::{include_dir, Dir};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Word lists shipped inside the binary
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum, strum_macros::Display)]
pub enum SupportedCorpus {
    English,
}

impl SupportedCorpus {
    pub fn load(&self) -> Result<Corpus> {
        Corpus::embedded(&self.to_string().to_lowercase())
    }
}

/// Frequency-ranked word source. Index 0 is the most frequent word.
///
/// Immutable once built; share it behind an `Arc` and derive filtered
/// lists from it with [`Corpus::top_k`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Build from newline-delimited text in rank order.
    pub fn from_text(text: &str) -> Self {
        let mut seen = HashSet::new();
        let words = text
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .filter(|word| seen.insert(word.clone()))
            .collect();

        Self { words }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_text(&text)
    }

    pub fn embedded(name: &str) -> Result<Self> {
        let file = LANG_DIR
            .get_file(format!("{name}.txt"))
            .ok_or_else(|| Error::UnknownCorpus(name.to_string()))?;
        let text = file
            .contents_utf8()
            .ok_or_else(|| Error::UnknownCorpus(name.to_string()))?;

        Ok(Self::from_text(text))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
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
}
