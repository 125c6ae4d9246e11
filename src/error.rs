use thiserror::Error;

/// Errors surfaced while building word lists and lessons.
#[derive(Debug, Error)]
pub enum Error {
    /// The rank cap, minimum length and unlocked letters filtered out every word.
    #[error("no words left after filtering; unlock more letters or relax the length/rank limits")]
    EmptyVocabulary,

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("no embedded word list named '{0}'")]
    UnknownCorpus(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
