use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::LessonConfig;

/// Settings persisted between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub unlocked_letters: usize,
    pub rank_cap: usize,
    pub min_word_length: usize,
    pub lesson_length: usize,
    pub target_wpm: u32,
}

impl Default for Config {
    fn default() -> Self {
        LessonConfig::default().into()
    }
}

impl From<LessonConfig> for Config {
    fn from(lc: LessonConfig) -> Self {
        Self {
            unlocked_letters: lc.unlocked_letters,
            rank_cap: lc.rank_cap,
            min_word_length: lc.min_word_length,
            lesson_length: lc.lesson_length,
            target_wpm: lc.target_wpm,
        }
    }
}

impl From<&Config> for LessonConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            unlocked_letters: cfg.unlocked_letters,
            rank_cap: cfg.rank_cap,
            min_word_length: cfg.min_word_length,
            lesson_length: cfg.lesson_length,
            target_wpm: cfg.target_wpm,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "keys") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("keys_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable config: {err}");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
