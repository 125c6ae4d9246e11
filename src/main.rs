use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::File,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Instant,
};
use tracing_subscriber::EnvFilter;

use keys::{
    app::{App, Flow},
    config::{Config, ConfigStore, FileConfigStore},
    corpus::{Corpus, SupportedCorpus},
    input::InputEvent,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::LessonConfig,
};

/// progressive typing trainer: unlock letters one at a time and drill real words built from them
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// embedded word list to draw lessons from
    #[clap(short = 'c', long, value_enum, default_value_t = SupportedCorpus::English)]
    corpus: SupportedCorpus,

    /// newline-delimited word list ranked by frequency, overrides --corpus
    #[clap(short = 'f', long)]
    word_file: Option<PathBuf>,

    /// number of letters unlocked, in the order e n i a r l t o s u ...
    #[clap(short = 'u', long)]
    unlocked: Option<usize>,

    /// only use the N most frequent words
    #[clap(short = 'k', long)]
    rank_cap: Option<usize>,

    /// minimum word length
    #[clap(short = 'm', long)]
    min_length: Option<usize>,

    /// lesson length in characters
    #[clap(short = 'l', long)]
    length: Option<usize>,

    /// words per minute to aim for
    #[clap(short = 't', long)]
    target_wpm: Option<u32>,

    /// seed for reproducible lessons
    #[clap(long)]
    seed: Option<u64>,

    /// write logs to this file (filter with RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// do not remember the unlocked letters on exit
    #[clap(long)]
    no_save: bool,
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if let Some(unlocked) = self.unlocked {
            cfg.unlocked_letters = unlocked;
        }
        if let Some(rank_cap) = self.rank_cap {
            cfg.rank_cap = rank_cap;
        }
        if let Some(min_length) = self.min_length {
            cfg.min_word_length = min_length;
        }
        if let Some(length) = self.length {
            cfg.lesson_length = length;
        }
        if let Some(target_wpm) = self.target_wpm {
            cfg.target_wpm = target_wpm;
        }
    }

    fn load_corpus(&self) -> keys::Result<Corpus> {
        match &self.word_file {
            Some(path) => Corpus::from_path(path),
            None => self.corpus.load(),
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut cfg = store.load();
    cli.apply(&mut cfg);

    let corpus = Arc::new(cli.load_corpus()?);
    tracing::info!(words = corpus.len(), "corpus loaded");

    // settings errors surface before the terminal is taken over
    let mut app = App::new(corpus, LessonConfig::from(&cfg), cli.seed)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !cli.no_save {
        cfg.unlocked_letters = app.session().unlocked_letters();
        if let Err(err) = store.save(&cfg) {
            tracing::warn!(path = %store.path().display(), "could not save config: {err}");
        }
    }

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let redraw = match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => true,
            AppEvent::Closed => {
                tracing::error!("terminal input closed, exiting");
                return Err("terminal input closed".into());
            }
            AppEvent::Key(key) => match InputEvent::from_key(key) {
                Some(event) => {
                    if app.handle(event, Instant::now()) == Flow::Quit {
                        break;
                    }
                    true
                }
                None => false,
            },
        };

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
