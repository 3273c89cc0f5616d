use blurt::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    language::Dataset,
    locale::Locale,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    ui,
    word_generator::{WordGenConfig, WordGenerator, WordSource},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// say the word before the ring runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A party word game for the terminal: one word, a few seconds on the clock, and a single key to mark it guessed before time runs out."
)]
pub struct Cli {
    /// seconds on the clock for each round
    #[clap(short = 's', long)]
    round_secs: Option<f64>,

    /// word list to draw from
    #[clap(short = 'd', long, value_enum)]
    dataset: Option<Dataset>,

    /// language of the on-screen labels
    #[clap(short = 'l', long, value_enum)]
    locale: Option<Locale>,

    /// show this word every round instead of a random one
    #[clap(short = 'w', long)]
    word: Option<String>,

    /// milliseconds between timer ticks
    #[clap(long)]
    tick_ms: Option<u64>,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,

    /// append log output here instead of the state directory
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command line flags over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.round_secs {
            config.round_secs = secs;
        }
        if let Some(dataset) = self.dataset {
            config.dataset = dataset;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        config.validate()
    }

    fn to_word_gen_config(&self, config: &Config) -> WordGenConfig {
        WordGenConfig {
            dataset: config.dataset,
            word_override: self.word.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        logging::init_file_logger(&path)?;
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!("config: saved to {}", store.path().display());
    }

    let generator = WordGenerator::new(cli.to_word_gen_config(&config));
    let mut app = App::new(generator, &config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend, W: WordSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<W>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_interval()),
    );

    loop {
        draw(terminal, app)?;

        match runner.step() {
            GameEvent::Tick => app.on_tick(),
            GameEvent::Resize => app.on_resize(),
            GameEvent::Key(key) => match app.on_key(key) {
                Flow::Quit => break,
                // the first tick of a round is one full interval after it starts
                Flow::RoundStarted => runner.reset_schedule(),
                Flow::Continue => {}
            },
        }
    }

    Ok(())
}

fn draw<B: Backend, W: WordSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<W>,
) -> io::Result<()> {
    terminal.draw(|f| {
        app.settle_layout(ui::word_area(f.area()).width);
        f.render_widget(&*app, f.area());
    })?;
    Ok(())
}
