use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kalah::config::AppConfig;
use kalah::game::Player;
use kalah::session::GameSession;
use kalah::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Kalah against the machine in the terminal.
#[derive(Parser)]
#[command(name = "kalah", about = "Play Kalah against the machine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "kalah.toml")]
    config: PathBuf,

    /// Override the search depth of the machine player
    #[arg(long)]
    level: Option<usize>,

    /// Override the number of pits per player
    #[arg(long)]
    pits: Option<usize>,

    /// Override the initial number of seeds per pit
    #[arg(long)]
    seeds: Option<u32>,

    /// Let the computer make the first move
    #[arg(long)]
    computer_opens: bool,

    /// Write log output to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(level) = cli.level {
        config.game.level = level;
    }
    if let Some(pits) = cli.pits {
        config.game.pits_per_player = pits;
    }
    if let Some(seeds) = cli.seeds {
        config.game.seeds_per_pit = seeds;
    }
    if cli.computer_opens {
        config.game.opening_player = Player::Computer;
    }
    config.validate().context("validating settings")?;

    let session = GameSession::from_config(&config).context("starting game")?;
    run(App::new(session)).context("running terminal UI")
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("initialising logger")?;
    Ok(())
}

fn run(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, also on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
