use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tile_snake::background::Background;
use tile_snake::config::{DEFAULT_BOARD_CELLS, DEFAULT_CELL_SIZE, DEFAULT_TICK_MS};
use tile_snake::{GameConfig, Gender, PlayerInfo, SnakeApp};

#[derive(Parser)]
#[command(name = "tile-snake")]
#[command(version, about = "Snake on a wrap-around grid, in the terminal")]
struct Cli {
    /// Cells along each side of the square board
    #[arg(long, default_value_t = DEFAULT_BOARD_CELLS)]
    board_cells: u16,

    /// Terminal columns per cell
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u16,

    /// Milliseconds between game ticks
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Player name; skips the player details form
    #[arg(long)]
    name: Option<String>,

    /// Player age, used with --name
    #[arg(long, default_value = "")]
    age: String,

    /// Player gender (male, female, other), used with --name
    #[arg(long, default_value = "not specified")]
    gender: Gender,

    /// Text file drawn behind the board
    #[arg(long)]
    background: Option<PathBuf>,

    /// Where to write logs; the screen belongs to the game
    #[arg(long, default_value = "tile-snake.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let mut config = GameConfig::new(cli.board_cells, cli.cell_size, Duration::from_millis(cli.tick_ms));
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let config = config.validate().context("invalid game settings")?;

    let player = cli.name.as_deref().map(|name| PlayerInfo::normalized(name, &cli.age, cli.gender));
    let background = load_background(cli.background.as_deref());

    info!(
        board_cells = config.board_cells,
        cell_size = config.cell_size,
        tick_ms = cli.tick_ms,
        seed = ?config.seed,
        "starting tile-snake"
    );

    let mut app = SnakeApp::new(config, player, background)?;
    app.run()
}

fn init_tracing(path: &std::path::Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install log subscriber")
}

/// A missing or unreadable background is not worth stopping the game for.
fn load_background(path: Option<&std::path::Path>) -> Background {
    match path.map(Background::load) {
        Some(Ok(background)) => background,
        Some(Err(err)) => {
            warn!(%err, "playing without a background");
            Background::default()
        }
        None => Background::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_subscriber_install_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        init_tracing(&dir.path().join("first.log")).unwrap();
        let err = init_tracing(&dir.path().join("second.log")).unwrap_err();
        assert!(err.to_string().contains("failed to install log subscriber"));
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = init_tracing(&dir.path().join("missing").join("x.log")).unwrap_err();
        assert!(err.to_string().contains("failed to create log file"));
    }
}
