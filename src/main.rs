use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use arcade_snake::audio::{AudioCue, Silent, TerminalBell};
use arcade_snake::game::{Difficulty, GameConfig, GameEngine};
use arcade_snake::modes::HumanMode;
use arcade_snake::storage::{JsonStore, MemoryStore, ScoreStore};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Grid side length in cells
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u16).range(5..=60))]
    grid_size: u16,

    /// Difficulty for this run (overrides the saved setting)
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Directory holding high scores, settings and the log
    #[arg(long, default_value = ".arcade_snake")]
    data_dir: PathBuf,

    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Mute sound cues for this run
    #[arg(long)]
    no_sound: bool,

    /// Keep scores and settings in memory only
    #[arg(long)]
    no_save: bool,

    /// Log file (defaults to <data-dir>/arcade_snake.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logs go to a file; the terminal belongs to the game
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn open_store(cli: &Cli) -> Box<dyn ScoreStore> {
    if cli.no_save {
        return Box::new(MemoryStore::new());
    }

    match JsonStore::open(&cli.data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("persistence unavailable, scores will not be kept: {e}");
            Box::new(MemoryStore::new())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = &cli.data_dir;
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("arcade_snake.log"));
    init_logging(&log_path)?;

    let store = open_store(&cli);

    // Command-line overrides apply to this run only and are not saved
    let mut settings = store.settings();
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    if cli.no_sound {
        settings.sound_enabled = false;
    }

    let mut config = GameConfig::new(usize::from(cli.grid_size))
        .with_difficulty(settings.difficulty);
    config.seed = cli.seed;

    tracing::info!(
        "starting arcade_snake: grid={} difficulty={:?} data_dir={}",
        config.grid_size,
        settings.difficulty,
        cli.data_dir.display()
    );

    let audio: Box<dyn AudioCue> = if cli.no_sound {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell)
    };

    let engine = GameEngine::new(config, store);
    let mut human_mode = HumanMode::new(engine, settings, audio);
    human_mode.run().await?;

    Ok(())
}
