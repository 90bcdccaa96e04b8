//! Layered run configuration: defaults, then a TOML file, then flags.

use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::warn;
use pathsnake_core::{Fallback, GameConfig};
use serde::Deserialize;

const DEFAULT_TICK_MS: u64 = 100;
const DEFAULT_MAX_TICKS: u64 = 2_000;

/// Command-line flags accepted by the `pathsnake` binary.
#[derive(Debug, Default, Parser)]
#[command(name = "pathsnake", about = "Snake agent that follows shortest paths to its target")]
pub(crate) struct Args {
    /// TOML file with `[game]` and `[run]` tables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Edge length of the square board.
    #[arg(long)]
    grid_size: Option<u32>,
    /// Seed for target placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Place the first target at a seeded random cell.
    #[arg(long)]
    random_target: bool,
    /// What to do when the target cannot be reached.
    #[arg(long, value_enum)]
    fallback: Option<FallbackArg>,
    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,
    /// Milliseconds between ticks when drawing frames.
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Skip drawing and print only the summary.
    #[arg(long)]
    headless: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FallbackArg {
    Idle,
    Wander,
}

impl From<FallbackArg> for Fallback {
    fn from(value: FallbackArg) -> Self {
        match value {
            FallbackArg::Idle => Fallback::Idle,
            FallbackArg::Wander => Fallback::FirstLegalNeighbor,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    game: GameConfig,
    run: RunConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunConfig {
    ticks: Option<u64>,
    tick_ms: Option<u64>,
    headless: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) game: GameConfig,
    pub(crate) max_ticks: u64,
    pub(crate) tick_interval: Duration,
    pub(crate) headless: bool,
}

impl Args {
    /// Merges defaults, the optional config file and the flags.
    pub(crate) fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => load(path)?,
            None => FileConfig::default(),
        };
        let FileConfig { mut game, run } = file;

        if let Some(size) = self.grid_size {
            game.grid_size = size;
            if let Some(target) = game.target {
                if target.column() >= size || target.row() >= size {
                    warn!("target {target:?} does not fit a {size}x{size} board; placing it randomly");
                    game.target = None;
                }
            }
        }
        if let Some(seed) = self.seed {
            game.seed = seed;
        }
        if self.random_target {
            game.target = None;
        }
        if let Some(fallback) = self.fallback {
            game.fallback = fallback.into();
        }

        game.validate().context("invalid game configuration")?;

        let tick_ms = self.tick_ms.or(run.tick_ms).unwrap_or(DEFAULT_TICK_MS);
        Ok(Settings {
            game,
            max_ticks: self.ticks.or(run.ticks).unwrap_or(DEFAULT_MAX_TICKS),
            tick_interval: Duration::from_millis(tick_ms),
            headless: self.headless || run.headless,
        })
    }
}

fn load(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse(contents: &str) -> Result<FileConfig> {
    toml::from_str(contents).context("config is not valid TOML for pathsnake")
}
