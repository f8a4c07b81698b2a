//! ciphershards CLI
//!
//! Collect cipher shards, wire them together, light up the grid.

use std::fs::File;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use ciphershards::save::{load_save, save_path};
use ciphershards::tui;
use ciphershards::world::{World, DEFAULT_SHARD_COUNT};

#[derive(Parser)]
#[command(name = "ciphershards")]
#[command(about = "Collect cipher shards and wire them together")]
#[command(version)]
struct Cli {
    /// World generation seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of shards to scatter
    #[arg(long, default_value_t = DEFAULT_SHARD_COUNT)]
    shards: usize,

    /// Resume the saved game
    #[arg(long)]
    resume: bool,

    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.debug);

    if let Err(err) = start(&cli) {
        println!("{}", err);
    }
}

/// Build the world (fresh or resumed) and hand it to the TUI.
fn start(cli: &Cli) -> std::io::Result<()> {
    let world = if cli.resume {
        let save = load_save(&save_path())?;
        log::info!("resumed game, seed {}", save.seed);
        save.into_world()
    } else {
        let seed = cli.seed.unwrap_or_else(rand::random);
        log::info!("new game, seed {}, {} shards", seed, cli.shards);
        World::new(seed, cli.shards)
    };

    tui::run(world)
}

/// Best-effort file logger. Stdout is unusable once the terminal is in
/// raw mode, so everything goes to ciphershards.log in the working
/// directory.
fn init_logger(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("ciphershards.log") {
        let _ = WriteLogger::init(level, config, log_file);
    }
}
