//! STA Play CLI
//!
//! Command-line interface for inspecting and editing an STA Play store

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use staplay_core::logging_facility::{init, Profile};
use staplay_store::config::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_STORE_PATH};
use staplay_store::{SqliteRepo, Store, StoreConfig};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "staplay")]
#[command(about = "STA Play - session tracker store", long_about = None)]
struct Cli {
    /// Path to the store file
    #[arg(long, global = true, default_value = DEFAULT_STORE_PATH)]
    db: PathBuf,

    /// How long to wait for another writer before giving up
    #[arg(long, global = true, default_value_t = DEFAULT_BUSY_TIMEOUT_MS)]
    busy_timeout_ms: u64,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// General session info (text, ship, momentum, alert)
    Info(commands::info::InfoArgs),
    /// Scene traits
    Traits(commands::traits::TraitsArgs),
    /// Player roster
    Players(commands::players::PlayersArgs),
    /// Progress trackers
    Trackers(commands::trackers::TrackersArgs),
    /// Delete the store and everything in it
    Reset,
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Human => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let store = Store::new(StoreConfig {
        path: cli.db,
        busy_timeout_ms: cli.busy_timeout_ms,
    });
    let repo = SqliteRepo::new(store);

    let result = match cli.command {
        Commands::Info(args) => commands::info::execute(args, &repo),
        Commands::Traits(args) => commands::traits::execute(args, &repo),
        Commands::Players(args) => commands::players::execute(args, &repo),
        Commands::Trackers(args) => commands::trackers::execute(args, &repo),
        Commands::Reset => commands::reset::execute(&repo),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
