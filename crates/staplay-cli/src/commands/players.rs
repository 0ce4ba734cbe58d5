//! Player roster commands

use std::path::PathBuf;

use clap::{Args, Subcommand};
use staplay_core::PlayerInfo;
use staplay_store::SqliteRepo;

use super::{print_json, read_records, CommandResult};

#[derive(Debug, Args)]
pub struct PlayersArgs {
    #[command(subcommand)]
    pub command: PlayersCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlayersCommand {
    /// Print the roster as JSON
    List,
    /// Replace the roster with the players in a JSON file
    Replace {
        /// JSON array of players (camelCase fields, numbers may be strings)
        file: PathBuf,
    },
}

pub fn execute(args: PlayersArgs, repo: &SqliteRepo) -> CommandResult {
    match args.command {
        PlayersCommand::List => print_json(&repo.list_players(None)?),
        PlayersCommand::Replace { file } => {
            let players = read_records(&file, PlayerInfo::from_loose)?;
            let outcome = repo.replace_players(&players, None)?;
            println!(
                "Players replaced: {} removed, {} added",
                outcome.deleted,
                outcome.inserted()
            );
            Ok(())
        }
    }
}
