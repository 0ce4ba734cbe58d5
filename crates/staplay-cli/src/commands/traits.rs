//! Scene trait commands

use clap::{Args, Subcommand};
use staplay_store::SqliteRepo;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct TraitsArgs {
    #[command(subcommand)]
    pub command: TraitsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TraitsCommand {
    /// Print trait names as a JSON array
    List,
    /// Replace every trait with the given names
    Replace {
        /// New trait names; none clears the list
        names: Vec<String>,
    },
}

pub fn execute(args: TraitsArgs, repo: &SqliteRepo) -> CommandResult {
    match args.command {
        TraitsCommand::List => print_json(&repo.list_traits(None)?),
        TraitsCommand::Replace { names } => {
            let outcome = repo.replace_traits(&names, None)?;
            println!(
                "Traits replaced: {} removed, {} added",
                outcome.deleted,
                outcome.inserted()
            );
            Ok(())
        }
    }
}
