use std::path::PathBuf;

use clap::{Args, Subcommand};
use staplay_core::TrackerInfo;
use staplay_store::SqliteRepo;

use super::{print_json, read_records, CommandResult};

#[derive(Debug, Args)]
pub struct TrackersArgs {
    #[command(subcommand)]
    pub command: TrackersCommand,
}

#[derive(Debug, Subcommand)]
pub enum TrackersCommand {
    /// Print the trackers as JSON
    List,
    /// Replace every tracker with those in a JSON file
    Replace {
        /// JSON array of trackers; `resistance` and `complicationRange` may be omitted
        file: PathBuf,
    },
}

pub fn execute(args: TrackersArgs, repo: &SqliteRepo) -> CommandResult {
    match args.command {
        TrackersCommand::List => print_json(&repo.list_trackers(None)?),
        TrackersCommand::Replace { file } => {
            let trackers = read_records(&file, TrackerInfo::from_loose)?;
            let outcome = repo.replace_trackers(&trackers, None)?;
            println!(
                "Trackers replaced: {} removed, {} added",
                outcome.deleted,
                outcome.inserted()
            );
            Ok(())
        }
    }
}
