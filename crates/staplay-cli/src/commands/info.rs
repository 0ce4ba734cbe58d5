//! General info commands

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde_json::json;
use staplay_core::{ExError, GeneralInfo};
use staplay_store::SqliteRepo;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[command(subcommand)]
    pub command: InfoCommand,
}

#[derive(Debug, Subcommand)]
pub enum InfoCommand {
    /// Print the general info record as JSON (`null` if never saved)
    Show,
    /// Save the general info record, replacing the previous one
    Set(SetArgs),
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(long, default_value = "")]
    pub text: String,

    #[arg(long)]
    pub ship_name: String,

    /// Momentum pool; must be an integer
    #[arg(long, default_value = "0")]
    pub momentum: String,

    #[arg(long, default_value = "")]
    pub alert: String,

    /// File holding the ship's 3D model
    #[arg(long)]
    pub ship_model: Option<PathBuf>,
}

pub fn execute(args: InfoArgs, repo: &SqliteRepo) -> CommandResult {
    match args.command {
        InfoCommand::Show => print_json(&repo.get_general_info(None)?),
        InfoCommand::Set(set_args) => execute_set(set_args, repo),
    }
}

fn execute_set(args: SetArgs, repo: &SqliteRepo) -> CommandResult {
    let mut info = GeneralInfo::from_loose(&json!({
        "text": args.text,
        "shipName": args.ship_name,
        "momentum": args.momentum,
        "activeAlert": args.alert,
    }))
    .map_err(ExError::from)?;

    if let Some(path) = &args.ship_model {
        let model = std::fs::read(path)
            .map_err(|e| format!("cannot read ship model {}: {}", path.display(), e))?;
        info = info.with_ship_model(model);
    }

    repo.save_general_info(&info, None)?;
    tracing::debug!(ship_name = %info.ship_name, "saved general info");

    println!("General info saved");
    Ok(())
}
