//! Store reset command

use staplay_store::SqliteRepo;

use super::CommandResult;

pub fn execute(repo: &SqliteRepo) -> CommandResult {
    let store = repo.store();
    store.destroy()?;
    println!("Store removed: {}", store.path().display());
    Ok(())
}
