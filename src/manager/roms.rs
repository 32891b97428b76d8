// Archive operations - add, del

use crate::cli::{AddArgs, DelArgs};
use crate::config::{AppPaths, ConfigStore};
use crate::core::traits::Transport;
use crate::download::{AddOutcome, DownloadManager};
use crate::storage::CatalogueStore;
use crate::utils::error::AppResult;
use tracing::debug;

pub async fn handle_add_command(
    paths: &AppPaths,
    transport: &dyn Transport,
    args: &AddArgs,
) -> AppResult<Vec<AddOutcome>> {
    let config = ConfigStore::new(paths).load()?;
    let catalogue = CatalogueStore::new(paths).load()?;
    let manager = DownloadManager::new(config.roms_dir()?);

    debug!(roms = %manager.roms_dir().display(), force = args.force, "adding machines");
    manager
        .add(&catalogue, transport, &args.machines, args.force)
        .await
}

pub fn handle_del_command(paths: &AppPaths, args: &DelArgs) -> AppResult<()> {
    let config = ConfigStore::new(paths).load()?;
    let manager = DownloadManager::new(config.roms_dir()?);

    manager.del(&args.machines)?;
    Ok(())
}
