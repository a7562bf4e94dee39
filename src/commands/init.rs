use crate::{
    libs::{config::Config, data_storage::DataStorage, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Database file to use instead of the one in the data directory
    #[arg(long)]
    db: Option<PathBuf>,
    /// Assets directory (photos and icons)
    #[arg(long)]
    assets: Option<PathBuf>,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let storage = DataStorage::new();
    let mut config = Config::read_from(&storage)?;

    if let Some(path) = init_args.db {
        config.set_database_path(&path)?;
    }
    if let Some(dir) = init_args.assets {
        config.assets_dir = Some(dir);
    }

    let db = config.open_db(&storage)?;
    config.save_to(&storage)?;

    msg_success!(Message::ConfigSaved);
    msg_info!(Message::DbProvisioned(config.database_path(&storage).display().to_string()));
    tracing::debug!(version = db.version()?, "schema version");
    Ok(())
}
