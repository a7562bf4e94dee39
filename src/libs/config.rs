//! Application configuration.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). A missing file means defaults: the database is
//! `institute.db` and the assets tree is `assets/`, both next to the config.
//!
//! The database location can be overridden without touching the file by
//! setting `INSTITUTE_DB`, either in the environment or in a `.env` file
//! loaded at startup.

use super::assets::Assets;
use super::data_storage::DataStorage;
use super::messages::Message;
use crate::db::db::Db;
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_ENV_VAR: &str = "INSTITUTE_DB";
pub const DEFAULT_DB_FILE_NAME: &str = "institute.db";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    /// File name inside the data directory, used when `path` is unset.
    pub file_name: String,
    /// Explicit database file, anywhere on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_DB_FILE_NAME.to_string(),
            path: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Assets root; relative paths resolve against the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str).map_err(|_| msg_error_anyhow!(Message::ConfigParseError))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Database file: `INSTITUTE_DB`, then `database.path`, then
    /// `database.file_name` inside the data directory.
    pub fn database_path(&self, storage: &DataStorage) -> PathBuf {
        if let Some(path) = env::var_os(DB_ENV_VAR).filter(|value| !value.is_empty()) {
            return PathBuf::from(path);
        }
        match &self.database.path {
            Some(path) => path.clone(),
            None => storage.base_path().join(&self.database.file_name),
        }
    }

    /// Pins the database to `path`, resolved against the working directory
    /// so later runs from elsewhere open the same file.
    pub fn set_database_path(&mut self, path: &Path) -> Result<()> {
        self.database.path = Some(std::path::absolute(path)?);
        Ok(())
    }

    pub fn assets(&self, storage: &DataStorage) -> Assets {
        let dir = self.assets_dir.as_deref().unwrap_or(Path::new(DEFAULT_ASSETS_DIR));
        if dir.is_absolute() {
            Assets::new(dir)
        } else {
            Assets::new(storage.base_path().join(dir))
        }
    }

    /// Provisions and opens the configured store; failure is fatal for the caller.
    pub fn open_db(&self, storage: &DataStorage) -> Result<Db> {
        let path = self.database_path(storage);
        Db::provision(&path, &self.assets(storage))
            .map_err(|e| msg_error_anyhow!(Message::DbConnectionFailed(e.to_string())))
    }
}
