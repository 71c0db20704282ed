//! SQLite storage adapter for layered settings.
//!
//! Stores layers in `settings__layer` and setting records in
//! `settings__setting`. Administrative writes run in a transaction and keep
//! the hierarchy invariants; reads are plain point lookups.

#![forbid(unsafe_code)]

mod layer;
mod schema;
mod setting;
mod utils;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{self, SqlitePool};
use std::path::{Path, PathBuf};

use layered_settings_types::prelude::*;
use layered_settings_types::settings_adapter::{Layer, Setting, SettingKey, SettingsAdapter};

use crate::utils::db_err;

/// Environment variable holding the database file path
pub const ENV_DB_PATH: &str = "LS_DB_PATH";
/// Environment variable holding the connection pool size
pub const ENV_MAX_CONNECTIONS: &str = "LS_MAX_CONNECTIONS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteOpts {
	pub db_path: PathBuf,
	pub max_connections: u32,
}

impl Default for SqliteOpts {
	fn default() -> Self {
		Self { db_path: PathBuf::from("./data/settings.db"), max_connections: 5 }
	}
}

impl SqliteOpts {
	/// Read options from the environment, using defaults for unset variables
	pub fn from_env() -> LsResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LsResult<Self> {
		let mut opts = Self::default();
		if let Some(db_path) = lookup(ENV_DB_PATH) {
			opts.db_path = PathBuf::from(db_path);
		}
		if let Some(max_connections) = lookup(ENV_MAX_CONNECTIONS) {
			opts.max_connections = match max_connections.trim().parse::<u32>() {
				Ok(n) if n > 0 => n,
				_ => {
					return Err(Error::ConfigError(format!(
						"{} must be a positive integer, got '{}'",
						ENV_MAX_CONNECTIONS, max_connections
					)));
				}
			};
		}
		Ok(opts)
	}
}

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
}

impl SettingsAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> LsResult<Self> {
		Self::with_opts(&SqliteOpts { db_path: path.as_ref().to_path_buf(), ..SqliteOpts::default() })
			.await
	}

	pub async fn with_opts(opts: &SqliteOpts) -> LsResult<Self> {
		if let Some(parent) = opts.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await.map_err(|err| {
				warn!("Cannot create database directory {}: {}", parent.display(), err);
				Error::DbError
			})?;
		}

		let conn_opts = sqlite::SqliteConnectOptions::new()
			.filename(&opts.db_path)
			.create_if_missing(true)
			.foreign_keys(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(opts.max_connections)
			.connect_with(conn_opts)
			.await
			.map_err(db_err)?;

		schema::init_db(&db).await.map_err(db_err)?;

		info!("Settings database opened at {}", opts.db_path.display());
		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterSqlite {
	// Layers
	//********
	async fn list_layers(&self) -> LsResult<Vec<Layer>> {
		layer::list(&self.db).await
	}

	async fn read_layer(&self, layer_id: LayerId) -> LsResult<Option<Layer>> {
		layer::read(&self.db, layer_id).await
	}

	async fn read_root_layer(&self) -> LsResult<Layer> {
		layer::read_root(&self.db).await
	}

	async fn create_layer(&self, name: &str, fallback_id: Option<LayerId>) -> LsResult<Layer> {
		layer::create(&self.db, name, fallback_id).await
	}

	// Settings
	//**********
	async fn read_setting(&self, key: &SettingKey) -> LsResult<Option<Setting>> {
		setting::read(&self.db, key).await
	}

	async fn update_setting(
		&self,
		key: &SettingKey,
		value: Option<&str>,
	) -> LsResult<Option<Setting>> {
		setting::update(&self.db, key, value).await
	}

	async fn list_settings(&self, prefix: Option<&str>) -> LsResult<Vec<Setting>> {
		setting::list(&self.db, prefix).await
	}
}


// vim: ts=4
