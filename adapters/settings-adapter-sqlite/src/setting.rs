//! Setting record storage
//!
//! Lookups are exact: `IS ?` matches NULL only against a NULL binding and a
//! concrete id only against the same id.

use sqlx::SqlitePool;

use crate::utils::{db_err, setting_from_row};
use layered_settings_types::prelude::*;
use layered_settings_types::settings_adapter::{Setting, SettingKey};

const SELECT: &str = "SELECT id, name, value, layer_id, entity_id, group_id FROM settings__setting";

/// Read a single setting by its exact key
pub(crate) async fn read(db: &SqlitePool, key: &SettingKey) -> LsResult<Option<Setting>> {
	let row = sqlx::query(&format!(
		"{} WHERE name = ? AND layer_id = ? AND entity_id IS ? AND group_id IS ?",
		SELECT
	))
	.bind(&*key.name)
	.bind(key.layer_id.0)
	.bind(key.entity_id.map(|id| id.0))
	.bind(key.group_id.map(|id| id.0))
	.fetch_optional(db)
	.await
	.map_err(db_err)?;

	row.as_ref().map(setting_from_row).transpose()
}

/// List all settings or filter by a name prefix
pub(crate) async fn list(db: &SqlitePool, prefix: Option<&str>) -> LsResult<Vec<Setting>> {
	let rows = if let Some(prefix) = prefix {
		sqlx::query(&format!("{} WHERE name LIKE ? || '%' ORDER BY name, layer_id, id", SELECT))
			.bind(prefix)
			.fetch_all(db)
			.await
			.map_err(db_err)?
	} else {
		sqlx::query(&format!("{} ORDER BY name, layer_id, id", SELECT))
			.fetch_all(db)
			.await
			.map_err(db_err)?
	};

	rows.iter().map(setting_from_row).collect()
}

/// Update or create a setting, delete it if value is None
pub(crate) async fn update(
	db: &SqlitePool,
	key: &SettingKey,
	value: Option<&str>,
) -> LsResult<Option<Setting>> {
	let Some(value) = value else {
		sqlx::query(
			"DELETE FROM settings__setting
			WHERE name = ? AND layer_id = ? AND entity_id IS ? AND group_id IS ?",
		)
		.bind(&*key.name)
		.bind(key.layer_id.0)
		.bind(key.entity_id.map(|id| id.0))
		.bind(key.group_id.map(|id| id.0))
		.execute(db)
		.await
		.map_err(db_err)?;

		info!("Setting {} deleted", key);
		return Ok(None);
	};

	if key.name.trim().is_empty() {
		return Err(Error::ValidationError("Setting name must not be empty".into()));
	}

	let mut tx = db.begin().await.map_err(db_err)?;

	let layer = sqlx::query("SELECT id FROM settings__layer WHERE id = ?")
		.bind(key.layer_id.0)
		.fetch_optional(&mut *tx)
		.await
		.map_err(db_err)?;
	if layer.is_none() {
		return Err(Error::ValidationError(format!("Layer {} does not exist", key.layer_id)));
	}

	let res = sqlx::query(
		"UPDATE settings__setting SET value = ?
		WHERE name = ? AND layer_id = ? AND entity_id IS ? AND group_id IS ?",
	)
	.bind(value)
	.bind(&*key.name)
	.bind(key.layer_id.0)
	.bind(key.entity_id.map(|id| id.0))
	.bind(key.group_id.map(|id| id.0))
	.execute(&mut *tx)
	.await
	.map_err(db_err)?;

	if res.rows_affected() == 0 {
		sqlx::query(
			"INSERT INTO settings__setting (name, value, layer_id, entity_id, group_id)
			VALUES (?, ?, ?, ?, ?)",
		)
		.bind(&*key.name)
		.bind(value)
		.bind(key.layer_id.0)
		.bind(key.entity_id.map(|id| id.0))
		.bind(key.group_id.map(|id| id.0))
		.execute(&mut *tx)
		.await
		.map_err(db_err)?;
	}
	tx.commit().await.map_err(db_err)?;

	info!("Setting {} updated", key);
	read(db, key).await
}

// vim: ts=4
