//! Shared helpers for the SQLite adapter

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use layered_settings_types::prelude::*;
use layered_settings_types::settings_adapter::{Layer, Setting};

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Log a driver error and map it to `Error::DbError`
pub(crate) fn db_err(err: sqlx::Error) -> Error {
	inspect(&err);
	Error::DbError
}

pub(crate) fn layer_from_row(row: &SqliteRow) -> LsResult<Layer> {
	Ok(Layer {
		id: LayerId(row.try_get("id").map_err(db_err)?),
		name: row.try_get::<String, _>("name").map_err(db_err)?.into(),
		fallback_id: row.try_get::<Option<i64>, _>("fallback_id").map_err(db_err)?.map(LayerId),
	})
}

pub(crate) fn setting_from_row(row: &SqliteRow) -> LsResult<Setting> {
	Ok(Setting {
		id: SettingId(row.try_get("id").map_err(db_err)?),
		name: row.try_get::<String, _>("name").map_err(db_err)?.into(),
		value: row.try_get::<String, _>("value").map_err(db_err)?.into(),
		layer_id: LayerId(row.try_get("layer_id").map_err(db_err)?),
		entity_id: row.try_get::<Option<i64>, _>("entity_id").map_err(db_err)?.map(EntityId),
		group_id: row.try_get::<Option<i64>, _>("group_id").map_err(db_err)?.map(GroupId),
	})
}

// vim: ts=4
