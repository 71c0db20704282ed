//! Layer storage
//!
//! Layers are only created, never re-parented, so a fallback always points
//! at an older layer and the chain cannot form a cycle.

use sqlx::SqlitePool;

use crate::utils::{db_err, layer_from_row};
use layered_settings_types::prelude::*;
use layered_settings_types::settings_adapter::Layer;

pub(crate) async fn list(db: &SqlitePool) -> LsResult<Vec<Layer>> {
	let rows = sqlx::query("SELECT id, name, fallback_id FROM settings__layer ORDER BY id")
		.fetch_all(db)
		.await
		.map_err(db_err)?;

	rows.iter().map(layer_from_row).collect()
}

pub(crate) async fn read(db: &SqlitePool, layer_id: LayerId) -> LsResult<Option<Layer>> {
	let row = sqlx::query("SELECT id, name, fallback_id FROM settings__layer WHERE id = ?")
		.bind(layer_id.0)
		.fetch_optional(db)
		.await
		.map_err(db_err)?;

	row.as_ref().map(layer_from_row).transpose()
}

pub(crate) async fn read_root(db: &SqlitePool) -> LsResult<Layer> {
	let rows =
		sqlx::query("SELECT id, name, fallback_id FROM settings__layer WHERE fallback_id IS NULL")
			.fetch_all(db)
			.await
			.map_err(db_err)?;

	match rows.as_slice() {
		[row] => layer_from_row(row),
		[] => Err(Error::ConfigError("No root layer defined".into())),
		_ => Err(Error::ConfigError(format!(
			"{} layers have no fallback, exactly one root layer is allowed",
			rows.len()
		))),
	}
}

pub(crate) async fn create(
	db: &SqlitePool,
	name: &str,
	fallback_id: Option<LayerId>,
) -> LsResult<Layer> {
	if name.trim().is_empty() {
		return Err(Error::ValidationError("Layer name must not be empty".into()));
	}

	let mut tx = db.begin().await.map_err(db_err)?;

	match fallback_id {
		None => {
			let root = sqlx::query("SELECT id FROM settings__layer WHERE fallback_id IS NULL")
				.fetch_optional(&mut *tx)
				.await
				.map_err(db_err)?;
			if root.is_some() {
				return Err(Error::ValidationError(
					"A root layer already exists, new layers need a fallback".into(),
				));
			}
		}
		Some(fallback_id) => {
			let fallback = sqlx::query("SELECT id FROM settings__layer WHERE id = ?")
				.bind(fallback_id.0)
				.fetch_optional(&mut *tx)
				.await
				.map_err(db_err)?;
			if fallback.is_none() {
				return Err(Error::ValidationError(format!(
					"Fallback layer {} does not exist",
					fallback_id
				)));
			}
		}
	}

	let res = sqlx::query("INSERT INTO settings__layer (name, fallback_id) VALUES (?, ?)")
		.bind(name)
		.bind(fallback_id.map(|id| id.0))
		.execute(&mut *tx)
		.await
		.map_err(db_err)?;
	tx.commit().await.map_err(db_err)?;

	let layer = Layer { id: LayerId(res.last_insert_rowid()), name: name.into(), fallback_id };
	info!("Layer '{}' created with id {} (fallback {:?})", layer.name, layer.id, fallback_id);
	Ok(layer)
}

// vim: ts=4
