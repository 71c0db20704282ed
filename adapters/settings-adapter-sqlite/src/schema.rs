//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Layers
	//********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings__layer (
		id integer NOT NULL,
		name text NOT NULL,
		fallback_id integer REFERENCES settings__layer(id),
		PRIMARY KEY(id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	// At most one layer without fallback
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_layer_root
		ON settings__layer(ifnull(fallback_id, 0)) WHERE fallback_id IS NULL",
	)
	.execute(&mut *tx)
	.await?;

	// Settings
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings__setting (
		id integer NOT NULL,
		name text NOT NULL,
		value text NOT NULL,
		layer_id integer NOT NULL REFERENCES settings__layer(id),
		entity_id integer,
		group_id integer,
		PRIMARY KEY(id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	// NULL entity/group is a distinct key value, never equal to a concrete id
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_setting_key
		ON settings__setting(name, layer_id, ifnull(entity_id, ''), ifnull(group_id, ''))",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
