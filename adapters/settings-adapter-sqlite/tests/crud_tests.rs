//! Settings adapter storage tests
//!
//! Layer and setting CRUD, exact-match semantics, and hierarchy validation

use layered_settings_adapter_sqlite::{SettingsAdapterSqlite, SqliteOpts};
use layered_settings_types::prelude::*;
use layered_settings_types::settings_adapter::{SettingKey, SettingsAdapter};
use tempfile::TempDir;

async fn create_test_adapter() -> (SettingsAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = SettingsAdapterSqlite::new(temp_dir.path().join("settings.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

async fn create_layers(adapter: &SettingsAdapterSqlite) -> [LayerId; 3] {
	let system = adapter.create_layer("system", None).await.expect("Should create root");
	let account = adapter.create_layer("account", Some(system.id)).await.expect("Should create account");
	let user = adapter.create_layer("user", Some(account.id)).await.expect("Should create user");
	[system.id, account.id, user.id]
}

#[tokio::test]
async fn test_create_and_list_layers() {
	let (adapter, _temp) = create_test_adapter().await;
	let [system, account, user] = create_layers(&adapter).await;

	let layers = adapter.list_layers().await.expect("Should list layers");
	assert_eq!(layers.len(), 3);
	assert_eq!(layers[0].id, system);
	assert!(layers[0].is_root());
	assert_eq!(layers[2].fallback_id, Some(account));

	let layer = adapter.read_layer(user).await.expect("Should read layer");
	assert_eq!(layer.map(|l| l.name), Some("user".into()));
	assert_eq!(adapter.read_layer(LayerId(999)).await.expect("Should query"), None);

	let root = adapter.read_root_layer().await.expect("Should read root");
	assert_eq!(root.id, system);
}

#[tokio::test]
async fn test_root_layer_missing() {
	let (adapter, _temp) = create_test_adapter().await;

	let res = adapter.read_root_layer().await;
	assert!(matches!(res, Err(Error::ConfigError(_))));
}

#[tokio::test]
async fn test_second_root_rejected() {
	let (adapter, _temp) = create_test_adapter().await;
	create_layers(&adapter).await;

	let res = adapter.create_layer("other", None).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
	assert_eq!(adapter.list_layers().await.expect("Should list").len(), 3);
}

#[tokio::test]
async fn test_unknown_fallback_rejected() {
	let (adapter, _temp) = create_test_adapter().await;
	create_layers(&adapter).await;

	let res = adapter.create_layer("orphan", Some(LayerId(42))).await;
	assert!(matches!(res, Err(Error::ValidationError(msg)) if msg.contains("42")));
}

#[tokio::test]
async fn test_empty_layer_name_rejected() {
	let (adapter, _temp) = create_test_adapter().await;

	let res = adapter.create_layer("  ", None).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_update_and_read_setting() {
	let (adapter, _temp) = create_test_adapter().await;
	let [system, account, _] = create_layers(&adapter).await;

	let key = SettingKey::new("lights", system);
	let created = adapter.update_setting(&key, Some("0")).await.expect("Should create setting");
	let created = created.expect("Should return created setting");
	assert_eq!(&*created.value, "0");
	assert_eq!(created.entity_id, None);

	let key = SettingKey::new("lights", account).entity(EntityId(7));
	adapter.update_setting(&key, Some("10")).await.expect("Should create setting");
	let updated = adapter.update_setting(&key, Some("11")).await.expect("Should update setting");
	let updated = updated.expect("Should return updated setting");
	assert_eq!(&*updated.value, "11");

	let read = adapter.read_setting(&key).await.expect("Should read setting");
	assert_eq!(read, Some(updated));
	assert_eq!(adapter.list_settings(None).await.expect("Should list").len(), 2);
}

#[tokio::test]
async fn test_exact_match_semantics() {
	let (adapter, _temp) = create_test_adapter().await;
	let [_, account, _] = create_layers(&adapter).await;

	adapter
		.update_setting(&SettingKey::new("lights", account).entity(EntityId(5)), Some("e5"))
		.await
		.expect("Should create setting");
	adapter
		.update_setting(&SettingKey::new("lights", account).entity(EntityId(0)), Some("e0"))
		.await
		.expect("Should create setting");

	// NULL entity does not match a concrete row
	let res = adapter.read_setting(&SettingKey::new("lights", account)).await.expect("Should query");
	assert_eq!(res, None);

	// zero is a concrete id
	let res = adapter
		.read_setting(&SettingKey::new("lights", account).entity(EntityId(0)))
		.await
		.expect("Should query");
	assert_eq!(res.map(|s| s.value), Some("e0".into()));

	// a concrete id does not match a NULL row
	adapter
		.update_setting(&SettingKey::new("theme", account), Some("layer-wide"))
		.await
		.expect("Should create setting");
	let res = adapter
		.read_setting(&SettingKey::new("theme", account).entity(EntityId(5)))
		.await
		.expect("Should query");
	assert_eq!(res, None);

	// group qualifies the key as well
	let res = adapter
		.read_setting(&SettingKey::new("lights", account).entity(EntityId(5)).group(GroupId(1)))
		.await
		.expect("Should query");
	assert_eq!(res, None);
}

#[tokio::test]
async fn test_group_keyed_settings_are_distinct() {
	let (adapter, _temp) = create_test_adapter().await;
	let [_, account, _] = create_layers(&adapter).await;

	let plain = SettingKey::new("exclusive4", account).entity(EntityId(4));
	let grouped = plain.clone().group(GroupId(4));
	adapter.update_setting(&plain, Some("plain")).await.expect("Should create setting");
	adapter.update_setting(&grouped, Some("50")).await.expect("Should create setting");

	let res = adapter.read_setting(&grouped).await.expect("Should query");
	assert_eq!(res.map(|s| s.value), Some("50".into()));
	let res = adapter.read_setting(&plain).await.expect("Should query");
	assert_eq!(res.map(|s| s.value), Some("plain".into()));
}

#[tokio::test]
async fn test_delete_setting() {
	let (adapter, _temp) = create_test_adapter().await;
	let [system, _, _] = create_layers(&adapter).await;

	let key = SettingKey::new("lights", system);
	adapter.update_setting(&key, Some("0")).await.expect("Should create setting");
	let res = adapter.update_setting(&key, None).await.expect("Should delete setting");
	assert_eq!(res, None);
	assert_eq!(adapter.read_setting(&key).await.expect("Should query"), None);
}

#[tokio::test]
async fn test_setting_on_unknown_layer_rejected() {
	let (adapter, _temp) = create_test_adapter().await;
	create_layers(&adapter).await;

	let res = adapter.update_setting(&SettingKey::new("lights", LayerId(99)), Some("x")).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_list_settings_by_prefix() {
	let (adapter, _temp) = create_test_adapter().await;
	let [system, _, _] = create_layers(&adapter).await;

	for name in ["ui.theme", "ui.lang", "lights"] {
		adapter
			.update_setting(&SettingKey::new(name, system), Some("v"))
			.await
			.expect("Should create setting");
	}

	let ui = adapter.list_settings(Some("ui.")).await.expect("Should list");
	assert_eq!(ui.len(), 2);
	assert!(ui.iter().all(|s| s.name.starts_with("ui.")));
}

#[tokio::test]
async fn test_with_opts_creates_directory() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let opts = SqliteOpts { db_path: temp_dir.path().join("nested/dir/settings.db"), max_connections: 1 };

	let adapter = SettingsAdapterSqlite::with_opts(&opts).await.expect("Should open database");
	assert!(adapter.list_layers().await.expect("Should list").is_empty());
	assert!(opts.db_path.exists());
}

#[tokio::test]
async fn test_reopen_keeps_data() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let path = temp_dir.path().join("settings.db");

	{
		let adapter = SettingsAdapterSqlite::new(&path).await.expect("Should open database");
		create_layers(&adapter).await;
	}

	let adapter = SettingsAdapterSqlite::new(&path).await.expect("Should reopen database");
	assert_eq!(adapter.list_layers().await.expect("Should list").len(), 3);
}

// vim: ts=4
