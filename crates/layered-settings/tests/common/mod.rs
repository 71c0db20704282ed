//! In-memory settings adapter and fixtures shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use layered_settings::prelude::*;
use layered_settings::{Layer, Setting, SettingKey, SettingsAdapter};

pub const SYSTEM: LayerId = LayerId(1);
pub const ACCOUNT: LayerId = LayerId(2);
pub const GROUP: LayerId = LayerId(3);
pub const USER: LayerId = LayerId(4);

#[derive(Debug, Default)]
pub struct MemoryAdapter {
	layers: RwLock<Vec<Layer>>,
	settings: RwLock<Vec<Setting>>,
	next_id: AtomicUsize,
	lookups: AtomicUsize,
	failing: AtomicBool,
}

impl MemoryAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// system(root) <- account <- group <- user
	pub fn with_standard_layers() -> Self {
		let adapter = Self::new();
		adapter.insert_layer(SYSTEM, "system", None);
		adapter.insert_layer(ACCOUNT, "account", Some(SYSTEM));
		adapter.insert_layer(GROUP, "group", Some(ACCOUNT));
		adapter.insert_layer(USER, "user", Some(GROUP));
		adapter
	}

	/// Insert a layer without any validation
	pub fn insert_layer(&self, id: LayerId, name: &str, fallback_id: Option<LayerId>) {
		self.layers.write().push(Layer { id, name: name.into(), fallback_id });
	}

	pub fn set(
		&self,
		name: &str,
		value: &str,
		layer_id: LayerId,
		entity_id: Option<i64>,
		group_id: Option<i64>,
	) -> Setting {
		let key = SettingKey::new(name, layer_id)
			.entity(entity_id.map(EntityId))
			.group(group_id.map(GroupId));
		let mut settings = self.settings.write();
		settings.retain(|s| !key.matches(s));
		let setting = Setting {
			id: SettingId(self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1),
			name: key.name.clone(),
			value: value.into(),
			layer_id,
			entity_id: key.entity_id,
			group_id: key.group_id,
		};
		settings.push(setting.clone());
		setting
	}

	pub fn lookups(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}

	pub fn reset_lookups(&self) {
		self.lookups.store(0, Ordering::SeqCst);
	}

	pub fn set_failing(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}

	fn check(&self) -> LsResult<()> {
		if self.failing.load(Ordering::SeqCst) { Err(Error::DbError) } else { Ok(()) }
	}
}

#[async_trait]
impl SettingsAdapter for MemoryAdapter {
	async fn list_layers(&self) -> LsResult<Vec<Layer>> {
		self.check()?;
		Ok(self.layers.read().clone())
	}

	async fn read_layer(&self, layer_id: LayerId) -> LsResult<Option<Layer>> {
		self.check()?;
		Ok(self.layers.read().iter().find(|l| l.id == layer_id).cloned())
	}

	async fn read_root_layer(&self) -> LsResult<Layer> {
		self.check()?;
		let layers = self.layers.read();
		let roots: Vec<&Layer> = layers.iter().filter(|l| l.is_root()).collect();
		match roots.as_slice() {
			[root] => Ok((*root).clone()),
			_ => Err(Error::ConfigError(format!("{} root layers", roots.len()))),
		}
	}

	async fn create_layer(&self, name: &str, fallback_id: Option<LayerId>) -> LsResult<Layer> {
		self.check()?;
		let mut layers = self.layers.write();
		match fallback_id {
			None if layers.iter().any(Layer::is_root) => {
				return Err(Error::ValidationError("root layer already exists".into()));
			}
			Some(fallback_id) if !layers.iter().any(|l| l.id == fallback_id) => {
				return Err(Error::ValidationError("unknown fallback layer".into()));
			}
			_ => {}
		}
		let id = LayerId(layers.iter().map(|l| l.id.0).max().unwrap_or(0) + 1);
		let layer = Layer { id, name: name.into(), fallback_id };
		layers.push(layer.clone());
		Ok(layer)
	}

	async fn read_setting(&self, key: &SettingKey) -> LsResult<Option<Setting>> {
		self.check()?;
		self.lookups.fetch_add(1, Ordering::SeqCst);
		Ok(self.settings.read().iter().find(|s| key.matches(s)).cloned())
	}

	async fn update_setting(
		&self,
		key: &SettingKey,
		value: Option<&str>,
	) -> LsResult<Option<Setting>> {
		self.check()?;
		match value {
			Some(value) => Ok(Some(self.set(
				&key.name,
				value,
				key.layer_id,
				key.entity_id.map(|id| id.0),
				key.group_id.map(|id| id.0),
			))),
			None => {
				self.settings.write().retain(|s| !key.matches(s));
				Ok(None)
			}
		}
	}

	async fn list_settings(&self, prefix: Option<&str>) -> LsResult<Vec<Setting>> {
		self.check()?;
		Ok(self
			.settings
			.read()
			.iter()
			.filter(|s| prefix.is_none_or(|p| s.name.starts_with(p)))
			.cloned()
			.collect())
	}
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

// vim: ts=4
