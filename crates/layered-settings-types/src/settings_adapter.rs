//! Storage collaborator for layered settings.
//!
//! The resolver only reads through this trait. The administrative methods are
//! used by provisioning tools and tests; they must keep the hierarchy
//! invariants (a single root layer, fallbacks pointing at existing layers).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// A tier of the override hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
	pub id: LayerId,
	pub name: Box<str>,
	/// Coarser layer consulted when this one has no value. `None` for the root layer.
	#[serde(rename = "fallbackId")]
	pub fallback_id: Option<LayerId>,
}

impl Layer {
	pub fn is_root(&self) -> bool {
		self.fallback_id.is_none()
	}
}

/// A stored setting record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
	pub id: SettingId,
	pub name: Box<str>,
	pub value: Box<str>,
	#[serde(rename = "layerId")]
	pub layer_id: LayerId,
	/// `None` marks a layer-wide default not tied to any entity
	#[serde(rename = "entityId")]
	pub entity_id: Option<EntityId>,
	#[serde(rename = "groupId")]
	pub group_id: Option<GroupId>,
}

/// Exact-match lookup key of a setting.
///
/// `None` columns only match rows where the column is NULL, a concrete id
/// only matches that id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingKey {
	pub name: Box<str>,
	pub layer_id: LayerId,
	pub entity_id: Option<EntityId>,
	pub group_id: Option<GroupId>,
}

impl SettingKey {
	pub fn new(name: impl Into<Box<str>>, layer_id: LayerId) -> Self {
		Self { name: name.into(), layer_id, entity_id: None, group_id: None }
	}

	pub fn entity(mut self, entity_id: impl Into<Option<EntityId>>) -> Self {
		self.entity_id = entity_id.into();
		self
	}

	pub fn group(mut self, group_id: impl Into<Option<GroupId>>) -> Self {
		self.group_id = group_id.into();
		self
	}

	/// Whether a stored record is addressed by this key
	pub fn matches(&self, setting: &Setting) -> bool {
		*setting.name == *self.name
			&& setting.layer_id == self.layer_id
			&& setting.entity_id == self.entity_id
			&& setting.group_id == self.group_id
	}
}

impl std::fmt::Display for SettingKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}@{}", self.name, self.layer_id)?;
		if let Some(entity_id) = self.entity_id {
			write!(f, "/e{}", entity_id)?;
		}
		if let Some(group_id) = self.group_id {
			write!(f, "/g{}", group_id)?;
		}
		Ok(())
	}
}

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	// Layers
	//********
	/// List every layer of the hierarchy
	async fn list_layers(&self) -> LsResult<Vec<Layer>>;

	/// Read a layer by id
	async fn read_layer(&self, layer_id: LayerId) -> LsResult<Option<Layer>>;

	/// Read the unique layer without a fallback.
	///
	/// Returns `Error::ConfigError` when there is no such layer or more than one.
	async fn read_root_layer(&self) -> LsResult<Layer>;

	/// Create a layer. Creating a second root layer, or pointing at an unknown
	/// fallback layer, is rejected with `Error::ValidationError`.
	async fn create_layer(&self, name: &str, fallback_id: Option<LayerId>) -> LsResult<Layer>;

	// Settings
	//**********
	/// Exact-match point lookup
	async fn read_setting(&self, key: &SettingKey) -> LsResult<Option<Setting>>;

	/// Create or replace a setting, or delete it when `value` is `None`
	async fn update_setting(&self, key: &SettingKey, value: Option<&str>)
		-> LsResult<Option<Setting>>;

	/// List settings, optionally filtered by a name prefix
	async fn list_settings(&self, prefix: Option<&str>) -> LsResult<Vec<Setting>>;
}


// vim: ts=4
