//! Settings service - main interface for resolving settings

use parking_lot::RwLock;
use std::sync::Arc;

use crate::context::EntityContext;
use crate::prelude::*;
use crate::registry::FrozenLayerRegistry;
use crate::resolver::{Resolver, StorageScheme};
use layered_settings_types::settings_adapter::{Setting, SettingsAdapter};

/// Resolves settings against a storage adapter and a validated layer snapshot.
///
/// Calls are independent and read-only. No values are cached; every
/// hierarchy step is a lookup through the adapter.
pub struct SettingsService {
	adapter: Arc<dyn SettingsAdapter>,
	registry: RwLock<Arc<FrozenLayerRegistry>>,
	scheme: StorageScheme,
}

impl SettingsService {
	pub fn new(
		adapter: Arc<dyn SettingsAdapter>,
		registry: Arc<FrozenLayerRegistry>,
		scheme: StorageScheme,
	) -> Self {
		Self { adapter, registry: RwLock::new(registry), scheme }
	}

	/// Resolve a setting record with full fallback
	pub async fn resolve(
		&self,
		name: &str,
		layer_id: LayerId,
		ctx: &EntityContext,
	) -> LsResult<Option<Setting>> {
		let registry = self.registry();
		let res =
			Resolver::new(self.adapter.as_ref(), &registry).resolve(self.scheme, name, layer_id, ctx).await?;

		match &res {
			Some(setting) => debug!(
				"Resolved '{}' at layer {} from layer {} (entity {:?})",
				name, layer_id, setting.layer_id, setting.entity_id
			),
			None => debug!("Setting '{}' is not set at layer {} or above", name, layer_id),
		}
		Ok(res)
	}

	/// Resolve a setting value with full fallback
	pub async fn get(
		&self,
		name: &str,
		layer_id: LayerId,
		ctx: &EntityContext,
	) -> LsResult<Option<String>> {
		Ok(self.resolve(name, layer_id, ctx).await?.map(|setting| setting.value.into()))
	}

	/// The global default of a setting, held by the root layer
	pub async fn get_default(&self, name: &str) -> LsResult<Option<String>> {
		let registry = self.registry();
		let res = Resolver::new(self.adapter.as_ref(), &registry).global_default(name).await?;
		Ok(res.map(|setting| setting.value.into()))
	}

	/// Replace the layer snapshot after the hierarchy was changed.
	///
	/// The new snapshot is validated before it is swapped in; on error the
	/// previous snapshot stays active.
	pub async fn reload_layers(&self) -> LsResult<()> {
		let registry = FrozenLayerRegistry::load(self.adapter.as_ref()).await?;
		info!("Reloaded layer registry with {} layers", registry.len());
		*self.registry.write() = Arc::new(registry);
		Ok(())
	}

	/// Current layer snapshot
	pub fn registry(&self) -> Arc<FrozenLayerRegistry> {
		self.registry.read().clone()
	}

	pub fn scheme(&self) -> StorageScheme {
		self.scheme
	}

	pub fn adapter(&self) -> &Arc<dyn SettingsAdapter> {
		&self.adapter
	}
}

impl std::fmt::Debug for SettingsService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsService")
			.field("adapter", &self.adapter)
			.field("layers", &self.registry.read().len())
			.field("scheme", &self.scheme)
			.finish()
	}
}

// vim: ts=4
