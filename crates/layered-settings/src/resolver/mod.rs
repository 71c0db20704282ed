//! Setting resolution over the layer hierarchy
//!
//! Two storage schemes exist:
//! - **Ancestor chain** (`ancestor.rs`): the caller supplies the entity's
//!   ancestors, layer and entity advance together one step at a time.
//! - **Group indirection** (`group.rs`): rows are additionally keyed by a
//!   setting group; only the group carries across the layer fallback.
//!
//! A deployment uses one scheme. [`Resolver::resolve`] dispatches an
//! [`EntityContext`] to the strategy of that scheme.

mod ancestor;
mod group;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::context::EntityContext;
use crate::prelude::*;
use crate::registry::FrozenLayerRegistry;
use layered_settings_types::settings_adapter::{Setting, SettingKey, SettingsAdapter};

/// Storage scheme of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageScheme {
	/// Caller-supplied ancestor ids, one per coarser layer
	#[default]
	AncestorChain,
	/// Settings keyed by a shared setting group
	GroupIndirection,
}

impl std::fmt::Display for StorageScheme {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			StorageScheme::AncestorChain => write!(f, "ancestor_chain"),
			StorageScheme::GroupIndirection => write!(f, "group_indirection"),
		}
	}
}

impl FromStr for StorageScheme {
	type Err = Error;

	fn from_str(s: &str) -> LsResult<Self> {
		match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
			"ancestor_chain" | "ancestors" => Ok(StorageScheme::AncestorChain),
			"group_indirection" | "group" => Ok(StorageScheme::GroupIndirection),
			other => Err(Error::ConfigError(format!("Unknown storage scheme: {}", other))),
		}
	}
}

/// Stateless, read-only resolver borrowing the storage adapter and a
/// validated layer snapshot. Every step is a point lookup, nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
	adapter: &'a dyn SettingsAdapter,
	registry: &'a FrozenLayerRegistry,
}

impl<'a> Resolver<'a> {
	pub fn new(adapter: &'a dyn SettingsAdapter, registry: &'a FrozenLayerRegistry) -> Self {
		Self { adapter, registry }
	}

	/// Resolve `name` at `layer_id` for the given entity context.
	///
	/// `None`/`EntityOnly` contexts run through the strategy of `scheme`.
	/// Ancestor contexts require the ancestor-chain scheme and group contexts
	/// the group-indirection scheme.
	pub async fn resolve(
		&self,
		scheme: StorageScheme,
		name: &str,
		layer_id: LayerId,
		ctx: &EntityContext,
	) -> LsResult<Option<Setting>> {
		match (scheme, ctx) {
			(StorageScheme::AncestorChain, EntityContext::EntityWithGroup(..))
			| (StorageScheme::GroupIndirection, EntityContext::EntityWithAncestors(..)) => {
				Err(Error::ConfigError(format!(
					"Context {:?} is not supported by the {} storage scheme",
					ctx, scheme
				)))
			}
			(StorageScheme::AncestorChain, _) => {
				self.resolve_ancestors(name, layer_id, ctx.entity_id(), ctx.ancestors()).await
			}
			(StorageScheme::GroupIndirection, _) => {
				self.resolve_group(name, layer_id, ctx.entity_id(), ctx.group_id()).await
			}
		}
	}

	/// The unqualified global default held by the root layer
	pub async fn global_default(&self, name: &str) -> LsResult<Option<Setting>> {
		self.lookup(&SettingKey::new(name, self.registry.root().id)).await
	}

	async fn lookup(&self, key: &SettingKey) -> LsResult<Option<Setting>> {
		let res = self.adapter.read_setting(key).await?;
		match &res {
			Some(setting) => debug!("Setting lookup {}: hit (id={})", key, setting.id),
			None => debug!("Setting lookup {}: miss", key),
		}
		Ok(res)
	}

	/// Upper bound of hierarchy steps for a request carrying `ancestors` ids.
	/// Reaching it means the snapshot no longer describes a finite chain.
	fn step_limit(&self, ancestors: usize) -> usize {
		ancestors + self.registry.len() + 2
	}
}


// vim: ts=4
