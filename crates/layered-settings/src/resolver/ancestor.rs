//! Ancestor-chain strategy

use super::Resolver;
use crate::prelude::*;
use layered_settings_types::settings_adapter::{Setting, SettingKey};

impl Resolver<'_> {
	/// Resolve `name` for `entity_id` starting at `layer_id`.
	///
	/// On a miss the first remaining ancestor becomes the entity at the
	/// fallback layer. Once the ancestors run out, or the layer has no
	/// fallback, only the global default is consulted. A request made without
	/// entity and without ancestors stops at the exact lookup.
	pub async fn resolve_ancestors(
		&self,
		name: &str,
		layer_id: LayerId,
		entity_id: Option<EntityId>,
		ancestors: &[Option<EntityId>],
	) -> LsResult<Option<Setting>> {
		let limit = self.step_limit(ancestors.len());
		let mut layer_id = layer_id;
		let mut entity_id = entity_id;
		let mut remaining = ancestors;
		let qualified = entity_id.is_some() || !ancestors.is_empty();

		for _ in 0..limit {
			let key = SettingKey::new(name, layer_id).entity(entity_id);
			if let Some(setting) = self.lookup(&key).await? {
				return Ok(Some(setting));
			}

			if !qualified {
				return Ok(None);
			}

			if let Some((next, rest)) = remaining.split_first() {
				if let Some(fallback_id) = self.registry.fallback_of(layer_id) {
					debug!("Setting '{}': falling back from layer {} to {}", name, layer_id, fallback_id);
					layer_id = fallback_id;
					entity_id = *next;
					remaining = rest;
					continue;
				}
			}

			if entity_id.is_none() && layer_id == self.registry.root().id {
				// the global default was the lookup just made
				return Ok(None);
			}

			debug!("Setting '{}': no override above layer {}, using global default", name, layer_id);
			return self.global_default(name).await;
		}

		Err(Error::ConfigError(format!(
			"Resolving '{}' exceeded {} hierarchy steps",
			name, limit
		)))
	}
}

// vim: ts=4
