//! Group-indirection strategy

use super::Resolver;
use crate::prelude::*;
use layered_settings_types::settings_adapter::{Setting, SettingKey};

impl Resolver<'_> {
	/// Resolve `name` for an entity and/or setting group starting at `layer_id`.
	///
	/// Entity narrowing only applies at the starting layer; the group is kept
	/// while climbing. At the root layer a last attempt is made without entity
	/// and group. A request with neither entity nor group stops at the exact
	/// lookup.
	pub async fn resolve_group(
		&self,
		name: &str,
		layer_id: LayerId,
		entity_id: Option<EntityId>,
		group_id: Option<GroupId>,
	) -> LsResult<Option<Setting>> {
		let limit = self.step_limit(0);
		let mut layer_id = layer_id;
		let mut entity_id = entity_id;
		let qualified = entity_id.is_some() || group_id.is_some();

		for _ in 0..limit {
			let key = SettingKey::new(name, layer_id).entity(entity_id).group(group_id);
			if let Some(setting) = self.lookup(&key).await? {
				return Ok(Some(setting));
			}

			if !qualified {
				return Ok(None);
			}

			match self.registry.fallback_of(layer_id) {
				Some(fallback_id) => {
					debug!("Setting '{}': falling back from layer {} to {}", name, layer_id, fallback_id);
					layer_id = fallback_id;
					entity_id = None;
				}
				None if entity_id.is_none() && group_id.is_none() => return Ok(None),
				None => {
					debug!("Setting '{}': trying unqualified global default", name);
					return self.global_default(name).await;
				}
			}
		}

		Err(Error::ConfigError(format!(
			"Resolving '{}' exceeded {} hierarchy steps",
			name, limit
		)))
	}
}

// vim: ts=4
