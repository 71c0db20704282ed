//! Layer registry
//!
//! The mutable [`LayerRegistry`] collects layers while loading. Freezing it
//! validates the hierarchy once, so resolution runs against a snapshot known
//! to have exactly one root and no fallback cycles.

use std::collections::HashMap;

use crate::prelude::*;
use layered_settings_types::settings_adapter::{Layer, SettingsAdapter};

/// Mutable registry used while loading the hierarchy
#[derive(Debug, Default)]
pub struct LayerRegistry {
	layers: HashMap<LayerId, Layer>,
}

impl LayerRegistry {
	pub fn new() -> Self {
		Self { layers: HashMap::new() }
	}

	pub fn from_layers(layers: impl IntoIterator<Item = Layer>) -> LsResult<Self> {
		let mut registry = Self::new();
		for layer in layers {
			registry.register(layer)?;
		}
		Ok(registry)
	}

	/// Register a layer. Ids must be unique.
	pub fn register(&mut self, layer: Layer) -> LsResult<()> {
		if self.layers.contains_key(&layer.id) {
			return Err(Error::ConfigError(format!("Layer {} is already registered", layer.id)));
		}

		debug!("Registering layer: {} ({})", layer.id, layer.name);
		self.layers.insert(layer.id, layer);
		Ok(())
	}

	/// Validate the hierarchy and make it immutable
	pub fn freeze(self) -> LsResult<FrozenLayerRegistry> {
		let mut roots = self.layers.values().filter(|layer| layer.is_root());
		let root = match (roots.next(), roots.next()) {
			(Some(root), None) => root.clone(),
			(None, _) => return Err(Error::ConfigError("No root layer defined".into())),
			(Some(_), Some(_)) => {
				let count = self.layers.values().filter(|layer| layer.is_root()).count();
				return Err(Error::ConfigError(format!(
					"{} layers have no fallback, exactly one root layer is allowed",
					count
				)));
			}
		};

		for layer in self.layers.values() {
			if let Some(fallback_id) = layer.fallback_id {
				if !self.layers.contains_key(&fallback_id) {
					return Err(Error::ConfigError(format!(
						"Layer {} falls back to unknown layer {}",
						layer.id, fallback_id
					)));
				}
			}
			walk_to_root(&self.layers, layer.id)?;
		}

		info!("Freezing layer registry with {} layers, root layer {}", self.layers.len(), root.id);
		Ok(FrozenLayerRegistry { layers: self.layers, root })
	}

	pub fn len(&self) -> usize {
		self.layers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}
}

/// Follow the fallback chain of `start`, returning the visited ids ending with the root.
///
/// The walk is bounded by the number of layers; exceeding it means a cycle.
fn walk_to_root(layers: &HashMap<LayerId, Layer>, start: LayerId) -> LsResult<Vec<LayerId>> {
	let mut chain = Vec::new();
	let mut current = Some(start);

	while let Some(layer_id) = current {
		if chain.len() >= layers.len() {
			return Err(Error::ConfigError(format!(
				"Fallback cycle detected starting from layer {}",
				start
			)));
		}
		chain.push(layer_id);
		current = layers.get(&layer_id).and_then(|layer| layer.fallback_id);
	}

	Ok(chain)
}

/// Immutable, validated snapshot of the layer hierarchy
#[derive(Debug, Clone)]
pub struct FrozenLayerRegistry {
	layers: HashMap<LayerId, Layer>,
	root: Layer,
}

impl FrozenLayerRegistry {
	/// Load every layer through the adapter and validate the result
	pub async fn load(adapter: &dyn SettingsAdapter) -> LsResult<Self> {
		let layers = adapter.list_layers().await?;
		LayerRegistry::from_layers(layers)?.freeze()
	}

	pub fn find(&self, layer_id: LayerId) -> Option<&Layer> {
		self.layers.get(&layer_id)
	}

	/// The unique layer without fallback, holding the global defaults
	pub fn root(&self) -> &Layer {
		&self.root
	}

	/// Fallback of a layer. `None` for the root and for unknown layers.
	pub fn fallback_of(&self, layer_id: LayerId) -> Option<LayerId> {
		self.find(layer_id).and_then(|layer| layer.fallback_id)
	}

	/// The layer followed by all of its fallbacks, ending with the root
	pub fn chain(&self, layer_id: LayerId) -> LsResult<Vec<LayerId>> {
		if !self.layers.contains_key(&layer_id) {
			return Err(Error::NotFound);
		}
		walk_to_root(&self.layers, layer_id)
	}

	/// Number of fallback steps from a layer to the root
	pub fn depth(&self, layer_id: LayerId) -> Option<usize> {
		self.chain(layer_id).ok().map(|chain| chain.len() - 1)
	}

	pub fn list(&self) -> impl Iterator<Item = &Layer> {
		self.layers.values()
	}

	pub fn len(&self) -> usize {
		self.layers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}
}


// vim: ts=4
