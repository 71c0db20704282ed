//! Options and builder for the settings service

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::prelude::*;
use crate::registry::FrozenLayerRegistry;
use crate::service::SettingsService;
use layered_settings_types::settings_adapter::SettingsAdapter;

pub use crate::resolver::StorageScheme;

/// Environment variable selecting the storage scheme
pub const ENV_SCHEME: &str = "LS_SCHEME";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsOpts {
	pub scheme: StorageScheme,
}

impl SettingsOpts {
	/// Read options from the environment, using defaults for unset variables
	pub fn from_env() -> LsResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LsResult<Self> {
		let mut opts = Self::default();
		if let Some(scheme) = lookup(ENV_SCHEME) {
			opts.scheme = scheme.parse()?;
		}
		Ok(opts)
	}
}

pub struct SettingsBuilder {
	opts: SettingsOpts,
	adapter: Option<Arc<dyn SettingsAdapter>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::with_opts(SettingsOpts::default())
	}

	pub fn with_opts(opts: SettingsOpts) -> Self {
		SettingsBuilder { opts, adapter: None }
	}

	/// Install a global tracing subscriber filtered by `RUST_LOG`.
	/// Does nothing if a subscriber is already installed.
	pub fn init_tracing(&mut self) -> &mut Self {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		self
	}

	// Opts
	pub fn scheme(&mut self, scheme: StorageScheme) -> &mut Self {
		self.opts.scheme = scheme;
		self
	}

	pub fn opts(&self) -> &SettingsOpts {
		&self.opts
	}

	// Adapters
	pub fn adapter(&mut self, adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.adapter = Some(adapter);
		self
	}

	/// Load and validate the layer hierarchy, then create the service
	pub async fn build(&self) -> LsResult<SettingsService> {
		let adapter = self
			.adapter
			.clone()
			.ok_or_else(|| Error::ConfigError("No settings adapter configured".into()))?;

		let registry = FrozenLayerRegistry::load(adapter.as_ref()).await?;
		info!(
			"Settings service ready: {} layers, root layer {}, {} scheme",
			registry.len(),
			registry.root().id,
			self.opts.scheme
		);

		Ok(SettingsService::new(adapter, Arc::new(registry), self.opts.scheme))
	}
}

impl Default for SettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
