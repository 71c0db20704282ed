//! Layered settings resolution.
//!
//! A setting is looked up for an entity at a given layer. When no explicit
//! value exists there, resolution climbs the layer fallback chain together
//! with the entity's ancestry until it reaches the global default held by the
//! root layer.
//!
//! # Architecture
//!
//! - **Registry** (`registry.rs`): validated snapshot of the layer fallback chain
//! - **Resolver** (`resolver/`): ancestor-chain and group-indirection strategies
//! - **Context** (`context.rs`): the tagged entity context selecting a strategy
//! - **Service** (`service.rs`): facade combining adapter, registry and scheme
//! - **Builder** (`builder.rs`): options and service construction

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod context;
pub mod prelude;
pub mod registry;
pub mod resolver;
pub mod service;

pub use builder::{SettingsBuilder, SettingsOpts, StorageScheme};
pub use context::EntityContext;
pub use layered_settings_types::settings_adapter::{Layer, Setting, SettingKey, SettingsAdapter};
pub use registry::{FrozenLayerRegistry, LayerRegistry};
pub use service::SettingsService;

// vim: ts=4
