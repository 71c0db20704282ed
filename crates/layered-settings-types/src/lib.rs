//! Shared types, the storage adapter trait, and the error type for layered settings.
//!
//! This crate is shared between the resolver crate and the storage adapter
//! implementations, so adapters compile without pulling in the resolver.

#![forbid(unsafe_code)]

pub mod error;
pub mod prelude;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
