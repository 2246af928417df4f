//! store
//!
//! Application, environment and regional-resource records.
//!
//! # Architecture
//!
//! - [`ConfigStore`] - application and environment lookups
//! - [`AppResourcesGetter`] - per-region pipeline resources
//! - [`FileConfigStore`] / [`FileResourcesGetter`] - TOML files under a
//!   store root (see [`crate::core::config::Config::store_root`])
//! - [`mock`] - in-memory doubles for tests
//!
//! The store is read-only from convoy's point of view; records are
//! created by other tooling.

mod file_store;
pub mod mock;
mod resources;
mod traits;

pub use file_store::FileConfigStore;
pub use resources::{AppResourcesGetter, FileResourcesGetter, RegionalResources};
pub use traits::{Application, ConfigStore, Environment, StoreError};
