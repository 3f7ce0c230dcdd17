//! Infrastructure layer: content store adapters and configuration.

pub mod config;
pub mod content_store;

pub use config::{AppConfig, ConfigError};
pub use content_store::{ContentStore, InMemoryContentStore, StoreError};
