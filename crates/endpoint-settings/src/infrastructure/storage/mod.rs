//! Storage infrastructure.
//!
//! - `json_file_store` – durable [`KeyValueStore`](crate::application::ports::KeyValueStore)
//!   backed by a single JSON document on disk.
//! - `memory` – volatile store for tests and dry runs.
//! - `background` – the background-process snapshot kept in a key-value store.
//! - `settings` – the TOML settings file (log level, active network, default
//!   endpoint overrides, data directory).

pub mod background;
pub mod json_file_store;
pub mod memory;
pub mod settings;
