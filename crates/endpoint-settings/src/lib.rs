//! endpoint-settings library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # Layers
//!
//! - **`application`** – the configuration accessor ([`application::custom_endpoint_api`])
//!   and the settings panel controller ([`application::endpoint_panel`]).  Both
//!   depend only on the collaborator traits declared in [`application::ports`].
//!
//! - **`infrastructure`** – concrete adapters: JSON file storage, the local
//!   wallet manager, the translation catalog, tracing-backed notifier and
//!   analytics sinks, and the TOML settings file.

/// Application layer: accessor, panel and collaborator traits.
pub mod application;

/// Infrastructure layer: storage, wallet manager, i18n, sinks and settings.
pub mod infrastructure;
