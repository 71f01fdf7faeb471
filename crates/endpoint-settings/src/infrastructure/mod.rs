//! Infrastructure layer for the endpoint settings.
//!
//! Contains the concrete adapters behind the application-layer traits:
//! file and in-memory storage, the local wallet manager, the translation
//! catalog, the tracing-backed notifier and analytics sinks, and the TOML
//! settings file.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `endpoint_core`, but MUST NOT be imported by the `application` layer
//! outside of its tests.

pub mod i18n;
pub mod mock;
pub mod sinks;
pub mod storage;
pub mod wallet_manager;
