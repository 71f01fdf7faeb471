//! Application layer use cases for custom endpoint settings.
//!
//! Nothing in here touches the file system directly.  Storage, the wallet
//! manager and the presentation sinks are reached through the traits in
//! [`ports`] and injected at construction time, which keeps every use case
//! unit-testable with in-memory doubles.
//!
//! # Sub-modules
//!
//! - **`ports`** – collaborator traits and the error types they return.
//!
//! - **`custom_endpoint_api`** – reads and writes the network-keyed
//!   configuration map.
//!
//! - **`endpoint_panel`** – the settings panel: field state, validation and
//!   the enable/disable toggle.

pub mod custom_endpoint_api;
pub mod endpoint_panel;
pub mod ports;
