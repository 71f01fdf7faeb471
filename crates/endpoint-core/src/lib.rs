//! # endpoint-core
//!
//! Shared domain types for the custom data-provider endpoint settings.
//!
//! This crate has no I/O and no async runtime.  It defines:
//!
//! - **`domain::network`** – the closed set of supported networks and how
//!   their names appear as keys in the stored configuration map.
//!
//! - **`domain::endpoint`** – the per-network [`CustomEndpointConfig`] record
//!   and the lenient read path that fills missing fields with defaults.
//!
//! - **`domain::defaults`** – the static network → default endpoint table.
//!
//! - **`validation`** – URL syntax validation used before a custom endpoint
//!   may be activated.

pub mod domain;
pub mod validation;

pub use domain::defaults::{DefaultEndpointTable, EndpointDefaults};
pub use domain::endpoint::CustomEndpointConfig;
pub use domain::network::{Network, UnknownNetwork};
pub use validation::is_valid_url;
