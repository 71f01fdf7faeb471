//! Domain entities for custom endpoint settings.
//!
//! Pure types only: nothing in here touches the file system, the network or
//! a runtime.  The settings crate layers storage and presentation on top.

pub mod defaults;
pub mod endpoint;
pub mod network;
