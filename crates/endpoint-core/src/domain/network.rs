//! Supported network environments.
//!
//! The stored configuration map is keyed by the exact variant names
//! (`"Mainnet"`, `"Preprod"`, ...), so the serde representation must not be
//! renamed without migrating existing data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name a supported network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown network: {0}")]
pub struct UnknownNetwork(pub String);

/// A named deployment target with its own default endpoint configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Preprod,
    Preview,
    Sanchonet,
}

impl Network {
    /// Every supported network, in display order.
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Preprod,
        Network::Preview,
        Network::Sanchonet,
    ];

    /// Key used for this network in the stored configuration map.
    pub fn as_key(&self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Preprod => "Preprod",
            Network::Preview => "Preview",
            Network::Sanchonet => "Sanchonet",
        }
    }

    /// Lower-case slug used in hostnames and settings-file tables.
    pub fn slug(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Preprod => "preprod",
            Network::Preview => "preview",
            Network::Sanchonet => "sanchonet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    /// Parses a network name case-insensitively (`"mainnet"`, `"Mainnet"`, `"MAINNET"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Network::ALL
            .into_iter()
            .find(|n| n.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}
