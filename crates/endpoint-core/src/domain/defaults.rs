//! Static network → default endpoint table.
//!
//! These are the endpoints the wallet uses when no custom endpoint is active.
//! The panel seeds its text fields from this table before any stored value
//! has been read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::network::Network;

/// Default endpoint for one network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDefaults {
    /// Endpoint root URL.
    #[serde(default)]
    pub base_url: String,
    /// Project identifier bundled with the build, usually empty.
    #[serde(default)]
    pub project_id: String,
}

impl EndpointDefaults {
    pub fn new(base_url: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            project_id: project_id.into(),
        }
    }
}

/// Lookup table from network to its default endpoint.
///
/// A network may be missing from the table; callers then fall back to empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultEndpointTable {
    entries: BTreeMap<Network, EndpointDefaults>,
}

impl DefaultEndpointTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the public hosted endpoints for every supported network and
    /// no project ids.
    pub fn builtin() -> Self {
        let entries = Network::ALL
            .into_iter()
            .map(|n| {
                let url = format!("https://cardano-{}.blockfrost.io/api/v0", n.slug());
                (n, EndpointDefaults::new(url, ""))
            })
            .collect();
        Self { entries }
    }

    /// Inserts or replaces the defaults for `network`.
    pub fn insert(&mut self, network: Network, defaults: EndpointDefaults) {
        self.entries.insert(network, defaults);
    }

    /// Returns the defaults for `network`, if the table has an entry.
    pub fn get(&self, network: Network) -> Option<&EndpointDefaults> {
        self.entries.get(&network)
    }

    /// Returns the defaults for `network`, or empty strings when absent.
    pub fn get_or_empty(&self, network: Network) -> EndpointDefaults {
        self.get(network).cloned().unwrap_or_default()
    }
}

impl FromIterator<(Network, EndpointDefaults)> for DefaultEndpointTable {
    fn from_iter<I: IntoIterator<Item = (Network, EndpointDefaults)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
