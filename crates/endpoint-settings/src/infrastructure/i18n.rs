//! Translated-string catalog.
//!
//! Lookups for a key the catalog does not know return the key itself, so a
//! missing translation shows up as its key instead of an empty label.

use std::collections::HashMap;

use tracing::debug;

use crate::application::endpoint_panel::keys;
use crate::application::ports::Translator;

/// In-memory [`Translator`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Empty catalog; every lookup echoes its key.
    pub fn new() -> Self {
        Self::default()
    }

    /// English strings for the custom endpoint panel.
    pub fn english() -> Self {
        [
            (keys::TITLE, "Custom Blockfrost API"),
            (
                keys::DESCRIPTION,
                "Connect the wallet to your own Blockfrost-compatible endpoint instead of the default one for this network.",
            ),
            (keys::BASE_URL_LABEL, "Base URL"),
            (keys::PROJECT_ID_LABEL, "Project ID"),
            (keys::ENABLE, "Enable"),
            (keys::DISABLE, "Disable"),
            (
                keys::VALIDATION_ERROR,
                "Enter a valid URL and a project ID to enable the custom endpoint.",
            ),
            (keys::USING_CUSTOM, "Using custom Blockfrost API"),
            (keys::USING_DEFAULT, "Using default Blockfrost API"),
            (keys::SOMETHING_WENT_WRONG, "Oops! Something went wrong"),
        ]
        .into_iter()
        .collect()
    }

    /// Adds or replaces one translation.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Translator for Catalog {
    fn t(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => text.clone(),
            None => {
                debug!(key, "missing translation");
                key.to_string()
            }
        }
    }
}
