//! TOML-based settings for the endpoint settings tool.
//!
//! Reads and writes `AppSettings` to the platform-appropriate settings file:
//! - Windows:  `%APPDATA%\EndpointSettings\settings.toml`
//! - Linux:    `~/.config/endpoint-settings/settings.toml`
//! - macOS:    `~/Library/Application Support/EndpointSettings/settings.toml`
//!
//! Example:
//!
//! ```toml
//! [general]
//! log_level = "debug"
//! active_network = "preprod"
//! data_dir = "/var/lib/endpoint-settings"
//!
//! [defaults.preprod]
//! base_url = "https://cardano-preprod.blockfrost.io/api/v0"
//! project_id = "preprodBuildKey"
//! ```
//!
//! Every field has a default, so a missing file, an empty file or a file from
//! an older build all load.  `[defaults.<network>]` tables override the
//! built-in default endpoint for that network only.

use std::collections::BTreeMap;
use std::path::PathBuf;

use endpoint_core::{DefaultEndpointTable, EndpointDefaults, Network, UnknownNetwork};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A network name in the settings is not supported.
    #[error(transparent)]
    Network(#[from] UnknownNetwork),
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Top-level settings stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    /// Per-network default endpoint overrides keyed by network slug.
    #[serde(default)]
    pub defaults: BTreeMap<String, EndpointDefaults>,
}

/// General behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Network the panel operates on unless overridden on the command line.
    #[serde(default = "default_active_network")]
    pub active_network: String,
    /// Directory holding `storage.json`; the settings directory when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_active_network() -> String {
    Network::Mainnet.slug().to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            active_network: default_active_network(),
            data_dir: None,
        }
    }
}

impl AppSettings {
    /// Parses `general.active_network`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownNetwork`] for an unsupported name.
    pub fn active_network(&self) -> Result<Network, UnknownNetwork> {
        self.general.active_network.parse()
    }

    /// Built-in default endpoints with the `[defaults.*]` overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Network`] if an override names an unsupported
    /// network.
    pub fn default_table(&self) -> Result<DefaultEndpointTable, SettingsError> {
        let mut table = DefaultEndpointTable::builtin();
        for (name, defaults) in &self.defaults {
            let network: Network = name.parse()?;
            table.insert(network, defaults.clone());
        }
        Ok(table)
    }

    /// Directory holding the key-value storage document: `general.data_dir`,
    /// or the settings directory next to `settings.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoPlatformConfigDir`] when no directory is
    /// configured and the platform directory cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf, SettingsError> {
        match &self.general.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => settings_dir(),
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] when the platform base
/// directory cannot be determined from the environment.
pub fn settings_dir() -> Result<PathBuf, SettingsError> {
    platform_config_dir().ok_or(SettingsError::NoPlatformConfigDir)
}

/// Resolves the full path to the settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    Ok(settings_dir()?.join("settings.toml"))
}

/// Loads `AppSettings` from the platform settings file.
///
/// # Errors
///
/// See [`load_settings_from`].
pub fn load_settings() -> Result<AppSettings, SettingsError> {
    load_settings_from(settings_file_path()?)
}

/// Loads `AppSettings` from `path`, returning `AppSettings::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not found",
/// and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings_from(path: impl Into<PathBuf>) -> Result<AppSettings, SettingsError> {
    let path = path.into();
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppSettings::default()),
        Err(source) => Err(SettingsError::Io { path, source }),
    }
}

/// Persists `settings` to the platform settings file.
///
/// # Errors
///
/// See [`save_settings_to`].
pub fn save_settings(settings: &AppSettings) -> Result<(), SettingsError> {
    save_settings_to(settings_file_path()?, settings)
}

/// Persists `settings` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system failures or
/// [`SettingsError::Serialize`] if serialization fails.
pub fn save_settings_to(
    path: impl Into<PathBuf>,
    settings: &AppSettings,
) -> Result<(), SettingsError> {
    let path = path.into();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    std::fs::write(&path, content).map_err(|source| SettingsError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config directory including the application folder.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("EndpointSettings"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("endpoint-settings"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("EndpointSettings")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
