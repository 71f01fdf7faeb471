//! CustomEndpointPanel: the settings panel for a custom data-provider endpoint.
//!
//! The panel owns two editable fields (base URL, project id) and a validation
//! flag.  Whether the custom endpoint is *currently enabled* is never cached
//! here: it is re-derived from the [`CustomEndpointApi`] on every read.
//!
//! # Load phases
//!
//! ```text
//! mount()  ──►  Defaults  ──load()──►  Loading  ──►  Loaded
//! ```
//!
//! - `Defaults`: fields hold the static defaults for the active network.
//! - `Loading`: the background snapshot read is outstanding.
//! - `Loaded`: the snapshot values (or the defaults, if absent or the read
//!   failed) have been applied.  A field the user already edited is kept.
//!
//! After [`CustomEndpointPanel::unmount`] a pending load writes nothing.
//!
//! # Toggle
//!
//! Enabling requires a valid URL and a non-blank project id; otherwise the
//! validation flag is raised and nothing else happens.  Disabling is always
//! allowed.  Only one apply call may be outstanding at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use endpoint_core::{is_valid_url, DefaultEndpointTable, EndpointDefaults, Network};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::custom_endpoint_api::CustomEndpointApi;
use super::ports::{
    Analytics, AnalyticsEvent, BackgroundStorage, Notification, NotificationIcon, Notifier,
    Translator, WalletManager,
};

/// Translation keys used by the panel.
pub mod keys {
    pub const TITLE: &str = "browserView.settings.wallet.customBlockfrost.title";
    pub const DESCRIPTION: &str = "browserView.settings.wallet.customBlockfrost.description";
    pub const BASE_URL_LABEL: &str = "browserView.settings.wallet.customBlockfrost.baseUrlLabel";
    pub const PROJECT_ID_LABEL: &str =
        "browserView.settings.wallet.customBlockfrost.projectIdLabel";
    pub const ENABLE: &str = "browserView.settings.wallet.customBlockfrost.enable";
    pub const DISABLE: &str = "browserView.settings.wallet.customBlockfrost.disable";
    pub const VALIDATION_ERROR: &str =
        "browserView.settings.wallet.customBlockfrost.validationError";
    pub const USING_CUSTOM: &str =
        "browserView.settings.wallet.customBlockfrost.usingCustomBlockfrost";
    pub const USING_DEFAULT: &str =
        "browserView.settings.wallet.customBlockfrost.usingDefaultBlockfrost";
    pub const SOMETHING_WENT_WRONG: &str = "general.errors.somethingWentWrong";
}

/// Error type for field edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    /// Fields are read-only while the custom endpoint is enabled.
    #[error("custom endpoint is enabled; disable it before editing")]
    FieldsLocked,
}

/// Where the panel is in its initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Defaults,
    Loading,
    Loaded,
}

/// Result of [`CustomEndpointPanel::set_enabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The apply call succeeded; `enabled` is the new state.
    Applied { enabled: bool },
    /// Input validation failed; nothing was called or persisted.
    Rejected,
    /// The apply call failed; the failure notification was shown.
    Failed,
    /// Another apply call is still outstanding; nothing happened.
    Busy,
}

/// Collaborators injected into the panel.
#[derive(Clone)]
pub struct PanelDeps {
    pub api: Arc<CustomEndpointApi>,
    pub wallet_manager: Arc<dyn WalletManager>,
    pub background: Arc<dyn BackgroundStorage>,
    pub notifier: Arc<dyn Notifier>,
    pub analytics: Arc<dyn Analytics>,
    pub translator: Arc<dyn Translator>,
}

/// Everything a renderer needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub title: String,
    pub description: String,
    pub base_url_label: String,
    pub project_id_label: String,
    pub base_url: String,
    pub project_id: String,
    /// Both text fields are read-only while the custom endpoint is enabled.
    pub fields_disabled: bool,
    pub button_label: String,
    pub button_test_id: &'static str,
    /// Present while the last enable attempt failed validation.
    pub validation_message: Option<String>,
    pub phase: LoadPhase,
}

#[derive(Debug)]
struct FieldState {
    base_url: String,
    project_id: String,
    validation_error: bool,
    phase: LoadPhase,
    base_url_edited: bool,
    project_id_edited: bool,
}

/// Settings panel controller for one network.
pub struct CustomEndpointPanel {
    network: Network,
    defaults: EndpointDefaults,
    deps: PanelDeps,
    state: Mutex<FieldState>,
    apply_in_flight: AtomicBool,
    mounted: AtomicBool,
}

impl CustomEndpointPanel {
    /// Creates the panel for `network`, seeding the fields from `table`.
    pub fn mount(network: Network, table: &DefaultEndpointTable, deps: PanelDeps) -> Self {
        let defaults = table.get_or_empty(network);
        debug!(%network, "custom endpoint panel mounted");
        Self {
            network,
            state: Mutex::new(FieldState {
                base_url: defaults.base_url.clone(),
                project_id: defaults.project_id.clone(),
                validation_error: false,
                phase: LoadPhase::Defaults,
                base_url_edited: false,
                project_id_edited: false,
            }),
            defaults,
            deps,
            apply_in_flight: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
        }
    }

    /// Overlays the values from the background snapshot onto the fields.
    ///
    /// Read failures are logged and leave the defaults in place.
    pub async fn load(&self) {
        if !self.is_mounted() {
            return;
        }
        self.lock_state().phase = LoadPhase::Loading;

        let result = self.deps.background.get().await;

        if !self.is_mounted() {
            debug!(network = %self.network, "panel unmounted before background storage resolved");
            return;
        }

        let mut state = self.lock_state();
        match result {
            Ok(snapshot) => {
                if !state.base_url_edited {
                    state.base_url =
                        overlay(snapshot.custom_blockfrost_base_url, &self.defaults.base_url);
                }
                if !state.project_id_edited {
                    state.project_id = overlay(
                        snapshot.custom_blockfrost_project_id,
                        &self.defaults.project_id,
                    );
                }
            }
            Err(e) => {
                error!(network = %self.network, error = %e, "failed to read background storage");
            }
        }
        state.phase = LoadPhase::Loaded;
    }

    /// Stops pending loads from touching the fields.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
        debug!(network = %self.network, "custom endpoint panel unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn phase(&self) -> LoadPhase {
        self.lock_state().phase
    }

    pub fn base_url(&self) -> String {
        self.lock_state().base_url.clone()
    }

    pub fn project_id(&self) -> String {
        self.lock_state().project_id.clone()
    }

    pub fn validation_error(&self) -> bool {
        self.lock_state().validation_error
    }

    /// Reads the persisted status for the active network.
    pub async fn is_enabled_for_current_network(&self) -> bool {
        self.deps.api.get_for_network(self.network).await.status
    }

    /// Edits the base URL field.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::FieldsLocked`] while the custom endpoint is enabled.
    pub async fn set_base_url(&self, value: impl Into<String>) -> Result<(), PanelError> {
        let value = value.into();
        if self.is_enabled_for_current_network().await {
            return Err(PanelError::FieldsLocked);
        }
        let mut state = self.lock_state();
        state.base_url = value;
        state.base_url_edited = true;
        Ok(())
    }

    /// Edits the project id field.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::FieldsLocked`] while the custom endpoint is enabled.
    pub async fn set_project_id(&self, value: impl Into<String>) -> Result<(), PanelError> {
        let value = value.into();
        if self.is_enabled_for_current_network().await {
            return Err(PanelError::FieldsLocked);
        }
        let mut state = self.lock_state();
        state.project_id = value;
        state.project_id_edited = true;
        Ok(())
    }

    /// Enables or disables the custom endpoint for the active network.
    ///
    /// Never returns an error: validation failures raise the panel's
    /// validation flag and apply failures are reported through the notifier.
    pub async fn set_enabled(&self, requested: bool) -> ToggleOutcome {
        if self.apply_in_flight.swap(true, Ordering::AcqRel) {
            warn!(network = %self.network, "endpoint switch already in progress; ignoring toggle");
            return ToggleOutcome::Busy;
        }
        // Cleared on drop, so a cancelled toggle does not leave the panel busy.
        let _in_flight = InFlight(&self.apply_in_flight);
        self.apply(requested).await
    }

    async fn apply(&self, enable: bool) -> ToggleOutcome {
        let (project_id, base_url) = {
            let mut state = self.lock_state();
            if enable
                && (!is_valid_url(&state.base_url) || state.project_id.trim().is_empty())
            {
                state.validation_error = true;
                debug!(network = %self.network, "custom endpoint input failed validation");
                return ToggleOutcome::Rejected;
            }
            state.validation_error = false;
            if enable {
                (
                    Some(state.project_id.trim().to_string()),
                    Some(state.base_url.trim().to_string()),
                )
            } else {
                (None, None)
            }
        };

        let result = self
            .deps
            .wallet_manager
            .enable_custom_endpoint(self.network, project_id, base_url)
            .await;

        if !self.is_mounted() {
            debug!(network = %self.network, "endpoint switch finished after panel unmounted");
        }

        match result {
            Ok(()) => {
                let key = if enable {
                    keys::USING_CUSTOM
                } else {
                    keys::USING_DEFAULT
                };
                self.deps.notifier.notify(Notification {
                    text: self.deps.translator.t(key),
                    icon: NotificationIcon::Switch,
                    with_progress_bar: true,
                });
                if enable {
                    self.deps
                        .analytics
                        .send_event(AnalyticsEvent::SettingsCustomEndpointEnableClick)
                        .await;
                }
                info!(network = %self.network, enabled = enable, "custom endpoint switched");
                ToggleOutcome::Applied { enabled: enable }
            }
            Err(e) => {
                error!(network = %self.network, error = %e, "error switching custom endpoint config");
                self.deps.notifier.notify(Notification {
                    text: self.deps.translator.t(keys::SOMETHING_WENT_WRONG),
                    icon: NotificationIcon::Error,
                    with_progress_bar: false,
                });
                ToggleOutcome::Failed
            }
        }
    }

    /// Builds the render model from the current fields and persisted status.
    pub async fn view(&self) -> PanelView {
        let enabled = self.is_enabled_for_current_network().await;
        let t = &self.deps.translator;
        let (base_url, project_id, validation_error, phase) = {
            let state = self.lock_state();
            (
                state.base_url.clone(),
                state.project_id.clone(),
                state.validation_error,
                state.phase,
            )
        };

        PanelView {
            title: t.t(keys::TITLE),
            description: t.t(keys::DESCRIPTION),
            base_url_label: t.t(keys::BASE_URL_LABEL),
            project_id_label: t.t(keys::PROJECT_ID_LABEL),
            base_url,
            project_id,
            fields_disabled: enabled,
            button_label: t.t(if enabled { keys::DISABLE } else { keys::ENABLE }),
            button_test_id: if enabled {
                "custom-blockfrost-button-disable"
            } else {
                "custom-blockfrost-button-enable"
            },
            validation_message: validation_error.then(|| t.t(keys::VALIDATION_ERROR)),
            phase,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FieldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the panel's in-flight flag for the duration of one apply.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Stored value when present and non-empty, otherwise the static default.
fn overlay(stored: Option<String>, fallback: &str) -> String {
    stored
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
