//! Integration tests for the custom endpoint settings.
//!
//! These tests wire the panel to the real adapters (JSON file storage, the
//! local wallet manager, the English catalog) and only replace the
//! presentation sinks with recording doubles.  They cover the full
//! enable → persist → restart → disable cycle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use endpoint_core::{CustomEndpointConfig, DefaultEndpointTable, EndpointDefaults, Network};
use endpoint_settings::application::custom_endpoint_api::CustomEndpointApi;
use endpoint_settings::application::endpoint_panel::{
    keys, CustomEndpointPanel, LoadPhase, PanelDeps, ToggleOutcome,
};
use endpoint_settings::application::ports::{
    AnalyticsEvent, BackgroundStorage, KeyValueStore, Translator, WalletManager,
};
use endpoint_settings::infrastructure::i18n::Catalog;
use endpoint_settings::infrastructure::mock::{
    RecordingAnalytics, RecordingNotifier, RecordingWalletManager, StubBackgroundStorage,
};
use endpoint_settings::infrastructure::storage::background::StoreBackgroundStorage;
use endpoint_settings::infrastructure::storage::json_file_store::JsonFileStore;
use endpoint_settings::infrastructure::storage::memory::MemoryStore;
use endpoint_settings::infrastructure::wallet_manager::LocalWalletManager;
use uuid::Uuid;

struct Fixture {
    panel: CustomEndpointPanel,
    api: Arc<CustomEndpointApi>,
    notifier: Arc<RecordingNotifier>,
    analytics: Arc<RecordingAnalytics>,
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("endpoint_settings_it_{}", Uuid::new_v4()))
}

fn table() -> DefaultEndpointTable {
    let mut table = DefaultEndpointTable::builtin();
    table.insert(
        Network::Preview,
        EndpointDefaults::new("https://cardano-preview.blockfrost.io/api/v0", "previewBuildKey"),
    );
    table
}

/// Mounts and loads a panel over the storage document in `dir`.
async fn open(dir: &Path, network: Network) -> Fixture {
    open_with(dir, network, None).await
}

async fn open_with(
    dir: &Path,
    network: Network,
    wallet_manager: Option<Arc<dyn WalletManager>>,
) -> Fixture {
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::in_dir(dir));
    let api = Arc::new(CustomEndpointApi::new(Arc::clone(&store)));
    let background: Arc<dyn BackgroundStorage> = Arc::new(StoreBackgroundStorage::new(store));
    let wallet_manager = wallet_manager.unwrap_or_else(|| {
        Arc::new(LocalWalletManager::new(
            Arc::clone(&api),
            Arc::clone(&background),
        )) as Arc<dyn WalletManager>
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let analytics = Arc::new(RecordingAnalytics::default());

    let deps = PanelDeps {
        api: Arc::clone(&api),
        wallet_manager,
        background,
        notifier: notifier.clone(),
        analytics: analytics.clone(),
        translator: Arc::new(Catalog::english()),
    };
    let panel = CustomEndpointPanel::mount(network, &table(), deps);
    panel.load().await;

    Fixture {
        panel,
        api,
        notifier,
        analytics,
    }
}

// ── Full cycle ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_enable_persists_across_restart_and_locks_fields() {
    // Arrange
    let dir = temp_dir();
    let first = open(&dir, Network::Preview).await;
    assert_eq!(first.panel.phase(), LoadPhase::Loaded);
    assert_eq!(first.panel.project_id(), "previewBuildKey");

    // Act
    first.panel.set_base_url("https://api.example.com").await.unwrap();
    first.panel.set_project_id("abc123").await.unwrap();
    let outcome = first.panel.set_enabled(true).await;

    // Assert – this session
    assert_eq!(outcome, ToggleOutcome::Applied { enabled: true });
    assert_eq!(
        first.analytics.events(),
        vec![AnalyticsEvent::SettingsCustomEndpointEnableClick]
    );
    assert_eq!(
        first.notifier.notifications()[0].text,
        Catalog::english().t(keys::USING_CUSTOM)
    );

    // Assert – a fresh process sees the same state
    let second = open(&dir, Network::Preview).await;
    assert!(second.panel.is_enabled_for_current_network().await);
    assert_eq!(second.panel.base_url(), "https://api.example.com");
    assert_eq!(second.panel.project_id(), "abc123");
    let view = second.panel.view().await;
    assert!(view.fields_disabled);
    assert_eq!(view.button_test_id, "custom-blockfrost-button-disable");
    assert!(second.panel.set_base_url("https://other.example").await.is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_disable_returns_to_defaults_but_keeps_stored_values() {
    // Arrange
    let dir = temp_dir();
    let fx = open(&dir, Network::Preprod).await;
    fx.panel.set_base_url("https://api.example.com").await.unwrap();
    fx.panel.set_project_id("abc123").await.unwrap();
    assert_eq!(
        fx.panel.set_enabled(true).await,
        ToggleOutcome::Applied { enabled: true }
    );

    // Act
    let outcome = fx.panel.set_enabled(false).await;

    // Assert
    assert_eq!(outcome, ToggleOutcome::Applied { enabled: false });
    assert!(!fx.panel.is_enabled_for_current_network().await);
    let stored = fx.api.get_for_network(Network::Preprod).await;
    assert_eq!(stored.base_url, "https://api.example.com");
    assert_eq!(stored.project_id, "abc123");
    let notes = fx.notifier.notifications();
    assert_eq!(
        notes.last().map(|n| n.text.clone()),
        Some(Catalog::english().t(keys::USING_DEFAULT))
    );
    // Exactly one analytics event: the enable, not the disable.
    assert_eq!(fx.analytics.events().len(), 1);

    // A fresh panel falls back to the static defaults.
    let reopened = open(&dir, Network::Preprod).await;
    assert!(reopened.panel.base_url().contains("preprod"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_networks_are_independent() {
    // Arrange
    let dir = temp_dir();
    let mainnet = CustomEndpointConfig::enabled("main", "https://main.example");
    let seed = open(&dir, Network::Mainnet).await;
    seed.api.update(Network::Mainnet, mainnet.clone()).await.unwrap();

    // Act
    let preview = open(&dir, Network::Preview).await;
    preview.panel.set_base_url("https://prev.example").await.unwrap();
    preview.panel.set_project_id("prev").await.unwrap();
    preview.panel.set_enabled(true).await;

    // Assert
    assert_eq!(preview.api.get_for_network(Network::Mainnet).await, mainnet);
    assert_eq!(
        preview.api.get_for_network(Network::Sanchonet).await,
        CustomEndpointConfig::default()
    );

    std::fs::remove_dir_all(&dir).ok();
}

// ── Failure paths ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rejected_input_persists_nothing() {
    let dir = temp_dir();
    let fx = open(&dir, Network::Preprod).await;
    fx.panel.set_base_url("not-a-url").await.unwrap();
    fx.panel.set_project_id("abc123").await.unwrap();

    let outcome = fx.panel.set_enabled(true).await;

    assert_eq!(outcome, ToggleOutcome::Rejected);
    assert!(fx.panel.validation_error());
    assert!(fx.notifier.notifications().is_empty());
    assert!(!dir.join("storage.json").exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_apply_failure_leaves_prior_state() {
    // Arrange
    let dir = temp_dir();
    let wallet = Arc::new(RecordingWalletManager::failing());
    let fx = open_with(
        &dir,
        Network::Preview,
        Some(Arc::clone(&wallet) as Arc<dyn WalletManager>),
    )
    .await;

    // Act
    let outcome = fx.panel.set_enabled(true).await;

    // Assert
    assert_eq!(outcome, ToggleOutcome::Failed);
    assert_eq!(
        wallet.calls(),
        vec![(
            Network::Preview,
            Some("previewBuildKey".to_string()),
            Some("https://cardano-preview.blockfrost.io/api/v0".to_string()),
        )]
    );
    assert!(!fx.panel.is_enabled_for_current_network().await);
    assert_eq!(
        fx.notifier.notifications()[0].text,
        Catalog::english().t(keys::SOMETHING_WENT_WRONG)
    );
    assert!(fx.analytics.events().is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_corrupt_storage_reads_as_defaults() {
    // Arrange
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("storage.json"), "{ definitely not json").unwrap();

    // Act
    let fx = open(&dir, Network::Mainnet).await;

    // Assert: reads never fail, the load falls back to static defaults
    assert!(!fx.panel.is_enabled_for_current_network().await);
    assert_eq!(fx.panel.phase(), LoadPhase::Loaded);
    assert!(fx.panel.base_url().contains("mainnet"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_failed_snapshot_write_leaves_network_disabled() {
    // Arrange: real wallet manager whose background snapshot cannot be written
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let api = Arc::new(CustomEndpointApi::new(store));
    let background: Arc<dyn BackgroundStorage> =
        Arc::new(StubBackgroundStorage::rejecting_writes());
    let notifier = Arc::new(RecordingNotifier::default());
    let deps = PanelDeps {
        api: Arc::clone(&api),
        wallet_manager: Arc::new(LocalWalletManager::new(
            Arc::clone(&api),
            Arc::clone(&background),
        )),
        background,
        notifier: notifier.clone(),
        analytics: Arc::new(RecordingAnalytics::default()),
        translator: Arc::new(Catalog::english()),
    };
    let panel = CustomEndpointPanel::mount(Network::Preprod, &table(), deps);
    panel.load().await;
    panel.set_base_url("https://api.example.com").await.unwrap();
    panel.set_project_id("abc123").await.unwrap();

    // Act
    let outcome = panel.set_enabled(true).await;

    // Assert
    assert_eq!(outcome, ToggleOutcome::Failed);
    assert!(!panel.is_enabled_for_current_network().await);
    assert!(!panel.view().await.fields_disabled);
    assert_eq!(
        notifier.notifications()[0].text,
        Catalog::english().t(keys::SOMETHING_WENT_WRONG)
    );
    assert_eq!(api.get_for_network(Network::Preprod).await, CustomEndpointConfig::default());
}
