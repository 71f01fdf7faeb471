//! Endpoint settings command-line entry point.
//!
//! Drives the custom endpoint panel the same way a user would: mount it for
//! the active network, let it load the stored values, apply the requested
//! edits and toggle, then print the resulting panel.
//!
//! # Usage
//!
//! ```text
//! endpoint-settings [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show      Print the panel for the active network
//!   enable    Enable the custom endpoint (--base-url, --project-id)
//!   disable   Return the network to its default endpoint
//!
//! Options:
//!   --network  <NETWORK>  mainnet | preprod | preview | sanchonet
//!   --settings <PATH>     Settings TOML file [default: platform config dir]
//!   --data-dir <DIR>      Directory holding storage.json
//! ```
//!
//! `RUST_LOG` overrides the log level from the settings file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use endpoint_core::Network;
use endpoint_settings::application::custom_endpoint_api::CustomEndpointApi;
use endpoint_settings::application::endpoint_panel::{
    CustomEndpointPanel, PanelDeps, PanelView, ToggleOutcome,
};
use endpoint_settings::application::ports::{BackgroundStorage, KeyValueStore};
use endpoint_settings::infrastructure::i18n::Catalog;
use endpoint_settings::infrastructure::sinks::{TracingAnalytics, TracingNotifier};
use endpoint_settings::infrastructure::storage::background::StoreBackgroundStorage;
use endpoint_settings::infrastructure::storage::json_file_store::JsonFileStore;
use endpoint_settings::infrastructure::storage::settings::{
    load_settings, load_settings_from, AppSettings,
};
use endpoint_settings::infrastructure::wallet_manager::LocalWalletManager;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// View, edit and toggle the custom data-provider endpoint for a network.
#[derive(Debug, Parser)]
#[command(name = "endpoint-settings", version)]
struct Cli {
    /// Network to operate on; defaults to `general.active_network`.
    #[arg(long, env = "ENDPOINT_NETWORK")]
    network: Option<Network>,

    /// Settings file; defaults to the platform config directory.
    #[arg(long, env = "ENDPOINT_SETTINGS")]
    settings: Option<PathBuf>,

    /// Directory holding `storage.json`; overrides `general.data_dir`.
    #[arg(long, env = "ENDPOINT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the panel for the active network.
    Show,
    /// Enable the custom endpoint, optionally editing the fields first.
    Enable {
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        project_id: Option<String>,
    },
    /// Return the network to its default endpoint.
    Disable,
}

fn load(cli: &Cli) -> anyhow::Result<AppSettings> {
    match &cli.settings {
        Some(path) => load_settings_from(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => load_settings().context("loading settings"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load(&cli)?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.general.log_level)),
        )
        .init();

    let network = match cli.network {
        Some(network) => network,
        None => settings.active_network()?,
    };
    let table = settings.default_table()?;
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => settings.data_dir()?,
    };
    debug!(%network, data_dir = %data_dir.display(), "endpoint settings starting");

    // ── Wiring ────────────────────────────────────────────────────────────────
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::in_dir(&data_dir));
    let api = Arc::new(CustomEndpointApi::new(Arc::clone(&store)));
    let background: Arc<dyn BackgroundStorage> = Arc::new(StoreBackgroundStorage::new(store));
    let deps = PanelDeps {
        api: Arc::clone(&api),
        wallet_manager: Arc::new(LocalWalletManager::new(api, Arc::clone(&background))),
        background,
        notifier: Arc::new(TracingNotifier),
        analytics: Arc::new(TracingAnalytics),
        translator: Arc::new(Catalog::english()),
    };

    let panel = CustomEndpointPanel::mount(network, &table, deps);
    panel.load().await;

    let outcome = match cli.command {
        Command::Show => None,
        Command::Enable {
            base_url,
            project_id,
        } => {
            if let Some(url) = base_url {
                panel.set_base_url(url).await?;
            }
            if let Some(id) = project_id {
                panel.set_project_id(id).await?;
            }
            Some(panel.set_enabled(true).await)
        }
        Command::Disable => Some(panel.set_enabled(false).await),
    };

    print_view(network, &panel.view().await);
    panel.unmount();

    match outcome {
        None | Some(ToggleOutcome::Applied { .. }) => {
            info!(%network, "done");
            Ok(())
        }
        Some(ToggleOutcome::Rejected) => bail!("invalid base URL or project id"),
        Some(ToggleOutcome::Failed) => bail!("switching the endpoint failed; see log"),
        Some(ToggleOutcome::Busy) => bail!("another endpoint switch is in progress"),
    }
}

fn print_view(network: Network, view: &PanelView) {
    println!("{} ({network})", view.title);
    println!("{}", view.description);
    println!();
    let lock = if view.fields_disabled { " [read-only]" } else { "" };
    println!("  {}: {}{lock}", view.base_url_label, view.base_url);
    println!("  {}: {}{lock}", view.project_id_label, view.project_id);
    println!("  [{}]", view.button_label);
    if let Some(message) = &view.validation_message {
        println!();
        println!("  {message}");
    }
}
