//! cliplogd - The cliplog background service
//!
//! This is the main entry point for the cliplog service.
//! It wires together all the components:
//! - Configuration loading (and reload on SIGHUP)
//! - Store initialization
//! - Native clipboard reader
//! - Clipboard monitor poll loop

use anyhow::{Context, Result};
use clap::Parser;
use cliplog_config::{Settings, load_config, load_config_or_default};
use cliplog_core::{ClipboardMonitor, TickOutcome, store_options};
use cliplog_host_native::SystemClipboard;
use cliplog_store::{LogStore, Store};
use cliplog_util::default_config_path;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// cliplogd - Clipboard history recorder
#[derive(Parser, Debug)]
#[command(name = "cliplogd")]
#[command(about = "Records clipboard changes to daily JSON log files", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/cliplog/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Log directory override (or set CLIPLOG_DATA_DIR env var)
    #[arg(short, long, env = "CLIPLOG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Check the clipboard once and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    /// Apply command line overrides on top of file settings
    fn apply(&self, settings: Settings) -> Settings {
        match &self.data_dir {
            Some(dir) => settings.with_base_dir(dir),
            None => settings,
        }
    }
}

fn open_store(settings: &Settings) -> Result<Arc<dyn Store>> {
    let store = LogStore::open(store_options(settings))
        .with_context(|| format!("Failed to open log directory {:?}", settings.base_dir()))?;
    Ok(Arc::new(store))
}

/// Main service state
struct Service {
    monitor: ClipboardMonitor,
    args: Args,
}

impl Service {
    fn new(args: Args) -> Result<Self> {
        let settings = args.apply(load_config_or_default(&args.config));
        let store = open_store(&settings)?;

        info!(base_dir = %settings.base_dir().display(), "Store initialized");

        let reader = SystemClipboard::new().context("Failed to open the system clipboard")?;
        let monitor = ClipboardMonitor::new(Arc::new(reader), store, settings);

        Ok(Self { monitor, args })
    }

    /// One poll of the clipboard
    fn check(&mut self) {
        match self.monitor.tick() {
            TickOutcome::Changed {
                preview: Some(preview),
                ..
            } => println!("{}", preview),
            TickOutcome::Changed { .. }
            | TickOutcome::Unchanged(_)
            | TickOutcome::PersistFailed(_) => {}
        }
    }

    /// Re-read the config file. An unreadable or invalid file keeps the
    /// current settings.
    fn reload(&mut self) {
        let settings = match load_config(&self.args.config) {
            Ok(settings) => self.args.apply(settings),
            Err(e) => {
                warn!(
                    config_path = %self.args.config.display(),
                    error = %e,
                    "Failed to reload config, keeping previous settings"
                );
                return;
            }
        };

        match open_store(&settings) {
            Ok(store) => self.monitor.reload(settings, store),
            Err(e) => warn!(error = %e, "Failed to open new log directory, keeping previous settings"),
        }
    }

    #[cfg(unix)]
    async fn run(mut self) -> Result<()> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())
            .context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt())
            .context("Failed to create SIGINT handler")?;
        let mut sighup = signal(SignalKind::hangup())
            .context("Failed to create SIGHUP handler")?;

        info!(
            interval_secs = self.monitor.check_interval().as_secs_f64(),
            "Service running"
        );

        loop {
            self.check();

            tokio::select! {
                // Signal: SIGTERM or SIGINT - graceful shutdown
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }

                // Signal: SIGHUP - reload configuration
                _ = sighup.recv() => {
                    info!("Received SIGHUP, reloading configuration");
                    self.reload();
                }

                _ = tokio::time::sleep(self.monitor.check_interval()) => {}
            }
        }

        info!("Shutdown complete");
        Ok(())
    }

    #[cfg(not(unix))]
    async fn run(mut self) -> Result<()> {
        info!(
            interval_secs = self.monitor.check_interval().as_secs_f64(),
            "Service running"
        );

        loop {
            self.check();

            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    result.context("Failed to listen for Ctrl-C")?;
                    info!("Received Ctrl-C, shutting down gracefully");
                    break;
                }
                _ = tokio::time::sleep(self.monitor.check_interval()) => {}
            }
        }

        info!("Shutdown complete");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        mock_time = cliplog_util::is_mock_time_active(),
        "cliplogd starting"
    );

    let once = args.once;
    let mut service = Service::new(args)?;

    if once {
        service.check();
        return Ok(());
    }

    service.run().await
}
