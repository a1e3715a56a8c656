//! Proxlock Daemon - Main entry point
//!
//! Wires the device drivers to the lock controller and runs the tick loop.

use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use proxlock_daemon::hal::{BadgeBridge, HidGadget, SonarBridge};
use proxlock_daemon::{DaemonConfig, LockController, MonotonicClock};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proxlock_daemon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Proxlock daemon v{}", env!("CARGO_PKG_VERSION"));

    // Load or create config
    let config_path = std::env::var("PROXLOCK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::config_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("/etc"))
                .join("proxlock")
                .join("daemon.json")
        });

    let config = if config_path.exists() {
        DaemonConfig::load(&config_path)?
    } else {
        let config = DaemonConfig::default();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        config.save(&config_path)?;
        info!("Created default config at {:?}", config_path);
        config
    };

    // The host must have enumerated the keyboard gadget before anything
    // may be typed at it
    let transport = HidGadget::wait_for(&config.hid_device).await;

    let sampler = SonarBridge::open(
        &config.ranger_device,
        Duration::from_millis(config.echo_timeout_ms),
    )?;
    let reader = BadgeBridge::open(&config.reader_device)?;

    let mut controller =
        LockController::new(&config, sampler, reader, transport, MonotonicClock::new())?;

    info!("Entering tick loop");

    tokio::select! {
        result = controller.run() => {
            if let Err(e) = result {
                error!("Controller error: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Daemon shutting down");

    Ok(())
}

/// Helper module for dirs functionality
mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    }
}
