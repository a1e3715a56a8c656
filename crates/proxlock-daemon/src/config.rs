//! Daemon configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use proxlock_core::{AuthorizedSet, UnlockCadence, GRACE_PERIOD_MS, LOCK_THRESHOLD_INCHES};

use crate::error::{DaemonError, Result};

/// Longest plausible trigger/echo round trip plus margin (ms)
const DEFAULT_ECHO_TIMEOUT_MS: u64 = 60;

/// Daemon configuration, loaded once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Ranging bridge device node
    pub ranger_device: PathBuf,

    /// Badge reader bridge device node
    pub reader_device: PathBuf,

    /// Boot-keyboard gadget device node
    pub hid_device: PathBuf,

    /// Upper bound on one trigger/echo round trip (ms)
    pub echo_timeout_ms: u64,

    /// Distance beyond which the operator counts as absent (inches)
    pub lock_threshold_inches: u64,

    /// Absence detection is suppressed for this long after an unlock (ms)
    pub grace_period_ms: u64,

    /// Credentials permitted to trigger an unlock
    pub authorized: AuthorizedSet,

    /// Unlock keystroke cadence
    pub unlock: UnlockCadence,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            ranger_device: PathBuf::from("/dev/ttyACM0"),
            reader_device: PathBuf::from("/dev/ttyACM1"),
            hid_device: PathBuf::from("/dev/hidg0"),
            echo_timeout_ms: DEFAULT_ECHO_TIMEOUT_MS,
            lock_threshold_inches: LOCK_THRESHOLD_INCHES,
            grace_period_ms: GRACE_PERIOD_MS,
            authorized: AuthorizedSet::default(),
            unlock: UnlockCadence::default(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject configurations the controller cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.echo_timeout_ms == 0 {
            return Err(DaemonError::Config(
                "echo_timeout_ms must be nonzero".to_string(),
            ));
        }
        self.authorized.validate()?;
        // Bad password digits fail at startup, not at the first unlock
        proxlock_core::unlock_sequence(&self.unlock)?;
        Ok(())
    }
}
