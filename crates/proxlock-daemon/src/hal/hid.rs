//! Boot-keyboard gadget transport
//!
//! Writes one 8-byte report per call to the gadget device node. The node
//! only exists once the host has enumerated the gadget, so startup blocks
//! in `wait_for` until it can be opened.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use proxlock_core::KeyReport;

use crate::error::Result;
use crate::hal::ReportTransport;

/// Delay between open attempts while waiting for the gadget node
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Emit one warning per this many failed open attempts
const WARN_EVERY: u32 = 20;

pub struct HidGadget {
    device: File,
}

impl HidGadget {
    /// Block until the gadget node opens, then hold it for the daemon's
    /// lifetime
    ///
    /// Nothing may be typed at the host before this returns.
    pub async fn wait_for(path: &Path) -> Self {
        let mut attempts = 0u32;
        loop {
            match OpenOptions::new().write(true).open(path) {
                Ok(device) => {
                    info!("HID transport ready at {}", path.display());
                    return Self { device };
                }
                Err(e) => {
                    attempts += 1;
                    if attempts % WARN_EVERY == 1 {
                        warn!("waiting for HID transport at {}: {}", path.display(), e);
                    }
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
}

#[async_trait]
impl ReportTransport for HidGadget {
    async fn write_report(&mut self, report: &KeyReport) -> Result<()> {
        self.device.write_all(&report.to_bytes())?;
        self.device.flush()?;
        Ok(())
    }
}
