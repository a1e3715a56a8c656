//! Hardware seams between the controller and its external collaborators
//!
//! Pulse timing, card anticollision, and HID framing all live on the far
//! side of these traits; the drivers here only move frames across device
//! nodes.

pub mod badge;
pub mod hid;
pub mod sonar;

pub use badge::BadgeBridge;
pub use hid::HidGadget;
pub use sonar::SonarBridge;

use std::fs::{File, OpenOptions};
use std::path::Path;

use async_trait::async_trait;

use proxlock_core::{DistanceReading, KeyReport};

use crate::error::Result;

/// One distance measurement per invocation
#[async_trait]
pub trait RangeSampler: Send {
    /// Trigger a measurement and wait for the echo, bounded by the sensor's
    /// round-trip window. `None` means no echo arrived in time.
    async fn measure(&mut self) -> Result<Option<DistanceReading>>;
}

/// Non-blocking source of presented credentials
#[async_trait]
pub trait CredentialReader: Send {
    /// Poll for a newly presented credential; `None` when no complete UID
    /// frame is available this tick
    async fn poll_new(&mut self) -> Result<Option<[u8; 4]>>;
}

/// Sink for 8-byte boot-keyboard reports
#[async_trait]
pub trait ReportTransport: Send {
    async fn write_report(&mut self, report: &KeyReport) -> Result<()>;
}

/// Open a device node without blocking reads on it
fn open_nonblocking(path: &Path, write: bool) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .read(true)
        .write(write)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
}
