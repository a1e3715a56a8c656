//! Ranging bridge driver
//!
//! The sensor coprocessor owns trigger/echo pulse timing; this driver
//! requests one measurement per tick and reads back the raw round-trip
//! time as a 4-byte big-endian microsecond count.

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use proxlock_core::DistanceReading;

use crate::error::Result;
use crate::hal::{open_nonblocking, RangeSampler};

/// Request byte that starts one trigger/echo cycle on the bridge
const TRIGGER: u8 = b'T';

/// Poll interval while waiting for the echo frame
const ECHO_POLL: Duration = Duration::from_millis(1);

pub struct SonarBridge {
    device: File,
    echo_timeout: Duration,
    frame: [u8; 4],
    filled: usize,
}

impl SonarBridge {
    /// Open the bridge device node
    pub fn open(path: &Path, echo_timeout: Duration) -> Result<Self> {
        let device = open_nonblocking(path, true)?;
        Ok(Self {
            device,
            echo_timeout,
            frame: [0u8; 4],
            filled: 0,
        })
    }

    fn drain_stale(&mut self) -> std::io::Result<()> {
        // An echo that arrived after a previous deadline must not be read
        // as this cycle's answer
        let mut scratch = [0u8; 64];
        loop {
            match self.device.read(&mut scratch) {
                Ok(0) => return Ok(()),
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl RangeSampler for SonarBridge {
    async fn measure(&mut self) -> Result<Option<DistanceReading>> {
        self.filled = 0;
        self.drain_stale()?;

        loop {
            match self.device.write(&[TRIGGER]) {
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    tokio::time::sleep(ECHO_POLL).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let deadline = tokio::time::Instant::now() + self.echo_timeout;
        loop {
            match self.device.read(&mut self.frame[self.filled..]) {
                Ok(0) => {}
                Ok(n) => {
                    self.filled += n;
                    if self.filled == self.frame.len() {
                        let round_trip = u32::from_be_bytes(self.frame) as u64;
                        trace!(round_trip_us = round_trip, "echo frame");
                        return Ok(Some(DistanceReading::from_round_trip_us(round_trip)));
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => {}
                Err(e) => return Err(e.into()),
            }

            if tokio::time::Instant::now() >= deadline {
                debug!("no echo within {:?}", self.echo_timeout);
                return Ok(None);
            }
            tokio::time::sleep(ECHO_POLL).await;
        }
    }
}
