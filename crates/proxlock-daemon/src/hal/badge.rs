//! Badge reader bridge driver
//!
//! Anticollision and card selection happen on the reader module itself;
//! this driver consumes the 4-byte UID frames it emits, one frame per
//! card presentation.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::hal::{open_nonblocking, CredentialReader};

pub struct BadgeBridge {
    device: File,
    frame: [u8; 4],
    filled: usize,
}

impl BadgeBridge {
    /// Open the bridge device node
    pub fn open(path: &Path) -> Result<Self> {
        let device = open_nonblocking(path, false)?;
        Ok(Self {
            device,
            frame: [0u8; 4],
            filled: 0,
        })
    }
}

#[async_trait]
impl CredentialReader for BadgeBridge {
    async fn poll_new(&mut self) -> Result<Option<[u8; 4]>> {
        loop {
            match self.device.read(&mut self.frame[self.filled..]) {
                Ok(0) => return Ok(None),
                Ok(n) => {
                    self.filled += n;
                    if self.filled == self.frame.len() {
                        self.filled = 0;
                        debug!("uid frame {}", hex::encode(self.frame));
                        return Ok(Some(self.frame));
                    }
                    // Partial frame: keep accumulating on later polls
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }
}
