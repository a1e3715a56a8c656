//! Core newtypes: credentials, distance readings, lock state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credential - 32-bit identifier assembled from a presented tag UID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(u32);

impl Credential {
    /// Create a Credential from its numeric value
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Assemble from the first four UID bytes, big-endian
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// UID bytes as presented by the reader
    pub fn to_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Hex dump of the UID bytes for diagnostics
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_be_bytes())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single ranging measurement, kept as the raw round-trip echo time
///
/// Distances are derived on demand; the conversion divisors are part of the
/// sensor contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceReading {
    round_trip_us: u64,
}

impl DistanceReading {
    pub fn from_round_trip_us(round_trip_us: u64) -> Self {
        Self { round_trip_us }
    }

    pub fn round_trip_us(&self) -> u64 {
        self.round_trip_us
    }

    /// Distance in inches: half the round trip divided by 74 us/inch
    pub fn inches(&self) -> u64 {
        (self.round_trip_us / 2) / 74
    }

    /// Distance in centimeters: half the round trip divided by 29.1 us/cm
    pub fn centimeters(&self) -> u64 {
        ((self.round_trip_us / 2) as f64 / 29.1) as u64
    }
}

/// Whether the host workstation is currently believed locked
///
/// A single authoritative copy lives in the controller; boot assumes the
/// host starts unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked)
    }
}
