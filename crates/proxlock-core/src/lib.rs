//! Proxlock Core - Decision logic and report types for the workstation-lock
//! controller
//!
//! This crate provides the presence/grace policy, credential authorization,
//! and boot-keyboard report building consumed by the Proxlock daemon. It
//! performs no I/O; every decision is a pure function of its inputs.

pub mod authorize;
pub mod error;
pub mod keys;
pub mod presence;
pub mod types;

pub use authorize::{AuthorizedCard, AuthorizedSet, UnlockPolicy};
pub use error::{ProxlockError, Result};
pub use keys::{
    lock_sequence, unlock_sequence, KeyCode, KeyReport, KeySequence, KeySequenceStep, TimedDigit,
    UnlockCadence,
};
pub use presence::{LockDecision, PresenceMonitor};
pub use types::{Credential, DistanceReading, LockState};

/// Distance beyond which the operator counts as absent (inches)
pub const LOCK_THRESHOLD_INCHES: u64 = 80;

/// Absence detection is suppressed for this long after an unlock (ms)
pub const GRACE_PERIOD_MS: u64 = 5000;

/// Default Card-A credential: unlocks unconditionally
pub const CARD_A: u32 = 20435;

/// Default Card-B credential: unlocks only while locked
pub const CARD_B: u32 = 29468;

/// Hold for the control press that wakes the login prompt (ms)
pub const WAKE_HOLD_MS: u64 = 300;

/// Hold for single-tap steps: the lock chord and the final Enter (ms)
pub const TAP_HOLD_MS: u64 = 20;
