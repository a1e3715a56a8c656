//! Boot-keyboard report layout and timed key sequences

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProxlockError, Result};
use crate::{TAP_HOLD_MS, WAKE_HOLD_MS};

/// HID usage values the controller is allowed to emit
///
/// Reports can only be built from these, so an invalid usage byte cannot
/// reach the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyCode {
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,
    Enter = 0x28,
    Power = 0x66,
    LeftCtrl = 0xE0,
    LeftShift = 0xE1,
}

impl KeyCode {
    /// Usage code for a password digit
    pub fn from_digit(digit: char) -> Result<Self> {
        Ok(match digit {
            '1' => KeyCode::Digit1,
            '2' => KeyCode::Digit2,
            '3' => KeyCode::Digit3,
            '4' => KeyCode::Digit4,
            '5' => KeyCode::Digit5,
            '6' => KeyCode::Digit6,
            '7' => KeyCode::Digit7,
            '8' => KeyCode::Digit8,
            '9' => KeyCode::Digit9,
            '0' => KeyCode::Digit0,
            other => return Err(ProxlockError::UnsupportedKey(other)),
        })
    }

    pub fn usage(&self) -> u8 {
        *self as u8
    }
}

/// One 8-byte boot-keyboard report: a modifier and up to two held keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReport {
    modifier: Option<KeyCode>,
    key1: Option<KeyCode>,
    key2: Option<KeyCode>,
}

impl KeyReport {
    /// The all-zero release report
    pub const RELEASE: KeyReport = KeyReport {
        modifier: None,
        key1: None,
        key2: None,
    };

    /// A single held key
    pub fn press(key: KeyCode) -> Self {
        Self {
            modifier: None,
            key1: Some(key),
            key2: None,
        }
    }

    /// A modifier plus two simultaneously held keys
    pub fn chord(modifier: KeyCode, key1: KeyCode, key2: KeyCode) -> Self {
        Self {
            modifier: Some(modifier),
            key1: Some(key1),
            key2: Some(key2),
        }
    }

    pub fn is_release(&self) -> bool {
        self.modifier.is_none() && self.key1.is_none() && self.key2.is_none()
    }

    /// Wire layout: [modifier, 0, key1, 0, key2, 0, 0, 0]
    pub fn to_bytes(&self) -> [u8; 8] {
        let usage = |key: Option<KeyCode>| key.map_or(0, |k| k.usage());
        [
            usage(self.modifier),
            0,
            usage(self.key1),
            0,
            usage(self.key2),
            0,
            0,
            0,
        ]
    }
}

/// A report held for a fixed duration, released before the next step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySequenceStep {
    pub report: KeyReport,
    pub hold: Duration,
}

impl KeySequenceStep {
    pub fn new(report: KeyReport, hold_ms: u64) -> Self {
        Self {
            report,
            hold: Duration::from_millis(hold_ms),
        }
    }
}

/// Ordered list of timed steps emitted to simulate user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence {
    steps: Vec<KeySequenceStep>,
}

impl KeySequence {
    pub fn steps(&self) -> &[KeySequenceStep] {
        &self.steps
    }

    /// Cumulative hold time, excluding transport writes
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|step| step.hold).sum()
    }
}

/// A password digit and how long its key is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedDigit {
    pub digit: char,
    pub hold_ms: u64,
}

/// Unlock keystroke cadence
///
/// The hold times are part of the host contract: the login prompt expects
/// keys at exactly this pace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockCadence {
    /// Hold for the control press that wakes the login prompt (ms)
    pub wake_hold_ms: u64,
    /// Password digits in typing order
    pub digits: Vec<TimedDigit>,
}

impl Default for UnlockCadence {
    fn default() -> Self {
        Self {
            wake_hold_ms: WAKE_HOLD_MS,
            digits: vec![
                TimedDigit {
                    digit: '1',
                    hold_ms: 150,
                },
                TimedDigit {
                    digit: '3',
                    hold_ms: 110,
                },
            ],
        }
    }
}

/// The lock chord: left-shift + left-ctrl + power, tapped once
pub fn lock_sequence() -> KeySequence {
    KeySequence {
        steps: vec![KeySequenceStep::new(
            KeyReport::chord(KeyCode::LeftShift, KeyCode::LeftCtrl, KeyCode::Power),
            TAP_HOLD_MS,
        )],
    }
}

/// Wake the login prompt, type the password digits, confirm with Enter
pub fn unlock_sequence(cadence: &UnlockCadence) -> Result<KeySequence> {
    let mut steps = Vec::with_capacity(cadence.digits.len() + 2);
    steps.push(KeySequenceStep::new(
        KeyReport::press(KeyCode::LeftCtrl),
        cadence.wake_hold_ms,
    ));
    for timed in &cadence.digits {
        steps.push(KeySequenceStep::new(
            KeyReport::press(KeyCode::from_digit(timed.digit)?),
            timed.hold_ms,
        ));
    }
    steps.push(KeySequenceStep::new(
        KeyReport::press(KeyCode::Enter),
        TAP_HOLD_MS,
    ));
    Ok(KeySequence { steps })
}
