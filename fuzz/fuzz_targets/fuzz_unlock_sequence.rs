#![no_main]

use libfuzzer_sys::fuzz_target;
use proxlock_core::{unlock_sequence, TimedDigit, UnlockCadence};

fuzz_target!(|data: &[u8]| {
    let mut digits = Vec::new();
    for chunk in data.chunks(2).take(32) {
        digits.push(TimedDigit {
            digit: chunk[0] as char,
            hold_ms: chunk.get(1).copied().unwrap_or(0) as u64,
        });
    }
    let cadence = UnlockCadence {
        wake_hold_ms: 300,
        digits,
    };

    // Building must never panic; non-digit keys error out cleanly
    if let Ok(sequence) = unlock_sequence(&cadence) {
        for step in sequence.steps() {
            let bytes = step.report.to_bytes();
            assert!(!step.report.is_release());
            // Reserved bytes stay zero
            assert_eq!(bytes[1], 0);
            assert_eq!(bytes[3], 0);
            assert_eq!(bytes[5], 0);
            assert_eq!(bytes[6], 0);
            assert_eq!(bytes[7], 0);
        }
    }
});
