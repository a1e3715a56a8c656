//! Property-based tests for proxlock-core using proptest
//!
//! These tests verify invariants that should hold for all valid inputs.

use proptest::prelude::*;
use proxlock_core::{
    unlock_sequence, Credential, DistanceReading, LockDecision, PresenceMonitor, TimedDigit,
    UnlockCadence, GRACE_PERIOD_MS, LOCK_THRESHOLD_INCHES,
};

// ============================================
// Arbitrary Implementations
// ============================================

fn arb_uid_bytes() -> impl Strategy<Value = [u8; 4]> {
    any::<[u8; 4]>()
}

fn arb_reading() -> impl Strategy<Value = DistanceReading> {
    // Round trips up to ~4x the sensor's real ceiling
    (0u64..100_000).prop_map(DistanceReading::from_round_trip_us)
}

fn arb_timed_digit() -> impl Strategy<Value = TimedDigit> {
    (prop::char::range('0', '9'), 0u64..1_000)
        .prop_map(|(digit, hold_ms)| TimedDigit { digit, hold_ms })
}

fn arb_cadence() -> impl Strategy<Value = UnlockCadence> {
    (0u64..1_000, prop::collection::vec(arb_timed_digit(), 0..16))
        .prop_map(|(wake_hold_ms, digits)| UnlockCadence {
            wake_hold_ms,
            digits,
        })
}

// ============================================
// Credential decode
// ============================================

proptest! {
    #[test]
    fn credential_matches_shift_formula(bytes in arb_uid_bytes()) {
        let expected = ((bytes[0] as u32) << 24)
            | ((bytes[1] as u32) << 16)
            | ((bytes[2] as u32) << 8)
            | (bytes[3] as u32);
        prop_assert_eq!(Credential::from_bytes(bytes).as_u32(), expected);
    }

    #[test]
    fn credential_byte_roundtrip(bytes in arb_uid_bytes()) {
        prop_assert_eq!(Credential::from_bytes(bytes).to_bytes(), bytes);
    }
}

// ============================================
// Presence policy
// ============================================

proptest! {
    #[test]
    fn never_locks_at_or_below_threshold(
        // Round trips that decode to at most 80 inches
        round_trip_us in 0u64..11_988,
        now_ms in any::<u64>(),
        unlocked_at_ms in any::<u64>(),
    ) {
        let reading = DistanceReading::from_round_trip_us(round_trip_us);
        prop_assert!(reading.inches() <= LOCK_THRESHOLD_INCHES);

        let monitor = PresenceMonitor::default();
        prop_assert_eq!(
            monitor.evaluate(reading, now_ms, unlocked_at_ms),
            LockDecision::Stay
        );
    }

    #[test]
    fn lock_implies_absent_and_grace_elapsed(
        reading in arb_reading(),
        now_ms in any::<u64>(),
        unlocked_at_ms in any::<u64>(),
    ) {
        let monitor = PresenceMonitor::default();
        if monitor.evaluate(reading, now_ms, unlocked_at_ms) == LockDecision::Lock {
            prop_assert!(reading.inches() > LOCK_THRESHOLD_INCHES);
            prop_assert!(now_ms.saturating_sub(unlocked_at_ms) >= GRACE_PERIOD_MS);
        }
    }
}

// ============================================
// Key sequences
// ============================================

proptest! {
    #[test]
    fn unlock_sequence_shape(cadence in arb_cadence()) {
        let sequence = unlock_sequence(&cadence).unwrap();
        let steps = sequence.steps();

        // Wake press, one step per digit, final Enter
        prop_assert_eq!(steps.len(), cadence.digits.len() + 2);
        prop_assert_eq!(steps[0].report.to_bytes()[2], 0xE0);
        prop_assert_eq!(steps[steps.len() - 1].report.to_bytes()[2], 0x28);

        for (step, timed) in steps[1..steps.len() - 1].iter().zip(&cadence.digits) {
            prop_assert_eq!(step.hold.as_millis() as u64, timed.hold_ms);
        }
    }

    #[test]
    fn built_reports_are_never_releases(cadence in arb_cadence()) {
        let sequence = unlock_sequence(&cadence).unwrap();
        for step in sequence.steps() {
            let bytes = step.report.to_bytes();
            prop_assert!(!step.report.is_release());
            // Reserved bytes stay zero
            prop_assert_eq!(bytes[1], 0);
            prop_assert_eq!(bytes[3], 0);
            prop_assert_eq!(bytes[5], 0);
            prop_assert_eq!(bytes[6], 0);
            prop_assert_eq!(bytes[7], 0);
        }
    }
}
