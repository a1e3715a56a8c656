//! Timed keystroke emission

use tracing::debug;

use proxlock_core::{KeyReport, KeySequence};

use crate::clock::Clock;
use crate::error::Result;
use crate::hal::ReportTransport;

/// Emits key sequences with a guaranteed release between steps
///
/// Each step's report is written, held for the step's duration, then
/// followed by the all-zero release report before anything else goes on
/// the wire. The host never observes two consecutive non-released key
/// states.
pub struct KeystrokeInjector<T, C> {
    transport: T,
    clock: C,
}

impl<T: ReportTransport, C: Clock> KeystrokeInjector<T, C> {
    pub fn new(transport: T, clock: C) -> Self {
        Self { transport, clock }
    }

    /// Emit every step of `sequence`
    ///
    /// Blocks the tick loop for the sequence's cumulative hold time; a
    /// started sequence always runs to completion.
    pub async fn emit(&mut self, sequence: &KeySequence) -> Result<()> {
        debug!(
            steps = sequence.steps().len(),
            duration_ms = sequence.duration().as_millis() as u64,
            "emitting key sequence"
        );
        for step in sequence.steps() {
            self.transport.write_report(&step.report).await?;
            self.clock.sleep(step.hold).await;
            self.transport.write_report(&KeyReport::RELEASE).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use proxlock_core::{lock_sequence, unlock_sequence, UnlockCadence};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingTransport {
        reports: Arc<Mutex<Vec<[u8; 8]>>>,
    }

    #[async_trait]
    impl ReportTransport for RecordingTransport {
        async fn write_report(&mut self, report: &KeyReport) -> Result<()> {
            self.reports.lock().unwrap().push(report.to_bytes());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct ManualClock {
        now_ms: Arc<Mutex<u64>>,
        sleeps: Arc<Mutex<Vec<u64>>>,
    }

    #[async_trait]
    impl Clock for ManualClock {
        fn now_ms(&self) -> u64 {
            *self.now_ms.lock().unwrap()
        }

        async fn sleep(&self, duration: Duration) {
            let ms = duration.as_millis() as u64;
            *self.now_ms.lock().unwrap() += ms;
            self.sleeps.lock().unwrap().push(ms);
        }
    }

    #[tokio::test]
    async fn every_press_is_followed_by_release() {
        let transport = RecordingTransport::default();
        let reports = Arc::clone(&transport.reports);
        let mut injector = KeystrokeInjector::new(transport, ManualClock::default());

        injector
            .emit(&unlock_sequence(&UnlockCadence::default()).unwrap())
            .await
            .unwrap();

        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 8);
        for pair in reports.chunks(2) {
            assert_ne!(pair[0], [0u8; 8]);
            assert_eq!(pair[1], [0u8; 8]);
        }
    }

    #[tokio::test]
    async fn holds_follow_the_configured_cadence() {
        let clock = ManualClock::default();
        let sleeps = Arc::clone(&clock.sleeps);
        let mut injector = KeystrokeInjector::new(RecordingTransport::default(), clock);

        injector
            .emit(&unlock_sequence(&UnlockCadence::default()).unwrap())
            .await
            .unwrap();

        assert_eq!(*sleeps.lock().unwrap(), vec![300, 150, 110, 20]);
    }

    #[tokio::test]
    async fn lock_chord_is_tapped_and_released() {
        let transport = RecordingTransport::default();
        let reports = Arc::clone(&transport.reports);
        let mut injector = KeystrokeInjector::new(transport, ManualClock::default());

        injector.emit(&lock_sequence()).await.unwrap();

        let reports = reports.lock().unwrap();
        assert_eq!(
            *reports,
            vec![[0xE1, 0, 0xE0, 0, 0x66, 0, 0, 0], [0u8; 8]]
        );
    }
}
