//! The lock/unlock state machine and its tick loop

use tracing::{debug, info, trace};

use proxlock_core::{
    lock_sequence, unlock_sequence, AuthorizedSet, Credential, DistanceReading, KeySequence,
    LockDecision, LockState, PresenceMonitor,
};

use crate::clock::Clock;
use crate::config::DaemonConfig;
use crate::error::Result;
use crate::hal::{CredentialReader, RangeSampler, ReportTransport};
use crate::injector::KeystrokeInjector;

/// Root state machine: samples presence, polls for credentials, drives the
/// keystroke injector
///
/// Owns the only mutable cross-tick state: the lock state and the grace
/// timer. Both are mutated exclusively from within a tick.
pub struct LockController<S, R, T, C> {
    sampler: S,
    reader: R,
    injector: KeystrokeInjector<T, C>,
    clock: C,
    monitor: PresenceMonitor,
    authorized: AuthorizedSet,
    lock_steps: KeySequence,
    unlock_steps: KeySequence,
    state: LockState,
    /// Most recent unlock, or boot
    unlocked_at_ms: u64,
}

impl<S, R, T, C> LockController<S, R, T, C>
where
    S: RangeSampler,
    R: CredentialReader,
    T: ReportTransport,
    C: Clock + Clone,
{
    /// Boot assumes the host starts unlocked, with the grace timer running
    /// from now
    pub fn new(config: &DaemonConfig, sampler: S, reader: R, transport: T, clock: C) -> Result<Self> {
        let unlock_steps = unlock_sequence(&config.unlock)?;
        let unlocked_at_ms = clock.now_ms();

        Ok(Self {
            sampler,
            reader,
            injector: KeystrokeInjector::new(transport, clock.clone()),
            clock,
            monitor: PresenceMonitor::new(config.lock_threshold_inches, config.grace_period_ms),
            authorized: config.authorized.clone(),
            lock_steps: lock_sequence(),
            unlock_steps,
            state: LockState::Unlocked,
            unlocked_at_ms,
        })
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    /// Run ticks until a device error surfaces
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.tick().await?;
        }
    }

    /// One scheduling tick
    ///
    /// Ranging comes first and bounds credential latency by its round-trip
    /// window; presence freshness wins over badge responsiveness.
    pub async fn tick(&mut self) -> Result<()> {
        match self.sampler.measure().await? {
            Some(reading) => self.evaluate_presence(reading).await?,
            // Distance unknown: skip the lock decision for this sample
            None => debug!("ranging timeout, skipping presence evaluation"),
        }

        if let Some(frame) = self.reader.poll_new().await? {
            self.evaluate_credential(Credential::from_bytes(frame)).await?;
        }

        Ok(())
    }

    async fn evaluate_presence(&mut self, reading: DistanceReading) -> Result<()> {
        trace!(inches = reading.inches(), "range sample");
        if self.state.is_locked() {
            return Ok(());
        }

        let decision = self
            .monitor
            .evaluate(reading, self.clock.now_ms(), self.unlocked_at_ms);
        if decision == LockDecision::Lock {
            info!("operator absent ({} in), locking host", reading.inches());
            self.injector.emit(&self.lock_steps).await?;
            self.state = LockState::Locked;
        }
        Ok(())
    }

    async fn evaluate_credential(&mut self, credential: Credential) -> Result<()> {
        if !self.authorized.authorize(credential, self.state) {
            debug!(
                "rejected credential {} (uid {})",
                credential,
                credential.to_hex()
            );
            return Ok(());
        }
        if self.state == LockState::Unlocked {
            // Authorized but already unlocked: no keystrokes, grace timer
            // keeps running
            debug!("credential {} accepted while unlocked", credential);
            return Ok(());
        }

        info!("credential {} accepted, unlocking host", credential);
        self.injector.emit(&self.unlock_steps).await?;
        self.state = LockState::Unlocked;
        self.unlocked_at_ms = self.clock.now_ms();
        Ok(())
    }
}
