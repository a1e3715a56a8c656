//! Credential authorization policy

use serde::{Deserialize, Serialize};

use crate::error::{ProxlockError, Result};
use crate::types::{Credential, LockState};
use crate::{CARD_A, CARD_B};

/// When a credential is allowed to fire the unlock sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockPolicy {
    /// Authorizes regardless of the current lock state
    Always,
    /// Authorizes only while the host is locked
    WhenLocked,
}

/// A single authorized credential and its policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedCard {
    pub credential: Credential,
    pub policy: UnlockPolicy,
}

/// The configured set of credentials permitted to trigger an unlock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizedSet {
    cards: Vec<AuthorizedCard>,
}

impl Default for AuthorizedSet {
    /// Card-A unlocks unconditionally; Card-B only while locked
    fn default() -> Self {
        Self {
            cards: vec![
                AuthorizedCard {
                    credential: Credential::new(CARD_A),
                    policy: UnlockPolicy::Always,
                },
                AuthorizedCard {
                    credential: Credential::new(CARD_B),
                    policy: UnlockPolicy::WhenLocked,
                },
            ],
        }
    }
}

impl AuthorizedSet {
    pub fn new(cards: Vec<AuthorizedCard>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[AuthorizedCard] {
        &self.cards
    }

    /// Fails when no credentials are configured; a locked host would have
    /// no way back to Unlocked
    pub fn validate(&self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(ProxlockError::EmptyAuthorizedSet);
        }
        Ok(())
    }

    /// Whether `credential` authorizes an unlock in the current state
    pub fn authorize(&self, credential: Credential, state: LockState) -> bool {
        self.cards.iter().any(|card| {
            card.credential == credential
                && match card.policy {
                    UnlockPolicy::Always => true,
                    UnlockPolicy::WhenLocked => state.is_locked(),
                }
        })
    }
}
