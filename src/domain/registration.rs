//! Entry registration for the first round.
//!
//! Each principal registers once by paying the fixed entry fee. A cut of
//! every entry goes to the treasury immediately; the rest stays here until
//! an admin forwards it to the prize pool.

use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use super::error::RegistrationError;
use super::id::Principal;
use super::money::{Amount, FeeRate};

/// Where one entry fee went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntrySplit {
    pub treasury: Amount,
    pub held: Amount,
}

/// Registration roster.
#[derive(Debug, Clone)]
pub struct Registration {
    entry_fee: Amount,
    treasury_cut: FeeRate,
    players: Vec<Principal>,
    registered: HashSet<Principal>,
    held: Amount,
    forwarded: Amount,
    closed: bool,
}

impl Registration {
    #[must_use]
    pub fn new(entry_fee: Amount, treasury_cut: FeeRate) -> Self {
        Self {
            entry_fee,
            treasury_cut,
            players: Vec::new(),
            registered: HashSet::new(),
            held: Amount::ZERO,
            forwarded: Amount::ZERO,
            closed: false,
        }
    }

    /// Register `principal`, who attached `attached` to the call.
    ///
    /// Returns the split of the entry fee; the treasury part is for the
    /// caller to deposit.
    pub fn register(
        &mut self,
        principal: &Principal,
        attached: Amount,
    ) -> Result<EntrySplit, RegistrationError> {
        if self.closed {
            return Err(RegistrationError::RegistrationClosed);
        }
        if self.registered.contains(principal) {
            return Err(RegistrationError::AlreadyRegistered {
                principal: principal.clone(),
            });
        }
        if attached != self.entry_fee {
            return Err(RegistrationError::AmountMismatch {
                entry_fee: self.entry_fee,
                attached,
            });
        }

        let treasury = self.treasury_cut.fee_on(attached)?;
        let kept = attached.checked_sub(treasury)?;
        let held = self.held.checked_add(kept)?;

        self.held = held;
        self.registered.insert(principal.clone());
        self.players.push(principal.clone());

        info!(
            principal = %principal,
            treasury = %treasury,
            held = %kept,
            players = self.players.len(),
            "Player registered"
        );
        Ok(EntrySplit {
            treasury,
            held: kept,
        })
    }

    /// Stop accepting registrations.
    pub fn close(&mut self) -> Result<(), RegistrationError> {
        if self.closed {
            return Err(RegistrationError::RegistrationClosed);
        }
        self.closed = true;
        info!(players = self.players.len(), "Registration closed");
        Ok(())
    }

    /// Drain the held balance for transfer to the prize pool.
    pub fn forward(&mut self) -> Result<Amount, RegistrationError> {
        if self.held.is_zero() {
            return Err(RegistrationError::NothingToForward);
        }
        let amount = self.held;
        let forwarded = self.forwarded.checked_add(amount)?;

        self.held = Amount::ZERO;
        self.forwarded = forwarded;
        info!(amount = %amount, "Registration funds forwarded");
        Ok(amount)
    }

    #[must_use]
    pub fn is_registered(&self, principal: &Principal) -> bool {
        self.registered.contains(principal)
    }

    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.players.len()
    }

    /// Players in registration order.
    #[must_use]
    pub fn players(&self) -> &[Principal] {
        &self.players
    }

    #[must_use]
    pub fn entry_fee(&self) -> Amount {
        self.entry_fee
    }

    #[must_use]
    pub fn held(&self) -> Amount {
        self.held
    }

    #[must_use]
    pub fn forwarded(&self) -> Amount {
        self.forwarded
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
