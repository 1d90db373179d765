//! Test doubles for the outbound ports.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::adapter::outbound::TreasuryVault;
use crate::domain::{Amount, RequestId};
use crate::error::{Error, Result};
use crate::port::{Fulfillment, RandomnessSource, Treasury};

/// Randomness source whose answers the test chooses.
#[derive(Debug, Default)]
pub struct ScriptedRandomness {
    requests: Mutex<Vec<RequestId>>,
    offline: AtomicBool,
}

impl ScriptedRandomness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent requests fail.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Requests issued so far, oldest first.
    pub fn requests(&self) -> Vec<RequestId> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RequestId> {
        self.requests.lock().last().copied()
    }

    /// Build the fulfillment for `request` carrying `value`.
    pub fn answer(request: RequestId, value: u128) -> Fulfillment {
        Fulfillment {
            request,
            values: vec![value],
        }
    }
}

impl RandomnessSource for ScriptedRandomness {
    fn request_random(&self, _values: u32) -> Result<RequestId> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Randomness("coordinator offline".to_string()));
        }
        let request = RequestId::generate();
        self.requests.lock().push(request);
        Ok(request)
    }
}

/// Treasury that can be switched to reject deposits.
#[derive(Debug, Default)]
pub struct FlakyTreasury {
    inner: TreasuryVault,
    refusing: AtomicBool,
}

impl FlakyTreasury {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_refusing(&self, refusing: bool) {
        self.refusing.store(refusing, Ordering::SeqCst);
    }
}

impl Treasury for FlakyTreasury {
    fn deposit(&self, source: &str, amount: Amount) -> Result<()> {
        if self.refusing.load(Ordering::SeqCst) {
            return Err(Error::Treasury(format!("deposit from {source} refused")));
        }
        self.inner.deposit(source, amount)
    }

    fn balance(&self) -> Amount {
        self.inner.balance()
    }
}
