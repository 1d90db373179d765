//! In-process randomness coordinator.
//!
//! Hands out request identifiers immediately and queues the requests. The
//! values are produced only when the driver calls [`RngCoordinator::fulfill`]
//! or [`RngCoordinator::fulfill_next`], which mirrors an external oracle
//! answering in a later transaction. A fixed seed makes simulations
//! reproducible.

use std::collections::VecDeque;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::domain::RequestId;
use crate::error::{Error, Result};
use crate::port::{Fulfillment, RandomnessSource};

#[derive(Debug)]
struct PendingRequest {
    request: RequestId,
    values: u32,
}

#[derive(Debug)]
pub struct RngCoordinator {
    rng: Mutex<StdRng>,
    pending: Mutex<VecDeque<PendingRequest>>,
}

impl RngCoordinator {
    /// Coordinator with a deterministic value stream.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Coordinator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Answer the oldest outstanding request.
    pub fn fulfill_next(&self) -> Option<Fulfillment> {
        let pending = self.pending.lock().pop_front()?;
        Some(self.generate(pending))
    }

    /// Answer a specific outstanding request.
    pub fn fulfill(&self, request: RequestId) -> Option<Fulfillment> {
        let pending = {
            let mut queue = self.pending.lock();
            let index = queue.iter().position(|p| p.request == request)?;
            queue.remove(index)?
        };
        Some(self.generate(pending))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    fn generate(&self, pending: PendingRequest) -> Fulfillment {
        let mut rng = self.rng.lock();
        let values = (0..pending.values).map(|_| rng.gen::<u128>()).collect();
        info!(request = %pending.request, count = pending.values, "Randomness delivered");
        Fulfillment {
            request: pending.request,
            values,
        }
    }
}

impl RandomnessSource for RngCoordinator {
    fn request_random(&self, values: u32) -> Result<RequestId> {
        if values == 0 {
            return Err(Error::Randomness(
                "at least one value must be requested".to_string(),
            ));
        }
        let request = RequestId::generate();
        self.pending.lock().push_back(PendingRequest { request, values });
        debug!(request = %request, values, "Randomness requested");
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        let a = RngCoordinator::seeded(7);
        let b = RngCoordinator::seeded(7);
        a.request_random(2).unwrap();
        b.request_random(2).unwrap();

        let va = a.fulfill_next().unwrap().values;
        let vb = b.fulfill_next().unwrap().values;

        assert_eq!(va.len(), 2);
        assert_eq!(va, vb);
    }

    #[test]
    fn fulfillment_is_delivered_once() {
        let coordinator = RngCoordinator::seeded(1);
        let request = coordinator.request_random(1).unwrap();

        assert_eq!(coordinator.pending_count(), 1);
        assert_eq!(coordinator.fulfill(request).map(|f| f.request), Some(request));
        assert!(coordinator.fulfill(request).is_none());
        assert!(coordinator.fulfill_next().is_none());
    }

    #[test]
    fn zero_values_is_rejected() {
        let coordinator = RngCoordinator::from_entropy();
        assert!(matches!(
            coordinator.request_random(0),
            Err(Error::Randomness(_))
        ));
    }
}
