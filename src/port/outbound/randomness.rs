//! Unpredictable-randomness port.
//!
//! Randomness is the only asynchronous boundary of the settlement core. A
//! request is issued synchronously and returns an identifier; the values
//! arrive later as a [`Fulfillment`] that the caller feeds back into the
//! tie-break. Retrying a failed request is the adapter's business, the core
//! only checks that a fulfillment matches the outstanding request.

use serde::Serialize;

use crate::domain::RequestId;
use crate::error::Result;

/// Values delivered for an earlier request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fulfillment {
    pub request: RequestId,
    pub values: Vec<u128>,
}

pub trait RandomnessSource: Send + Sync {
    /// Ask for `values` unpredictable integers.
    fn request_random(&self, values: u32) -> Result<RequestId>;
}
