//! Fee and recovery sink port.

use crate::domain::Amount;
use crate::error::Result;

/// Accepts transfers of protocol fees, registration cuts and emergency
/// sweeps.
pub trait Treasury: Send + Sync {
    /// Record a transfer of `amount`; `source` names where it came from.
    fn deposit(&self, source: &str, amount: Amount) -> Result<()>;

    /// Total received so far.
    fn balance(&self) -> Amount;
}
