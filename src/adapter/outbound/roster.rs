//! The registration roster as the first round's roster.

use crate::domain::{Principal, Registration};
use crate::port::Roster;

impl Roster for Registration {
    fn is_registered(&self, principal: &Principal) -> bool {
        Registration::is_registered(self, principal)
    }

    fn registration_count(&self) -> usize {
        Registration::registration_count(self)
    }
}
