//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams to everything the settlement core treats as an
//! external collaborator. Adapters implement them; the application
//! services consume them.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                  │               │                    │
//!     ▼                  ▼               ▼                    ▼
//! ┌─────────┐      ┌──────────┐   ┌────────────┐       ┌──────────┐
//! │Authority│      │  Roster  │   │ Randomness │       │ Treasury │
//! │ Adapter │      │ Adapter  │   │  Adapter   │       │ Adapter  │
//! └─────────┘      └──────────┘   └────────────┘       └──────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`Authority`] - Role lookup and authorization
//! - [`Roster`] - Registration roster feeding the first round
//! - [`RandomnessSource`] - Asynchronous unpredictable integers
//! - [`Treasury`] - Fee and recovery sink

pub mod outbound;

pub use outbound::authority::Authority;
pub use outbound::randomness::{Fulfillment, RandomnessSource};
pub use outbound::roster::{Roster, RosterGate};
pub use outbound::treasury::Treasury;
