//! Proportional splitting of an integer total.
//!
//! Given a final total (e.g. a discounted bill) and each participant's
//! original amount, compute how much each participant owes so that shares
//! follow the original proportions and add up exactly to the final total.

pub mod allocator;
pub mod amount;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use allocator::{Allocator, DEFAULT_CYCLE_LIMIT_FACTOR, allocate};
pub use amount::{AmountValue, AmountViolation};
pub use error::AllocationError;
pub use types::{AllocationResult, AllocationRow, ParticipantInput};
