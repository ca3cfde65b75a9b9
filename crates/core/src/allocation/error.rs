//! Allocation error types.

use fairshare_shared::AppError;
use thiserror::Error;

use super::amount::AmountViolation;

/// Errors that can occur while allocating a total across participants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    // ========== Input Errors ==========
    /// Final total is not a usable amount.
    #[error("Final total is invalid: {0}")]
    InvalidTotal(AmountViolation),

    /// No participants to allocate to.
    #[error("At least one participant is required")]
    EmptyParticipants,

    /// A participant's original amount is not a usable amount.
    #[error("Original amount of participant {id} (index {index}) is invalid: {violation}")]
    InvalidParticipantAmount {
        /// Position of the participant in the input.
        index: usize,
        /// Participant ID.
        id: String,
        /// What is wrong with the amount.
        violation: AmountViolation,
    },

    /// Original amounts sum to zero, so weights are undefined.
    #[error("Sum of original amounts must be greater than zero")]
    ZeroOriginalTotal,

    /// Original amounts sum past the supported range.
    #[error("Sum of original amounts is too large")]
    AmountOverflow,

    // ========== Internal Invariant Violations ==========
    /// Leftover distribution did not converge within its safety bound.
    #[error("Leftover distribution exceeded {iterations} iterations with {remaining} units left")]
    DistributionOverflow {
        /// Iterations performed before giving up.
        iterations: usize,
        /// Units still undistributed.
        remaining: i64,
    },

    /// Allocated amounts could not be reconciled with the final total.
    #[error("Allocated sum {allocated} cannot be reconciled with final total {expected}")]
    AllocationMismatch {
        /// Final total requested.
        expected: i64,
        /// Sum actually allocated.
        allocated: i64,
    },
}

impl AllocationError {
    /// Returns true for invariant violations that point at a defect rather than bad input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::DistributionOverflow { .. } | Self::AllocationMismatch { .. }
        )
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        if err.is_internal() {
            Self::Internal(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}
