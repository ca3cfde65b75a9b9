//! Allocation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A participant to allocate to, weighted by its original amount.
///
/// `A` is whatever numeric type the caller holds the amount in; it is
/// validated when the allocation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInput<A = Decimal> {
    /// Opaque participant ID, unique within one allocation.
    pub id: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Pre-adjustment amount in minor units.
    pub original_amount: A,
}

impl<A> ParticipantInput<A> {
    /// Creates an unnamed participant.
    pub fn new(id: impl Into<String>, original_amount: A) -> Self {
        Self {
            id: id.into(),
            name: None,
            original_amount,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Per-participant allocation breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRow {
    /// Participant ID.
    pub id: String,
    /// Participant display name.
    pub name: Option<String>,
    /// Validated original amount.
    pub original_amount: i64,
    /// Position in the input, used only as the last tie-break.
    pub original_index: usize,
    /// `original_amount / original_total`.
    pub weight: Decimal,
    /// Ideal fractional allocation, `final_total * weight`.
    pub exact_share: Decimal,
    /// `floor(exact_share)`.
    pub base_share: i64,
    /// `exact_share - base_share`.
    pub fractional_share: Decimal,
    /// Leftover units granted on top of the base share.
    pub extra_share: i64,
    /// Final amount for this participant.
    pub allocated_amount: i64,
}

impl AllocationRow {
    /// Allocated minus original amount; negative for a discount.
    #[must_use]
    pub const fn adjustment(&self) -> i64 {
        self.allocated_amount - self.original_amount
    }
}

/// Result of an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Sum of all original amounts.
    pub original_total: i64,
    /// Amount that was split.
    pub final_total: i64,
    /// Units left after base shares, before any were handed out.
    pub leftover_before_distribution: i64,
    /// One row per participant, in input order.
    pub rows: Vec<AllocationRow>,
}

impl AllocationResult {
    /// Sum of allocated amounts. Always equals `final_total`.
    #[must_use]
    pub fn allocated_total(&self) -> i64 {
        self.rows.iter().map(|row| row.allocated_amount).sum()
    }

    /// `final_total - original_total`; negative for a discount.
    #[must_use]
    pub const fn adjustment_total(&self) -> i64 {
        self.final_total - self.original_total
    }

    /// Looks up a row by participant ID.
    #[must_use]
    pub fn row(&self, id: &str) -> Option<&AllocationRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}
