//! Proportional allocation using the Largest Remainder Method.
//!
//! The allocator splits an integer total across participants in proportion
//! to their original amounts while ensuring the sum exactly equals the total
//! (no units lost or gained).
//!
//! The Largest Remainder Method works by:
//! 1. Calculate each participant's exact share
//! 2. Round each share down
//! 3. Calculate the leftover (total - sum of rounded shares)
//! 4. Hand out leftover units one at a time, largest fractional part first
//!
//! Shares are computed as exact fractions over the original total, so the
//! priority comparison never sees rounding noise. A final reconciliation pass
//! still verifies the sum before anything is returned.

pub use fairshare_shared::DEFAULT_CYCLE_LIMIT_FACTOR;
use fairshare_shared::AllocationConfig;
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use super::amount::AmountValue;
use super::error::AllocationError;
use super::types::{AllocationResult, AllocationRow, ParticipantInput};

/// Splits totals across participants proportionally.
///
/// Stateless apart from its safety bound; one instance can serve any number
/// of concurrent calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocator {
    cycle_limit_factor: usize,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::from_config(&AllocationConfig::default())
    }
}

impl Allocator {
    /// Creates an allocator whose leftover distribution stops after
    /// `cycle_limit_factor * participants` steps. A factor of zero is raised to one.
    #[must_use]
    pub fn new(cycle_limit_factor: usize) -> Self {
        Self {
            cycle_limit_factor: cycle_limit_factor.max(1),
        }
    }

    /// Creates an allocator from loaded configuration.
    #[must_use]
    pub fn from_config(config: &AllocationConfig) -> Self {
        Self::new(config.cycle_limit_factor)
    }

    /// Returns the configured safety factor.
    #[must_use]
    pub const fn cycle_limit_factor(&self) -> usize {
        self.cycle_limit_factor
    }

    /// Allocate `final_total` across `participants` in proportion to their
    /// original amounts.
    ///
    /// Ensures the sum of allocated amounts EXACTLY equals `final_total`.
    /// Rows come back in input order.
    ///
    /// # Errors
    ///
    /// Input errors (`InvalidTotal`, `EmptyParticipants`,
    /// `InvalidParticipantAmount`, `ZeroOriginalTotal`, `AmountOverflow`) are
    /// reported before any computation. `DistributionOverflow` and
    /// `AllocationMismatch` signal an internal invariant violation.
    ///
    /// # Example
    ///
    /// ```
    /// use fairshare_core::allocation::{Allocator, ParticipantInput};
    ///
    /// let participants = vec![
    ///     ParticipantInput::new("a", 1i64),
    ///     ParticipantInput::new("b", 1i64),
    ///     ParticipantInput::new("c", 1i64),
    /// ];
    /// let result = Allocator::default().allocate(10i64, &participants).unwrap();
    /// let amounts: Vec<i64> = result.rows.iter().map(|r| r.allocated_amount).collect();
    /// assert_eq!(amounts, vec![4, 3, 3]);
    /// ```
    pub fn allocate<A: AmountValue>(
        &self,
        final_total: A,
        participants: &[ParticipantInput<A>],
    ) -> Result<AllocationResult, AllocationError> {
        let final_total = final_total
            .to_minor_units()
            .map_err(AllocationError::InvalidTotal)?;

        if participants.is_empty() {
            return Err(AllocationError::EmptyParticipants);
        }

        let amounts = participants
            .iter()
            .enumerate()
            .map(|(index, participant)| {
                participant.original_amount.to_minor_units().map_err(|violation| {
                    AllocationError::InvalidParticipantAmount {
                        index,
                        id: participant.id.clone(),
                        violation,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let original_total = amounts
            .iter()
            .try_fold(0i64, |sum, amount| sum.checked_add(*amount))
            .ok_or(AllocationError::AmountOverflow)?;
        if original_total <= 0 {
            return Err(AllocationError::ZeroOriginalTotal);
        }

        let total_dec = Decimal::from(original_total);
        let mut rows = Vec::with_capacity(participants.len());
        // Numerators of each fractional share over `original_total`.
        let mut remainders = Vec::with_capacity(participants.len());

        for (original_index, (participant, amount)) in
            participants.iter().zip(amounts).enumerate()
        {
            let (base_share, remainder) = split_share(final_total, amount, original_total)?;
            let fractional_share = Decimal::from(remainder) / total_dec;

            rows.push(AllocationRow {
                id: participant.id.clone(),
                name: participant.name.clone(),
                original_amount: amount,
                original_index,
                weight: Decimal::from(amount) / total_dec,
                exact_share: Decimal::from(base_share) + fractional_share,
                base_share,
                fractional_share,
                extra_share: 0,
                allocated_amount: base_share,
            });
            remainders.push(remainder);
        }

        let base_total: i64 = rows.iter().map(|row| row.base_share).sum();
        let remaining = final_total - base_total;
        let leftover_before_distribution = remaining.max(0);

        if remaining > 0 {
            let order = priority_order(&rows, &remainders);
            self.distribute(&mut rows, &order, remaining)?;
        }

        reconcile(&mut rows, final_total)?;

        debug!(
            participants = rows.len(),
            original_total,
            final_total,
            leftover = leftover_before_distribution,
            "Allocation computed"
        );

        Ok(AllocationResult {
            original_total,
            final_total,
            leftover_before_distribution,
            rows,
        })
    }

    /// Hands out `remaining` units one at a time, cycling through `order`.
    fn distribute(
        &self,
        rows: &mut [AllocationRow],
        order: &[usize],
        mut remaining: i64,
    ) -> Result<(), AllocationError> {
        let limit = order.len().saturating_mul(self.cycle_limit_factor);
        let mut cursor = 0usize;

        while remaining > 0 {
            if cursor >= limit {
                error!(
                    iterations = cursor,
                    remaining, "Leftover distribution exceeded its safety bound"
                );
                return Err(AllocationError::DistributionOverflow {
                    iterations: cursor,
                    remaining,
                });
            }

            let row = &mut rows[order[cursor % order.len()]];
            row.extra_share += 1;
            row.allocated_amount += 1;

            remaining -= 1;
            cursor += 1;
        }

        Ok(())
    }
}

/// Allocate with the default safety bound.
///
/// See [`Allocator::allocate`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use fairshare_core::allocation::{allocate, ParticipantInput};
///
/// // 100 split 50/30/20
/// let participants = vec![
///     ParticipantInput::new("a", dec!(50)),
///     ParticipantInput::new("b", dec!(30)),
///     ParticipantInput::new("c", dec!(20)),
/// ];
/// let result = allocate(dec!(100), &participants).unwrap();
/// assert_eq!(result.allocated_total(), 100);
/// ```
pub fn allocate<A: AmountValue>(
    final_total: A,
    participants: &[ParticipantInput<A>],
) -> Result<AllocationResult, AllocationError> {
    Allocator::default().allocate(final_total, participants)
}

/// Returns `(floor(final_total * amount / original_total), remainder)`.
fn split_share(
    final_total: i64,
    amount: i64,
    original_total: i64,
) -> Result<(i64, i64), AllocationError> {
    let scaled = i128::from(final_total) * i128::from(amount);
    let total = i128::from(original_total);

    let base = i64::try_from(scaled / total).map_err(|_| AllocationError::AmountOverflow)?;
    let remainder = i64::try_from(scaled % total).map_err(|_| AllocationError::AmountOverflow)?;
    Ok((base, remainder))
}

/// Row indices by fractional share desc, original amount desc, input position asc.
fn priority_order(rows: &[AllocationRow], remainders: &[i64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        remainders[b]
            .cmp(&remainders[a])
            .then_with(|| rows[b].original_amount.cmp(&rows[a].original_amount))
            .then_with(|| rows[a].original_index.cmp(&rows[b].original_index))
    });
    order
}

/// Forces the allocated sum onto `final_total` by adjusting the first row
/// that can absorb the difference without going negative.
fn reconcile(rows: &mut [AllocationRow], final_total: i64) -> Result<(), AllocationError> {
    let allocated: i64 = rows.iter().map(|row| row.allocated_amount).sum();
    if allocated == final_total {
        return Ok(());
    }

    let difference = final_total - allocated;
    let Some(row) = rows
        .iter_mut()
        .find(|row| row.allocated_amount + difference >= 0)
    else {
        error!(
            expected = final_total,
            allocated, "Allocated sum cannot be reconciled with final total"
        );
        return Err(AllocationError::AllocationMismatch {
            expected: final_total,
            allocated,
        });
    };

    warn!(
        id = %row.id,
        difference,
        "Allocated sum drifted from final total, adjusting row"
    );
    row.allocated_amount += difference;
    row.extra_share += difference;
    Ok(())
}
