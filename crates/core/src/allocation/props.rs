//! Property-based tests for proportional allocation.
//!
//! - Property 1: Exactness
//! - Property 2: Non-negativity
//! - Property 3: Order preservation
//! - Property 4: Proportionality bound
//! - Property 5: Determinism
//! - Property 6: Identity when nothing changes

use proptest::prelude::*;

use super::allocator::allocate;
use super::types::{AllocationResult, ParticipantInput};

/// Strategy to generate original amounts (1-20 participants, some may be zero).
fn original_amounts() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..1_000_000, 1..20)
        .prop_filter("original total must be positive", |amounts| {
            amounts.iter().any(|amount| *amount > 0)
        })
}

/// Strategy to generate a final total (0 to 10,000,000 minor units).
fn final_total() -> impl Strategy<Value = i64> {
    0i64..10_000_000
}

fn make_participants(amounts: &[i64]) -> Vec<ParticipantInput<i64>> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| ParticipantInput::new(format!("p{i}"), *amount))
        .collect()
}

fn run(total: i64, amounts: &[i64]) -> AllocationResult {
    allocate(total, &make_participants(amounts)).expect("valid input must allocate")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: Allocated amounts always sum to the final total.
    #[test]
    fn prop_sum_equals_final_total(
        total in final_total(),
        amounts in original_amounts(),
    ) {
        let result = run(total, &amounts);
        prop_assert_eq!(result.allocated_total(), total);
        prop_assert_eq!(result.original_total, amounts.iter().sum::<i64>());
    }

    /// Property 2: No participant is allocated a negative amount.
    #[test]
    fn prop_allocations_non_negative(
        total in final_total(),
        amounts in original_amounts(),
    ) {
        let result = run(total, &amounts);
        for row in &result.rows {
            prop_assert!(
                row.allocated_amount >= 0,
                "Row {} allocated {}",
                row.id, row.allocated_amount
            );
        }
        prop_assert!(result.leftover_before_distribution >= 0);
    }

    /// Property 3: Rows come back in input order with matching indexes.
    #[test]
    fn prop_rows_preserve_input_order(
        total in final_total(),
        amounts in original_amounts(),
    ) {
        let result = run(total, &amounts);
        prop_assert_eq!(result.rows.len(), amounts.len());
        for (i, row) in result.rows.iter().enumerate() {
            prop_assert_eq!(row.original_index, i);
            prop_assert_eq!(&row.id, &format!("p{i}"));
            prop_assert_eq!(row.original_amount, amounts[i]);
        }
    }

    /// Property 4: Each allocation is within one unit of its exact share.
    ///
    /// Checked in integers: |allocated * original_total - total * amount| < original_total.
    #[test]
    fn prop_allocation_within_one_unit_of_exact_share(
        total in final_total(),
        amounts in original_amounts(),
    ) {
        let result = run(total, &amounts);
        let original_total = i128::from(result.original_total);
        for row in &result.rows {
            let scaled_allocated = i128::from(row.allocated_amount) * original_total;
            let scaled_exact = i128::from(total) * i128::from(row.original_amount);
            prop_assert!(
                (scaled_allocated - scaled_exact).abs() < original_total,
                "Row {} allocated {} for exact share {}",
                row.id, row.allocated_amount, row.exact_share
            );
            prop_assert!(row.extra_share == 0 || row.extra_share == 1);
        }
        prop_assert!(result.leftover_before_distribution < i64::try_from(amounts.len()).unwrap());
    }

    /// Property 5: Same input, same output.
    #[test]
    fn prop_allocation_is_deterministic(
        total in final_total(),
        amounts in original_amounts(),
    ) {
        prop_assert_eq!(run(total, &amounts), run(total, &amounts));
    }

    /// Property 6: Splitting the original total gives back the original amounts.
    #[test]
    fn prop_identity_when_total_unchanged(
        amounts in original_amounts(),
    ) {
        let total: i64 = amounts.iter().sum();
        let result = run(total, &amounts);
        for row in &result.rows {
            prop_assert_eq!(row.allocated_amount, row.original_amount);
        }
        prop_assert_eq!(result.leftover_before_distribution, 0);
    }

    /// Larger original amounts never receive less than smaller ones.
    #[test]
    fn prop_allocation_is_monotonic_in_weight(
        total in final_total(),
        amounts in original_amounts(),
    ) {
        let result = run(total, &amounts);
        for a in &result.rows {
            for b in &result.rows {
                if a.original_amount > b.original_amount {
                    prop_assert!(
                        a.allocated_amount >= b.allocated_amount,
                        "{} ({}) got less than {} ({})",
                        a.id, a.original_amount, b.id, b.original_amount
                    );
                }
            }
        }
    }
}

mod unit_tests {
    use super::*;

    /// Many equal participants with a leftover of n - 1 units.
    #[test]
    fn test_leftover_one_less_than_participants() {
        let amounts = vec![1; 7];
        let result = run(13, &amounts);
        // 13 / 7 = 1 rem 6
        assert_eq!(result.leftover_before_distribution, 6);
        let allocated: Vec<i64> = result.rows.iter().map(|r| r.allocated_amount).collect();
        assert_eq!(allocated, vec![2, 2, 2, 2, 2, 2, 1]);
    }

    /// Largest supported totals still split exactly.
    #[test]
    fn test_extreme_magnitudes() {
        let amounts = vec![i64::MAX / 3, i64::MAX / 3, 1];
        let result = run(i64::MAX, &amounts);
        assert_eq!(result.allocated_total(), i64::MAX);
    }
}
