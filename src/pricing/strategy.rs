// Promotion Strategy
//
// Pure discount math: one promotion kind applied to one (unit price, quantity)
// pair. Callers guarantee unit_price > 0 and quantity > 0; a promotion whose
// own parameters are out of range degrades to a zero-discount outcome with
// applied = false instead of failing.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::promotions::PromotionKind;

/// Round a monetary amount to 2 decimal places, half-up
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Result of applying one promotion to one line
///
/// Amounts are unrounded; the line pricer rounds once when it emits the
/// priced line.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountOutcome {
    pub original_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub applied: bool,
}

impl DiscountOutcome {
    /// Outcome for an unpromoted line: original and final coincide
    pub fn unchanged(original_amount: Decimal) -> Self {
        Self {
            original_amount,
            discount_amount: Decimal::ZERO,
            final_amount: original_amount,
            applied: false,
        }
    }
}

impl PromotionKind {
    /// Compute the discount this promotion produces for one line
    ///
    /// Deterministic and side-effect free. Percentage promotions take
    /// pct/100 off the original amount; buy-X-get-Y-free promotions grant
    /// `get` free units per full `buy + get` cycle, plus the units beyond the
    /// `buy` threshold in a partial trailing cycle.
    pub fn apply(&self, unit_price: Decimal, quantity: i32) -> DiscountOutcome {
        let original_amount = unit_price * Decimal::from(quantity);

        match self {
            PromotionKind::Percentage {
                discount_percentage,
            } => {
                if *discount_percentage <= Decimal::ZERO
                    || *discount_percentage > Decimal::from(100)
                {
                    return DiscountOutcome::unchanged(original_amount);
                }

                let discount_amount =
                    original_amount * *discount_percentage / Decimal::from(100);
                DiscountOutcome {
                    original_amount,
                    discount_amount,
                    final_amount: original_amount - discount_amount,
                    applied: true,
                }
            }
            PromotionKind::BuyXGetYFree {
                buy_quantity,
                get_quantity,
            } => {
                if *buy_quantity < 1 || *get_quantity < 1 {
                    return DiscountOutcome::unchanged(original_amount);
                }

                let free_units = free_units(quantity, *buy_quantity, *get_quantity);
                let discount_amount = Decimal::from(free_units) * unit_price;
                DiscountOutcome {
                    original_amount,
                    discount_amount,
                    final_amount: original_amount - discount_amount,
                    applied: true,
                }
            }
        }
    }
}

/// Free units granted by a buy-X-get-Y-free rule for a given quantity
///
/// A cycle is `buy + get` units. Full cycles each grant `get` free units;
/// within a partial trailing cycle, the units beyond the `buy` threshold (up
/// to `get` of them) are free.
fn free_units(quantity: i32, buy: i32, get: i32) -> i32 {
    // Widen to i64: buy + get can exceed i32::MAX for large (but accepted)
    // promotion parameters. The result is at most `quantity`, so the
    // narrowing cast cannot lose anything.
    let (quantity, buy, get) = (i64::from(quantity), i64::from(buy), i64::from(get));
    let cycle = buy + get;
    let full_cycles = quantity / cycle;
    let remainder = quantity % cycle;
    (full_cycles * get + (remainder - buy).clamp(0, get)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_discount_basic() {
        let kind = PromotionKind::Percentage {
            discount_percentage: dec!(20),
        };
        let outcome = kind.apply(dec!(100), 3);

        assert!(outcome.applied);
        assert_eq!(outcome.original_amount, dec!(300));
        assert_eq!(outcome.discount_amount, dec!(60));
        assert_eq!(outcome.final_amount, dec!(240));
    }

    #[test]
    fn test_percentage_discount_full_hundred() {
        let kind = PromotionKind::Percentage {
            discount_percentage: dec!(100),
        };
        let outcome = kind.apply(dec!(12.50), 2);

        assert!(outcome.applied);
        assert_eq!(outcome.discount_amount, dec!(25));
        assert_eq!(outcome.final_amount, dec!(0));
    }

    #[test]
    fn test_percentage_out_of_range_falls_back_unapplied() {
        for pct in [dec!(0), dec!(-5), dec!(120)] {
            let kind = PromotionKind::Percentage {
                discount_percentage: pct,
            };
            let outcome = kind.apply(dec!(10), 4);

            assert!(!outcome.applied, "pct {} should not apply", pct);
            assert_eq!(outcome.discount_amount, dec!(0));
            assert_eq!(outcome.final_amount, outcome.original_amount);
        }
    }

    #[test]
    fn test_bogo_full_cycles_only() {
        // buy 2 get 1, quantity 6: two full cycles, 2 free units
        let kind = PromotionKind::BuyXGetYFree {
            buy_quantity: 2,
            get_quantity: 1,
        };
        let outcome = kind.apply(dec!(10), 6);

        assert!(outcome.applied);
        assert_eq!(outcome.original_amount, dec!(60));
        assert_eq!(outcome.discount_amount, dec!(20));
        assert_eq!(outcome.final_amount, dec!(40));
    }

    #[test]
    fn test_bogo_partial_cycle_below_buy_threshold() {
        // buy 2 get 1, quantity 7: cycles of 3, remainder 1 pays full
        let kind = PromotionKind::BuyXGetYFree {
            buy_quantity: 2,
            get_quantity: 1,
        };
        let outcome = kind.apply(dec!(10), 7);

        assert_eq!(outcome.discount_amount, dec!(20));
        assert_eq!(outcome.final_amount, dec!(50));
    }

    #[test]
    fn test_bogo_partial_cycle_past_buy_threshold() {
        // buy 2 get 3, quantity 8: one full cycle (3 free) plus remainder 3,
        // of which one unit is past the buy threshold
        let kind = PromotionKind::BuyXGetYFree {
            buy_quantity: 2,
            get_quantity: 3,
        };
        let outcome = kind.apply(dec!(4), 8);

        assert_eq!(free_units(8, 2, 3), 4);
        assert_eq!(outcome.discount_amount, dec!(16));
        assert_eq!(outcome.final_amount, dec!(16));
    }

    #[test]
    fn test_bogo_quantity_below_cycle() {
        // buy 3 get 1, quantity 2: nothing free yet
        let kind = PromotionKind::BuyXGetYFree {
            buy_quantity: 3,
            get_quantity: 1,
        };
        let outcome = kind.apply(dec!(5), 2);

        assert!(outcome.applied);
        assert_eq!(outcome.discount_amount, dec!(0));
        assert_eq!(outcome.final_amount, dec!(10));
    }

    #[test]
    fn test_bogo_invalid_parameters_fall_back_unapplied() {
        let kind = PromotionKind::BuyXGetYFree {
            buy_quantity: 0,
            get_quantity: 2,
        };
        let outcome = kind.apply(dec!(5), 4);

        assert!(!outcome.applied);
        assert_eq!(outcome.final_amount, dec!(20));
    }

    #[test]
    fn test_bogo_extreme_parameters_do_not_overflow() {
        // buy + get exceeds i32::MAX; a small cart against such a rule must
        // price cleanly with zero free units, not panic or wrap
        let kind = PromotionKind::BuyXGetYFree {
            buy_quantity: 1_500_000_000,
            get_quantity: 1_500_000_000,
        };
        let outcome = kind.apply(dec!(10), 10);

        assert!(outcome.applied);
        assert_eq!(free_units(10, 1_500_000_000, 1_500_000_000), 0);
        assert_eq!(outcome.discount_amount, dec!(0));
        assert_eq!(outcome.final_amount, dec!(100));
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
        assert_eq!(round_money(dec!(2.674)), dec!(2.67));
        assert_eq!(round_money(dec!(2.665)), dec!(2.67));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Percentage identity: final + discount always reconstructs the original
    /// amount, and the discount matches pct/100 of it exactly in Decimal
    /// arithmetic.
    #[test]
    fn prop_percentage_amounts_reconcile() {
        proptest!(|(
            price_cents in 1u32..=100_000u32,
            quantity in 1i32..=500,
            pct_hundredths in 1u32..=10_000u32
        )| {
            let unit_price = Decimal::from(price_cents) / Decimal::from(100);
            let pct = Decimal::from(pct_hundredths) / Decimal::from(100);
            let kind = PromotionKind::Percentage { discount_percentage: pct };

            let outcome = kind.apply(unit_price, quantity);

            prop_assert!(outcome.applied);
            prop_assert_eq!(
                outcome.final_amount + outcome.discount_amount,
                outcome.original_amount
            );
            prop_assert_eq!(
                outcome.discount_amount,
                outcome.original_amount * pct / Decimal::from(100)
            );
            prop_assert!(outcome.final_amount >= Decimal::ZERO);
        });
    }

    /// BOGO free-unit bounds: 0 <= free <= quantity, and free units follow
    /// the cycle formula exactly.
    #[test]
    fn prop_bogo_free_units_bounded() {
        proptest!(|(
            quantity in 1i32..=1000,
            buy in 1i32..=20,
            get in 1i32..=20
        )| {
            let free = super::free_units(quantity, buy, get);
            let cycle = buy + get;
            let expected = (quantity / cycle) * get
                + 0.max((quantity % cycle - buy).min(get));

            prop_assert!(free >= 0);
            prop_assert!(free <= quantity);
            prop_assert_eq!(free, expected);
        });
    }

    /// BOGO discount never exceeds the original amount
    #[test]
    fn prop_bogo_discount_bounded_by_original() {
        proptest!(|(
            price_cents in 1u32..=100_000u32,
            quantity in 1i32..=1000,
            buy in 1i32..=20,
            get in 1i32..=20
        )| {
            let unit_price = Decimal::from(price_cents) / Decimal::from(100);
            let kind = PromotionKind::BuyXGetYFree {
                buy_quantity: buy,
                get_quantity: get,
            };

            let outcome = kind.apply(unit_price, quantity);

            prop_assert!(outcome.discount_amount >= Decimal::ZERO);
            prop_assert!(outcome.discount_amount <= outcome.original_amount);
            prop_assert_eq!(
                outcome.final_amount,
                outcome.original_amount - outcome.discount_amount
            );
        });
    }
}
