//! Invoice arithmetic using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization. The discount/tax pipeline rounds every
//! intermediate value to 2 decimal places at the point of computation, and
//! each step consumes the rounded result of the previous one. The cascade
//! is part of the contract, since a reprinted invoice must reproduce the
//! original amounts bit for bit.

use rust_decimal::prelude::*;
use shared::models::{PricingBreakdown, PricingPolicy};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round to 2 decimal places, midpoint away from zero
#[inline]
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive the full pricing breakdown from a subtotal.
///
/// Fixed pipeline, evaluated in this exact order (tax is charged on the
/// discounted amount, not on the raw subtotal):
///
/// 1. `discount     = subtotal × discount% / 100`
/// 2. `after_discount = subtotal − discount`
/// 3. `tax          = after_discount × tax% / 100`
/// 4. `grand_total  = after_discount + tax`
///
/// Negative subtotals are clamped to zero; a non-finite subtotal converts
/// to zero rather than poisoning the arithmetic. Percentages are already
/// bounds-checked by [`PricingPolicy`], so the result is deterministic and
/// total for any input.
pub fn compute_breakdown(subtotal: f64, policy: &PricingPolicy) -> PricingBreakdown {
    let subtotal = round_money(to_decimal(subtotal).max(Decimal::ZERO));

    let discount =
        round_money(subtotal * to_decimal(policy.discount_percent()) / Decimal::ONE_HUNDRED);
    let after_discount = round_money(subtotal - discount);
    let tax = round_money(after_discount * to_decimal(policy.tax_percent()) / Decimal::ONE_HUNDRED);
    let grand_total = round_money(after_discount + tax);

    PricingBreakdown {
        subtotal: to_f64(subtotal),
        discount_percent: policy.discount_percent(),
        discount: to_f64(discount),
        after_discount: to_f64(after_discount),
        tax_percent: policy.tax_percent(),
        tax: to_f64(tax),
        grand_total: to_f64(grand_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(discount: f64, tax: f64) -> PricingPolicy {
        PricingPolicy::new(discount, tax).unwrap()
    }

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let a = 0.1_f64;
        let b = 0.2_f64;
        assert_ne!(a + b, 0.3);

        let sum_dec = to_decimal(a) + to_decimal(b);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_breakdown_thousand_ten_five() {
        let b = compute_breakdown(1000.0, &policy(10.0, 5.0));
        assert_eq!(b.discount, 100.0);
        assert_eq!(b.after_discount, 900.0);
        assert_eq!(b.tax, 45.0);
        assert_eq!(b.grand_total, 945.0);
    }

    #[test]
    fn test_breakdown_no_discount_five_tax() {
        let b = compute_breakdown(660.0, &policy(0.0, 5.0));
        assert_eq!(b.discount, 0.0);
        assert_eq!(b.after_discount, 660.0);
        assert_eq!(b.tax, 33.0);
        assert_eq!(b.grand_total, 693.0);
    }

    #[test]
    fn test_breakdown_identity_at_zero_rates() {
        for subtotal in [0.0, 0.01, 12.34, 660.0, 99999.99] {
            let b = compute_breakdown(subtotal, &policy(0.0, 0.0));
            assert_eq!(b.grand_total, subtotal);
            assert_eq!(b.discount, 0.0);
            assert_eq!(b.tax, 0.0);
        }
    }

    #[test]
    fn test_breakdown_monotonic() {
        for (s, d, t) in [
            (1000.0, 10.0, 5.0),
            (0.01, 99.0, 99.0),
            (660.0, 0.0, 5.0),
            (123.45, 33.33, 18.0),
        ] {
            let b = compute_breakdown(s, &policy(d, t));
            assert!(b.grand_total >= b.after_discount);
            assert!(b.after_discount >= 0.0);
        }
    }

    #[test]
    fn test_rounding_cascade_uses_rounded_intermediates() {
        // discount = 10.01 × 5% = 0.5005 → rounds to 0.50 (not 0.5005)
        // after    = 10.01 − 0.50 = 9.51
        // tax      = 9.51 × 18% = 1.7118 → 1.71
        // grand    = 9.51 + 1.71 = 11.22
        let b = compute_breakdown(10.01, &policy(5.0, 18.0));
        assert_eq!(b.discount, 0.50);
        assert_eq!(b.after_discount, 9.51);
        assert_eq!(b.tax, 1.71);
        assert_eq!(b.grand_total, 11.22);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 100.0 × 0.125% discount = 0.125 → 0.13
        let b = compute_breakdown(100.0, &policy(0.125, 0.0));
        assert_eq!(b.discount, 0.13);
        assert_eq!(b.after_discount, 99.87);
    }

    #[test]
    fn test_negative_subtotal_clamped() {
        let b = compute_breakdown(-50.0, &policy(10.0, 5.0));
        assert_eq!(b.subtotal, 0.0);
        assert_eq!(b.grand_total, 0.0);
    }

    #[test]
    fn test_non_finite_subtotal_never_produces_nan() {
        for s in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let b = compute_breakdown(s, &policy(10.0, 5.0));
            assert!(b.grand_total.is_finite());
            assert_eq!(b.grand_total, 0.0);
        }
    }

    #[test]
    fn test_full_discount() {
        let b = compute_breakdown(250.0, &policy(100.0, 21.0));
        assert_eq!(b.discount, 250.0);
        assert_eq!(b.after_discount, 0.0);
        assert_eq!(b.tax, 0.0);
        assert_eq!(b.grand_total, 0.0);
    }
}
