//! Pricing Policy Model
//!
//! Discount and tax percentages are configured externally and persisted as
//! free-form fields. Bounds are enforced here, at the configuration
//! boundary, so the calculation pipeline never sees an out-of-range or
//! non-finite percentage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pricing configuration errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("percentage must be finite, got {0}")]
    NotFinite(f64),

    #[error("percentage must be between 0 and 100, got {0}")]
    OutOfRange(f64),
}

/// Externally configured discount and tax percentages.
///
/// Read-only input to the invoice calculation; not intrinsic to any order.
/// Construct through [`PricingPolicy::new`] or
/// [`PricingPolicy::from_config`]; both guarantee finite values in
/// [0, 100]. Deserialization goes through the same validation, so a
/// persisted configuration cannot smuggle an out-of-range rate past the
/// boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(try_from = "RawPricingPolicy")]
pub struct PricingPolicy {
    discount_percent: f64,
    tax_percent: f64,
}

/// Unvalidated wire form of [`PricingPolicy`]
#[derive(Debug, Deserialize)]
struct RawPricingPolicy {
    #[serde(default)]
    discount_percent: f64,
    #[serde(default)]
    tax_percent: f64,
}

impl TryFrom<RawPricingPolicy> for PricingPolicy {
    type Error = PricingError;

    fn try_from(raw: RawPricingPolicy) -> Result<Self, Self::Error> {
        Self::new(raw.discount_percent, raw.tax_percent)
    }
}

fn validate_percent(value: f64) -> Result<f64, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::NotFinite(value));
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(PricingError::OutOfRange(value));
    }
    Ok(value)
}

impl PricingPolicy {
    /// Create a validated policy.
    pub fn new(discount_percent: f64, tax_percent: f64) -> Result<Self, PricingError> {
        Ok(Self {
            discount_percent: validate_percent(discount_percent)?,
            tax_percent: validate_percent(tax_percent)?,
        })
    }

    /// Build a policy from the raw persisted configuration fields.
    ///
    /// Absent or non-numeric fields default to 0 (a missing discount means
    /// no discount); numeric values are still bounds-checked, so "150"
    /// is a configuration error rather than a 150% discount.
    pub fn from_config(
        discount_percent: Option<&str>,
        tax_percent: Option<&str>,
    ) -> Result<Self, PricingError> {
        let parse = |raw: Option<&str>| {
            raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0)
        };
        Self::new(parse(discount_percent), parse(tax_percent))
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    pub fn tax_percent(&self) -> f64 {
        self.tax_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        assert!(PricingPolicy::new(0.0, 0.0).is_ok());
        assert!(PricingPolicy::new(100.0, 100.0).is_ok());
        let policy = PricingPolicy::new(10.0, 5.0).unwrap();
        assert_eq!(policy.discount_percent(), 10.0);
        assert_eq!(policy.tax_percent(), 5.0);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            PricingPolicy::new(-1.0, 5.0),
            Err(PricingError::OutOfRange(-1.0))
        );
        assert_eq!(
            PricingPolicy::new(5.0, 100.1),
            Err(PricingError::OutOfRange(100.1))
        );
    }

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(matches!(
            PricingPolicy::new(f64::NAN, 0.0),
            Err(PricingError::NotFinite(_))
        ));
        assert!(matches!(
            PricingPolicy::new(0.0, f64::INFINITY),
            Err(PricingError::NotFinite(_))
        ));
    }

    #[test]
    fn test_from_config_defaults_non_numeric_to_zero() {
        let policy = PricingPolicy::from_config(None, Some("abc")).unwrap();
        assert_eq!(policy.discount_percent(), 0.0);
        assert_eq!(policy.tax_percent(), 0.0);
    }

    #[test]
    fn test_from_config_parses_and_trims() {
        let policy = PricingPolicy::from_config(Some(" 10 "), Some("5")).unwrap();
        assert_eq!(policy.discount_percent(), 10.0);
        assert_eq!(policy.tax_percent(), 5.0);
    }

    #[test]
    fn test_from_config_rejects_out_of_bounds_numeric() {
        assert!(PricingPolicy::from_config(Some("150"), None).is_err());
    }

    #[test]
    fn test_deserialize_validates_bounds() {
        let ok: PricingPolicy =
            serde_json::from_str(r#"{"discount_percent":10.0,"tax_percent":5.0}"#).unwrap();
        assert_eq!(ok.discount_percent(), 10.0);

        let bad = serde_json::from_str::<PricingPolicy>(
            r#"{"discount_percent":150.0,"tax_percent":5.0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let policy: PricingPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy.discount_percent(), 0.0);
        assert_eq!(policy.tax_percent(), 0.0);
    }
}
