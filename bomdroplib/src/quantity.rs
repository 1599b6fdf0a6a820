//! Quantity calculation: how many of an item the reference total buys.
//!
//! [`quantity`] is the only place in the crate where the reference total is
//! divided by a unit cost. Page models, the feed, the CSV export, the sources
//! table and the preview cards all go through it, so a record's headline
//! number is identical everywhere it appears.

use serde::{Deserialize, Serialize};

use crate::error::BomdropError;
use crate::Result;

/// A validated unit cost: positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Cost(f64);

impl Cost {
    /// Validate a raw unit cost.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(BomdropError::InvalidCost { cost: value })
        }
    }

    /// The raw amount.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Cost {
    type Error = BomdropError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Cost> for f64 {
    fn from(cost: Cost) -> Self {
        cost.0
    }
}

/// A validated reference total: non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ReferenceTotal(f64);

impl ReferenceTotal {
    /// Validate a raw reference total.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(BomdropError::InvalidReferenceTotal { total: value })
        }
    }

    /// The raw amount.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ReferenceTotal {
    type Error = BomdropError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ReferenceTotal> for f64 {
    fn from(total: ReferenceTotal) -> Self {
        total.0
    }
}

/// Whole units of `cost` that fit in `total`.
///
/// An item dearer than the whole total yields 0. Callers go through a
/// [`Site`](crate::Site), which has already run [`checked_quantity`] on every
/// record, so the ratio here is always representable.
pub fn quantity(cost: Cost, total: ReferenceTotal) -> u64 {
    whole_units(cost, total) as u64
}

fn whole_units(cost: Cost, total: ReferenceTotal) -> f64 {
    (total.get() / cost.get()).floor()
}

/// Like [`quantity`], but rejects a cost so small that the ratio is not
/// finite or does not fit in a `u64`.
pub fn checked_quantity(cost: Cost, total: ReferenceTotal) -> Result<u64> {
    let ratio = whole_units(cost, total);
    // u64::MAX as f64 rounds up to 2^64, which is itself out of range.
    if !ratio.is_finite() || ratio >= u64::MAX as f64 {
        return Err(BomdropError::InvalidCost { cost: cost.get() });
    }
    Ok(ratio as u64)
}

/// Validate raw inputs and compute `floor(reference_total / unit_cost)`.
///
/// # Example
///
/// ```rust
/// use bomdroplib::calculate_quantity;
///
/// assert_eq!(calculate_quantity(350_000.0, 96_500_000.0).unwrap(), 275);
/// assert_eq!(calculate_quantity(200_000_000.0, 96_500_000.0).unwrap(), 0);
/// assert!(calculate_quantity(0.0, 96_500_000.0).is_err());
/// ```
pub fn calculate_quantity(unit_cost: f64, reference_total: f64) -> Result<u64> {
    let cost = Cost::new(unit_cost)?;
    let total = ReferenceTotal::new(reference_total)?;
    checked_quantity(cost, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL: f64 = 96_500_000.0;

    #[test]
    fn test_floor_division() {
        assert_eq!(calculate_quantity(350_000.0, TOTAL).unwrap(), 275);
        assert_eq!(calculate_quantity(4.5, TOTAL).unwrap(), 21_444_444);
        assert_eq!(calculate_quantity(25.0, TOTAL).unwrap(), 3_860_000);
    }

    #[test]
    fn test_cost_above_total_is_zero() {
        assert_eq!(calculate_quantity(TOTAL + 1.0, TOTAL).unwrap(), 0);
        assert_eq!(calculate_quantity(TOTAL, TOTAL).unwrap(), 1);
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(calculate_quantity(10.0, 0.0).unwrap(), 0);
    }

    #[test]
    fn test_rejects_bad_costs() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = calculate_quantity(bad, TOTAL).unwrap_err();
            assert!(matches!(err, BomdropError::InvalidCost { .. }), "{bad}");
        }
    }

    #[test]
    fn test_rejects_costs_that_overflow_quantity() {
        for tiny in [1e-12, 1e-320, f64::MIN_POSITIVE] {
            let err = calculate_quantity(tiny, TOTAL).unwrap_err();
            assert!(matches!(err, BomdropError::InvalidCost { .. }), "{tiny}");
        }
        // Large but representable ratios still come through exactly.
        assert_eq!(calculate_quantity(0.5, TOTAL).unwrap(), 193_000_000);
        assert_eq!(calculate_quantity(1e-12, 0.0).unwrap(), 0);
    }

    #[test]
    fn test_rejects_bad_totals() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = calculate_quantity(10.0, bad).unwrap_err();
            assert!(matches!(err, BomdropError::InvalidReferenceTotal { .. }));
        }
    }

    #[test]
    fn test_cost_deserialize_validates() {
        let ok: Cost = serde_json::from_str("12.5").unwrap();
        assert_eq!(ok.get(), 12.5);
        assert!(serde_json::from_str::<Cost>("0").is_err());
        assert!(serde_json::from_str::<Cost>("-3").is_err());
    }

    #[test]
    fn test_cost_serializes_as_number() {
        let cost = Cost::new(1200.0).unwrap();
        assert_eq!(serde_json::to_string(&cost).unwrap(), "1200.0");
    }
}
