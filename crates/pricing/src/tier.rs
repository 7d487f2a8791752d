//! Quantity-tier selection over a five-element price ladder.

use serde::{Deserialize, Serialize};

/// Per-square-foot prices selected for a quantity.
///
/// All three fields are signed: on a normal (decreasing) ladder the volume
/// step is negative — the documented convention is that its magnitude is the
/// per-sqft saving, and a positive step means the ladder *increased* at this
/// tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub regular_per_sqft: f64,
    /// Professional price for the tier.
    ///
    /// For quantities of 100 and up this is extrapolated as
    /// `ladder[4] * (ladder[4] / ladder[3])` rather than looked up. On a
    /// decreasing ladder that lands *above* the regular price, inverting the
    /// professional discount's direction. Preserved exactly as the business
    /// has always computed it; unverified whether that inversion is intended.
    pub pro_per_sqft: f64,
    /// Selected regular price minus the previous tier's regular price
    /// (0 for the first tier).
    pub volume_step_per_sqft: f64,
}

impl Tier {
    /// Regular minus professional, per square foot.
    pub fn pro_discount_per_sqft(&self) -> f64 {
        self.regular_per_sqft - self.pro_per_sqft
    }
}

/// Select the price pair for a quantity.
///
/// Brackets are inclusive of their upper bound: 1-4, 5-19, 20-49, 50-99,
/// then 100 and up.
pub fn select_tier(ladder: &[f64; 5], quantity: u32) -> Tier {
    if quantity <= 4 {
        Tier {
            regular_per_sqft: ladder[0],
            pro_per_sqft: ladder[1],
            volume_step_per_sqft: 0.0,
        }
    } else if quantity <= 19 {
        Tier {
            regular_per_sqft: ladder[1],
            pro_per_sqft: ladder[2],
            volume_step_per_sqft: ladder[1] - ladder[0],
        }
    } else if quantity <= 49 {
        Tier {
            regular_per_sqft: ladder[2],
            pro_per_sqft: ladder[3],
            volume_step_per_sqft: ladder[2] - ladder[1],
        }
    } else if quantity <= 99 {
        Tier {
            regular_per_sqft: ladder[3],
            pro_per_sqft: ladder[4],
            volume_step_per_sqft: ladder[3] - ladder[2],
        }
    } else {
        Tier {
            regular_per_sqft: ladder[4],
            pro_per_sqft: ladder[4] * (ladder[4] / ladder[3]),
            volume_step_per_sqft: ladder[4] - ladder[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LADDER: [f64; 5] = [24.15, 22.05, 21.00, 19.95, 18.90];

    #[test]
    fn boundaries_are_inclusive_of_the_lower_tier() {
        assert_eq!(select_tier(&LADDER, 4).regular_per_sqft, 24.15);
        assert_eq!(select_tier(&LADDER, 5).regular_per_sqft, 22.05);
        assert_eq!(select_tier(&LADDER, 19).regular_per_sqft, 22.05);
        assert_eq!(select_tier(&LADDER, 20).regular_per_sqft, 21.00);
        assert_eq!(select_tier(&LADDER, 49).regular_per_sqft, 21.00);
        assert_eq!(select_tier(&LADDER, 50).regular_per_sqft, 19.95);
        assert_eq!(select_tier(&LADDER, 99).regular_per_sqft, 19.95);
        assert_eq!(select_tier(&LADDER, 100).regular_per_sqft, 18.90);
    }

    #[test]
    fn pro_price_is_next_rung_down() {
        let tier = select_tier(&LADDER, 10);
        assert_eq!(tier.regular_per_sqft, 22.05);
        assert_eq!(tier.pro_per_sqft, 21.00);
        assert!((tier.pro_discount_per_sqft() - 1.05).abs() < 1e-9);
    }

    #[test]
    fn first_tier_has_no_volume_step() {
        assert_eq!(select_tier(&LADDER, 1).volume_step_per_sqft, 0.0);
    }

    #[test]
    fn volume_step_is_signed_difference_from_previous_tier() {
        let tier = select_tier(&LADDER, 10);
        assert!((tier.volume_step_per_sqft - (22.05 - 24.15)).abs() < 1e-9);
    }

    #[test]
    fn top_tier_pro_price_is_extrapolated() {
        let tier = select_tier(&LADDER, 250);
        let expected = 18.90 * (18.90 / 19.95);
        assert!((tier.pro_per_sqft - expected).abs() < 1e-9);
        // On a decreasing ladder the extrapolation stays below regular only
        // when the last step shrinks; here it does.
        assert!(tier.pro_per_sqft < tier.regular_per_sqft);
    }
}
