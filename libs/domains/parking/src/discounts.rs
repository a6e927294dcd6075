//! Discount eligibility.
//!
//! Every discount on a lot is checked independently; there is no early exit
//! and no stacking limit. The discount type decides which rule applies, so a
//! `qualifier` on a purchase or membership discount is never matched.

use crate::models::{DiscountQualifier, DiscountType, ParkingDiscount, ParkingLot};

/// Bonus minutes granted by the eligible discounts of one lot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiscountOutcome {
    pub bonus_minutes: u32,
    /// Eligible discounts in the lot's original order
    pub discounts_applied: Vec<ParkingDiscount>,
}

impl ParkingDiscount {
    fn meets_spend(&self, spend_amount: f64) -> bool {
        self.threshold
            .is_some_and(|threshold| spend_amount >= threshold)
    }

    /// Whether this discount applies to the given spend and qualifiers
    pub fn is_eligible(&self, spend_amount: f64, qualifiers: &[DiscountQualifier]) -> bool {
        match self.kind {
            DiscountType::Purchase => self.meets_spend(spend_amount),
            DiscountType::Validation => self
                .qualifier
                .is_some_and(|qualifier| qualifiers.contains(&qualifier)),
            // Membership with a threshold behaves exactly like a purchase discount.
            DiscountType::Membership => {
                self.threshold.is_none() || self.meets_spend(spend_amount)
            }
        }
    }
}

/// Sums the bonus minutes of every discount on `lot` that applies
pub fn evaluate_discounts(
    lot: &ParkingLot,
    spend_amount: f64,
    qualifiers: &[DiscountQualifier],
) -> DiscountOutcome {
    lot.discounts
        .iter()
        .filter(|discount| discount.is_eligible(spend_amount, qualifiers))
        .fold(DiscountOutcome::default(), |mut outcome, discount| {
            outcome.bonus_minutes = outcome
                .bonus_minutes
                .saturating_add(discount.additional_free_minutes);
            outcome.discounts_applied.push(discount.clone());
            outcome
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{discount, lot_with};

    #[test]
    fn test_purchase_requires_threshold_met() {
        let d = discount("p", DiscountType::Purchase, Some(500.0), None, 60);
        assert!(d.is_eligible(500.0, &[]));
        assert!(d.is_eligible(800.0, &[]));
        assert!(!d.is_eligible(499.99, &[]));
    }

    #[test]
    fn test_purchase_without_threshold_never_applies() {
        let d = discount("p", DiscountType::Purchase, None, None, 60);
        assert!(!d.is_eligible(10_000.0, &[DiscountQualifier::Movie]));
    }

    #[test]
    fn test_validation_requires_matching_qualifier() {
        let d = discount(
            "v",
            DiscountType::Validation,
            None,
            Some(DiscountQualifier::Movie),
            120,
        );
        assert!(d.is_eligible(0.0, &[DiscountQualifier::Movie]));
        assert!(d.is_eligible(0.0, &[DiscountQualifier::Dining, DiscountQualifier::Movie]));
        assert!(!d.is_eligible(0.0, &[DiscountQualifier::Dining]));
        assert!(!d.is_eligible(0.0, &[]));
    }

    #[test]
    fn test_validation_ignores_spend_threshold() {
        let d = discount(
            "v",
            DiscountType::Validation,
            Some(100.0),
            Some(DiscountQualifier::Grocery),
            30,
        );
        assert!(d.is_eligible(0.0, &[DiscountQualifier::Grocery]));
        assert!(!d.is_eligible(1_000.0, &[]));
    }

    #[test]
    fn test_validation_without_qualifier_never_applies() {
        let d = discount("v", DiscountType::Validation, None, None, 30);
        assert!(!d.is_eligible(0.0, &[DiscountQualifier::Other]));
    }

    #[test]
    fn test_membership_without_threshold_is_unconditional() {
        let d = discount("m", DiscountType::Membership, None, None, 45);
        assert!(d.is_eligible(0.0, &[]));
    }

    #[test]
    fn test_membership_with_threshold_behaves_like_purchase() {
        let d = discount("m", DiscountType::Membership, Some(300.0), None, 45);
        assert!(!d.is_eligible(299.0, &[DiscountQualifier::Membership]));
        assert!(d.is_eligible(300.0, &[]));
    }

    #[test]
    fn test_qualifier_on_non_validation_type_is_not_matched() {
        let d = discount(
            "p",
            DiscountType::Purchase,
            Some(1_000.0),
            Some(DiscountQualifier::Movie),
            60,
        );
        assert!(!d.is_eligible(0.0, &[DiscountQualifier::Movie]));
    }

    #[test]
    fn test_evaluate_sums_all_eligible_in_lot_order() {
        let lot = lot_with(
            0,
            vec![],
            vec![
                discount("m", DiscountType::Membership, None, None, 15),
                discount("p", DiscountType::Purchase, Some(1_000.0), None, 60),
                discount(
                    "v",
                    DiscountType::Validation,
                    None,
                    Some(DiscountQualifier::Dining),
                    30,
                ),
                discount("p2", DiscountType::Purchase, Some(200.0), None, 60),
            ],
        );

        let outcome = evaluate_discounts(&lot, 250.0, &[DiscountQualifier::Dining]);

        assert_eq!(outcome.bonus_minutes, 105);
        let ids: Vec<_> = outcome.discounts_applied.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["m", "v", "p2"]);
    }

    #[test]
    fn test_evaluate_with_no_discounts() {
        let lot = lot_with(30, vec![], vec![]);
        assert_eq!(evaluate_discounts(&lot, 999.0, &[]), DiscountOutcome::default());
    }
}
