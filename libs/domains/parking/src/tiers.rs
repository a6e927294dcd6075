//! Tiered hourly rate accumulation.

use crate::error::{ParkingError, ParkingResult};
use crate::models::RateTier;

/// Cost of a run of paid minutes across a lot's tiers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TierCost {
    /// Unrounded cost
    pub cost: f64,
    /// Rate of the last tier that absorbed any minutes
    pub last_rate: f64,
}

/// Walks `tiers` in order, billing each band's share of `paid_minutes`
/// prorated per minute at its hourly rate.
///
/// Tiers are trusted to be sorted and contiguous; that is checked once when
/// the catalog is loaded (see [`validate_tiers`]), not here. Minutes left
/// over after a bounded last tier are not billed.
pub fn compute_tier_cost(tiers: &[RateTier], paid_minutes: u32) -> TierCost {
    if paid_minutes == 0 {
        return TierCost::default();
    }

    let mut remaining = paid_minutes;
    let mut total = TierCost::default();

    for tier in tiers {
        if remaining == 0 {
            break;
        }

        let consumed = match tier.capacity() {
            Some(capacity) => remaining.min(capacity),
            None => remaining,
        };

        total.cost += (f64::from(consumed) / 60.0) * tier.rate_per_hour;
        total.last_rate = tier.rate_per_hour;
        remaining -= consumed;
    }

    total.cost = total.cost.max(0.0);
    total
}

/// Checks the tier invariants of one lot: non-empty, ascending, contiguous,
/// well-formed bounds, only the last tier unbounded, finite non-negative rates.
pub fn validate_tiers(lot_id: &str, tiers: &[RateTier]) -> ParkingResult<()> {
    let invalid = |tier: &RateTier, reason: &str| {
        ParkingError::Calculation(format!("lot '{lot_id}' tier '{}': {reason}", tier.id))
    };

    if tiers.is_empty() {
        return Err(ParkingError::Calculation(format!(
            "lot '{lot_id}' has no rate tiers"
        )));
    }

    for (index, tier) in tiers.iter().enumerate() {
        if !tier.rate_per_hour.is_finite() || tier.rate_per_hour < 0.0 {
            return Err(invalid(tier, "rate must be a finite non-negative number"));
        }

        if tier.to_minute.is_some_and(|to| to < tier.from_minute) {
            return Err(invalid(tier, "toMinute is before fromMinute"));
        }

        let Some(next) = tiers.get(index + 1) else {
            continue;
        };

        let Some(to) = tier.to_minute else {
            return Err(invalid(tier, "only the last tier may be unbounded"));
        };

        if next.from_minute != to.saturating_add(1) {
            return Err(invalid(
                next,
                &format!("expected fromMinute {} to follow the previous tier", to + 1),
            ));
        }
    }

    Ok(())
}
