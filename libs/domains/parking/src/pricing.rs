//! Per-lot pricing: discounts first, then tier accumulation over what is
//! left after the free allowance.

use crate::discounts::evaluate_discounts;
use crate::error::{ParkingError, ParkingResult};
use crate::models::{ParkingLot, PricingBreakdown, PricingQuery};
use crate::tiers::compute_tier_cost;

/// Rounds a currency amount to 2 decimal places, half away from zero
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn check_query(query: &PricingQuery) -> ParkingResult<()> {
    if query.duration_minutes == 0 {
        return Err(ParkingError::InvalidInput(
            "durationMinutes must be a positive integer".to_string(),
        ));
    }
    if !query.spend_amount.is_finite() || query.spend_amount < 0.0 {
        return Err(ParkingError::InvalidInput(
            "spendAmount must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// Prices a stay at one lot.
///
/// Deterministic and side-effect free; `lot` is only read.
pub fn calculate_pricing(lot: &ParkingLot, query: &PricingQuery) -> ParkingResult<PricingBreakdown> {
    check_query(query)?;

    let outcome = evaluate_discounts(lot, query.spend_amount, &query.qualifiers);
    let effective_free_minutes = lot.free_minutes.saturating_add(outcome.bonus_minutes);
    let effective_paid_minutes = query.duration_minutes.saturating_sub(effective_free_minutes);
    let tier_cost = compute_tier_cost(&lot.tiers, effective_paid_minutes);

    Ok(PricingBreakdown {
        lot_id: lot.id.clone(),
        lot_name: lot.name.clone(),
        base_minutes_charged: query.duration_minutes,
        effective_free_minutes,
        effective_paid_minutes,
        total_cost: round_currency(tier_cost.cost),
        discounts_applied: outcome.discounts_applied,
        hourly_rate_after_free: tier_cost.last_rate,
    })
}
