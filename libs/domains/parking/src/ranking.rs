//! Recommendation ranking.
//!
//! Two orderings are produced from the same per-lot breakdowns:
//! - [`rank_by_cost`]: cheapest first, used by the recommend endpoint
//! - [`rank_by_distance`]: closest first within [`MAX_DISTANCE_KM`] of an
//!   origin, used by the map view

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::ParkingResult;
use crate::models::{Coordinates, ParkingLot, PricingBreakdown, PricingQuery, RankedResult};
use crate::pricing::calculate_pricing;

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Lots further than this from the origin are dropped from the distance ranking
pub const MAX_DISTANCE_KM: f64 = 10.0;

/// Great-circle distance between two points in kilometres (haversine)
pub fn haversine_km(origin: Coordinates, target: Coordinates) -> f64 {
    let d_lat = (target.lat - origin.lat).to_radians();
    let d_lng = (target.lng - origin.lng).to_radians();
    let lat1 = origin.lat.to_radians();
    let lat2 = target.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Prices every lot and sorts ascending by total cost.
///
/// The sort is stable, so lots with equal cost keep catalog order.
pub fn rank_by_cost(lots: &[ParkingLot], query: &PricingQuery) -> ParkingResult<Vec<PricingBreakdown>> {
    let mut breakdowns = lots
        .iter()
        .map(|lot| calculate_pricing(lot, query))
        .collect::<ParkingResult<Vec<_>>>()?;

    breakdowns.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
    Ok(breakdowns)
}

/// Pairs breakdowns with their lots and orders them by distance from `origin`.
///
/// With an origin, entries further than [`MAX_DISTANCE_KM`] are removed and
/// the rest sorted closest first. Without one, nothing is filtered and the
/// input order is kept. Breakdowns whose lot is missing from `lots` are
/// skipped.
pub fn rank_by_distance(
    breakdowns: Vec<PricingBreakdown>,
    lots: &[ParkingLot],
    origin: Option<Coordinates>,
) -> Vec<RankedResult> {
    let by_id: HashMap<&str, &ParkingLot> = lots.iter().map(|lot| (lot.id.as_str(), lot)).collect();

    let mut ranked: Vec<RankedResult> = breakdowns
        .into_iter()
        .filter_map(|result| {
            let lot = *by_id.get(result.lot_id.as_str())?;
            let distance_km = origin.map(|origin| haversine_km(origin, lot.coordinates));
            Some(RankedResult {
                result,
                lot: lot.clone(),
                distance_km,
            })
        })
        .filter(|entry| within_range(entry.distance_km))
        .collect();

    ranked.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    ranked
}

/// Inclusive cutoff; entries without a distance are always kept
fn within_range(distance_km: Option<f64>) -> bool {
    distance_km.is_none_or(|km| km <= MAX_DISTANCE_KM)
}

/// Closest first; entries without a distance go last
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lot_at, lot_with, tier};
    use approx::assert_relative_eq;

    // One degree of latitude on a 6371 km sphere
    const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

    fn degrees_north(km: f64) -> f64 {
        km / KM_PER_DEGREE
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        let p = Coordinates::new(13.7466, 100.5393);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_meridian_distance() {
        let origin = Coordinates::new(0.0, 0.0);
        let target = Coordinates::new(1.0, 0.0);
        assert_relative_eq!(haversine_km(origin, target), KM_PER_DEGREE, epsilon = 1e-9);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let siam = Coordinates::new(13.7462, 100.5347);
        let asok = Coordinates::new(13.7367, 100.5604);
        assert_relative_eq!(haversine_km(siam, asok), haversine_km(asok, siam), epsilon = 1e-12);
        assert_relative_eq!(haversine_km(siam, asok), 2.97, epsilon = 0.05);
    }

    #[test]
    fn test_rank_by_cost_sorts_cheapest_first() {
        let lots = vec![
            lot_with(0, vec![tier("t", 1, None, 60.0)], vec![]).with_id("pricey"),
            lot_with(0, vec![tier("t", 1, None, 20.0)], vec![]).with_id("cheap"),
            lot_with(0, vec![tier("t", 1, None, 40.0)], vec![]).with_id("middle"),
        ];

        let ranked = rank_by_cost(&lots, &PricingQuery::new(120)).unwrap();
        let ids: Vec<_> = ranked.iter().map(|r| r.lot_id.as_str()).collect();
        assert_eq!(ids, ["cheap", "middle", "pricey"]);
        assert!(ranked.windows(2).all(|w| w[0].total_cost <= w[1].total_cost));
    }

    #[test]
    fn test_rank_by_cost_is_stable_for_ties() {
        let lots = vec![
            lot_with(120, vec![tier("t", 1, None, 60.0)], vec![]).with_id("free-a"),
            lot_with(0, vec![tier("t", 1, None, 10.0)], vec![]).with_id("paid"),
            lot_with(180, vec![tier("t", 1, None, 90.0)], vec![]).with_id("free-b"),
            lot_with(60, vec![tier("t", 1, None, 5.0)], vec![]).with_id("free-c"),
        ];

        let ranked = rank_by_cost(&lots, &PricingQuery::new(60)).unwrap();
        let ids: Vec<_> = ranked.iter().map(|r| r.lot_id.as_str()).collect();
        assert_eq!(ids, ["free-a", "free-b", "free-c", "paid"]);
    }

    #[test]
    fn test_rank_by_cost_empty_catalog() {
        assert!(rank_by_cost(&[], &PricingQuery::new(60)).unwrap().is_empty());
    }

    #[test]
    fn test_rank_by_cost_propagates_invalid_input() {
        let lots = vec![lot_with(0, vec![tier("t", 1, None, 10.0)], vec![])];
        assert!(rank_by_cost(&lots, &PricingQuery::new(0)).is_err());
    }

    #[test]
    fn test_distance_cutoff_excludes_lot_just_beyond_radius() {
        let origin = Coordinates::new(13.7, 100.5);
        let lots = vec![
            lot_at("far", origin.lat + degrees_north(10.1), origin.lng),
            lot_at("near", origin.lat + degrees_north(9.9), origin.lng),
        ];
        let breakdowns = rank_by_cost(&lots, &PricingQuery::new(60)).unwrap();

        let ranked = rank_by_distance(breakdowns, &lots, Some(origin));

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].lot.id, "near");
        assert_relative_eq!(ranked[0].distance_km.unwrap(), 9.9, epsilon = 1e-6);
    }

    #[test]
    fn test_distance_ranking_sorts_closest_first() {
        let origin = Coordinates::new(13.7, 100.5);
        let lots = vec![
            lot_at("five", origin.lat + degrees_north(5.0), origin.lng),
            lot_at("one", origin.lat + degrees_north(1.0), origin.lng),
            lot_at("three", origin.lat - degrees_north(3.0), origin.lng),
        ];
        let breakdowns = rank_by_cost(&lots, &PricingQuery::new(60)).unwrap();

        let ranked = rank_by_distance(breakdowns, &lots, Some(origin));
        let ids: Vec<_> = ranked.iter().map(|r| r.lot.id.as_str()).collect();
        assert_eq!(ids, ["one", "three", "five"]);
    }

    #[test]
    fn test_distance_ties_keep_cost_order() {
        let origin = Coordinates::new(13.7, 100.5);
        let mall = (origin.lat + degrees_north(2.0), origin.lng);
        let lots = vec![
            lot_with(0, vec![tier("t", 1, None, 60.0)], vec![])
                .with_id("pricey")
                .with_coordinates(mall.0, mall.1),
            lot_with(0, vec![tier("t", 1, None, 20.0)], vec![])
                .with_id("cheap")
                .with_coordinates(mall.0, mall.1),
            lot_with(0, vec![tier("t", 1, None, 90.0)], vec![])
                .with_id("closest")
                .with_coordinates(origin.lat + degrees_north(0.5), origin.lng),
        ];
        let breakdowns = rank_by_cost(&lots, &PricingQuery::new(60)).unwrap();
        let cost_order: Vec<_> = breakdowns.iter().map(|r| r.lot_id.as_str()).collect();
        assert_eq!(cost_order, ["cheap", "pricey", "closest"]);

        let ranked = rank_by_distance(breakdowns, &lots, Some(origin));
        let ids: Vec<_> = ranked.iter().map(|r| r.lot.id.as_str()).collect();
        assert_eq!(ids, ["closest", "cheap", "pricey"]);
        assert_eq!(ranked[1].distance_km, ranked[2].distance_km);
    }

    #[test]
    fn test_distance_cutoff_is_inclusive() {
        assert!(within_range(Some(MAX_DISTANCE_KM)));
        assert!(!within_range(Some(MAX_DISTANCE_KM + 1e-9)));
        assert!(within_range(None));
    }

    #[test]
    fn test_lot_on_cutoff_radius_is_kept() {
        let origin = Coordinates::new(0.0, 0.0);
        // Largest latitude whose computed distance does not exceed the cutoff
        let mut lat = degrees_north(MAX_DISTANCE_KM);
        while haversine_km(origin, Coordinates::new(lat, 0.0)) > MAX_DISTANCE_KM {
            lat = f64::from_bits(lat.to_bits() - 1);
        }
        let lots = vec![lot_at("edge", lat, 0.0)];
        let breakdowns = rank_by_cost(&lots, &PricingQuery::new(60)).unwrap();

        let ranked = rank_by_distance(breakdowns, &lots, Some(origin));

        assert_eq!(ranked.len(), 1);
        assert_relative_eq!(ranked[0].distance_km.unwrap(), MAX_DISTANCE_KM, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_ranking_without_origin_keeps_order() {
        let lots = vec![
            lot_at("a", 13.0, 100.0),
            lot_at("b", 50.0, 10.0),
            lot_at("c", -33.0, 151.0),
        ];
        let breakdowns = rank_by_cost(&lots, &PricingQuery::new(60)).unwrap();

        let ranked = rank_by_distance(breakdowns, &lots, None);
        let ids: Vec<_> = ranked.iter().map(|r| r.lot.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(ranked.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn test_distance_ranking_skips_unknown_lots() {
        let lots = vec![lot_at("known", 13.7, 100.5)];
        let mut breakdowns = rank_by_cost(&lots, &PricingQuery::new(60)).unwrap();
        let mut orphan = breakdowns[0].clone();
        orphan.lot_id = "gone".to_string();
        breakdowns.push(orphan);

        let ranked = rank_by_distance(breakdowns, &lots, None);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].lot.id, "known");
    }

    #[test]
    fn test_compare_distance_puts_missing_last() {
        assert_eq!(compare_distance(Some(1.0), None), Ordering::Less);
        assert_eq!(compare_distance(None, Some(1.0)), Ordering::Greater);
        assert_eq!(compare_distance(None, None), Ordering::Equal);
        assert_eq!(compare_distance(Some(2.0), Some(1.0)), Ordering::Greater);
    }
}
