//! In-memory lot catalog.
//!
//! Lots are loaded once, checked against the tier invariants, and then shared
//! read-only between requests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{ParkingError, ParkingResult};
use crate::models::ParkingLot;
use crate::repository::ParkingLotRepository;
use crate::tiers::validate_tiers;

/// Catalog bundled with the crate
pub const SEED_CATALOG: &str = include_str!("../data/parking-lots.json");

/// Read-only catalog held in memory
#[derive(Debug, Clone)]
pub struct InMemoryLotRepository {
    lots: Arc<[ParkingLot]>,
}

impl InMemoryLotRepository {
    /// Build a catalog, rejecting lots with malformed tiers or duplicate IDs
    pub fn new(lots: Vec<ParkingLot>) -> ParkingResult<Self> {
        let mut seen = HashSet::with_capacity(lots.len());
        for lot in &lots {
            if !seen.insert(lot.id.as_str()) {
                return Err(ParkingError::Calculation(format!(
                    "duplicate lot id '{}'",
                    lot.id
                )));
            }
            validate_tiers(&lot.id, &lot.tiers)?;
        }

        Ok(Self { lots: lots.into() })
    }

    /// Parse a catalog from a JSON array of lots
    pub fn from_json(json: &str) -> ParkingResult<Self> {
        let lots: Vec<ParkingLot> = serde_json::from_str(json)
            .map_err(|e| ParkingError::DataUnavailable(format!("invalid catalog JSON: {e}")))?;
        Self::new(lots)
    }

    /// The bundled catalog
    pub fn seed() -> ParkingResult<Self> {
        Self::from_json(SEED_CATALOG)
    }

    /// Load a catalog from a JSON file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn from_path(path: impl AsRef<Path>) -> ParkingResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            ParkingError::DataUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;

        let catalog = Self::from_json(&json)?;
        info!(lots = catalog.len(), "Loaded parking catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}

#[async_trait]
impl ParkingLotRepository for InMemoryLotRepository {
    async fn list_lots(&self) -> ParkingResult<Vec<ParkingLot>> {
        Ok(self.lots.to_vec())
    }

    async fn get_lot(&self, id: &str) -> ParkingResult<Option<ParkingLot>> {
        Ok(self.lots.iter().find(|lot| lot.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lot_with, tier};

    #[test]
    fn test_seed_catalog_loads() {
        let catalog = InMemoryLotRepository::seed().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let lot = lot_with(0, vec![tier("t", 1, None, 10.0)], vec![]);
        let result = InMemoryLotRepository::new(vec![lot.clone(), lot]);
        assert!(matches!(result, Err(ParkingError::Calculation(_))));
    }

    #[test]
    fn test_rejects_malformed_tiers() {
        let lot = lot_with(
            0,
            vec![tier("t1", 1, Some(60), 10.0), tier("t2", 90, None, 10.0)],
            vec![],
        );
        assert!(InMemoryLotRepository::new(vec![lot]).is_err());
    }

    #[test]
    fn test_invalid_json_is_data_unavailable() {
        let result = InMemoryLotRepository::from_json("{ not json");
        assert!(matches!(result, Err(ParkingError::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_data_unavailable() {
        let result = InMemoryLotRepository::from_path("/nonexistent/parking-lots.json").await;
        assert!(matches!(result, Err(ParkingError::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn test_list_and_get_preserve_catalog() {
        let lots = vec![
            lot_with(0, vec![tier("t", 1, None, 10.0)], vec![]).with_id("b"),
            lot_with(0, vec![tier("t", 1, None, 10.0)], vec![]).with_id("a"),
        ];
        let catalog = InMemoryLotRepository::new(lots).unwrap();

        let listed = catalog.list_lots().await.unwrap();
        assert_eq!(listed[0].id, "b");
        assert_eq!(listed[1].id, "a");

        assert_eq!(catalog.get_lot("a").await.unwrap().unwrap().id, "a");
        assert!(catalog.get_lot("zzz").await.unwrap().is_none());
    }
}
