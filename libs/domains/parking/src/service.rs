//! Parking Service - Business logic layer

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, instrument};
use validator::Validate;

use crate::error::{ParkingError, ParkingResult};
use crate::models::{
    NearbyResponse, ParkingLot, PricingBreakdown, PricingQuery, RecommendationRequest,
    RecommendationResponse,
};
use crate::pricing::calculate_pricing;
use crate::ranking::{rank_by_cost, rank_by_distance};
use crate::repository::ParkingLotRepository;

/// Service pricing and ranking lots from a catalog repository
pub struct ParkingService<R: ParkingLotRepository> {
    repository: Arc<R>,
}

impl<R: ParkingLotRepository> ParkingService<R> {
    /// Create a new ParkingService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every lot in the catalog
    #[instrument(skip(self))]
    pub async fn list_lots(&self) -> ParkingResult<Vec<ParkingLot>> {
        self.repository.list_lots().await
    }

    /// Get a lot by ID
    #[instrument(skip(self))]
    pub async fn get_lot(&self, id: &str) -> ParkingResult<ParkingLot> {
        self.repository
            .get_lot(id)
            .await?
            .ok_or_else(|| ParkingError::NotFound(id.to_string()))
    }

    /// Price a stay at a single lot
    #[instrument(skip(self, query), fields(duration = query.duration_minutes))]
    pub async fn price_lot(&self, id: &str, query: PricingQuery) -> ParkingResult<PricingBreakdown> {
        query
            .validate()
            .map_err(|e| ParkingError::InvalidInput(e.to_string()))?;

        let lot = self.get_lot(id).await?;
        calculate_pricing(&lot, &query)
    }

    /// Price every lot and return them cheapest first
    #[instrument(skip(self, request), fields(duration = request.duration_minutes))]
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> ParkingResult<RecommendationResponse> {
        request
            .validate()
            .map_err(|e| ParkingError::InvalidInput(e.to_string()))?;

        let lots = self.repository.list_lots().await?;
        let recommendations = rank_by_cost(&lots, &request.pricing_query())?;
        debug!(lots = lots.len(), "Ranked lots by cost");

        Ok(RecommendationResponse {
            requested_duration_minutes: request.duration_minutes,
            recommendations,
            generated_at: Utc::now(),
        })
    }

    /// Price every lot, then keep those near the request origin, closest first
    #[instrument(skip(self, request), fields(duration = request.duration_minutes))]
    pub async fn nearby(&self, request: RecommendationRequest) -> ParkingResult<NearbyResponse> {
        request
            .validate()
            .map_err(|e| ParkingError::InvalidInput(e.to_string()))?;

        let lots = self.repository.list_lots().await?;
        let by_cost = rank_by_cost(&lots, &request.pricing_query())?;
        let origin = request.origin();
        let results = rank_by_distance(by_cost, &lots, origin);
        debug!(
            lots = lots.len(),
            within_radius = results.len(),
            has_origin = origin.is_some(),
            "Ranked lots by distance"
        );

        Ok(NearbyResponse {
            origin,
            requested_duration_minutes: request.duration_minutes,
            results,
            generated_at: Utc::now(),
        })
    }
}

impl<R: ParkingLotRepository> Clone for ParkingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
