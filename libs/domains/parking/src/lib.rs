//! Parking Domain
//!
//! Prices parking lots for a requested stay and ranks them for recommendation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, catalog fetch, response assembly
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │   Ranking   │ ──► │ Repository  │  ← Lot catalog (trait + in-memory impl)
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Pricing   │  ← Discounts + rate tiers, pure functions
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_parking::{handlers, InMemoryLotRepository, ParkingService};
//!
//! # fn example() -> Result<(), domain_parking::ParkingError> {
//! let repository = InMemoryLotRepository::seed()?;
//! let service = ParkingService::new(repository);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod discounts;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pricing;
pub mod ranking;
pub mod repository;
pub mod service;
pub mod tiers;

// Re-export commonly used types
pub use catalog::InMemoryLotRepository;
pub use discounts::{DiscountOutcome, evaluate_discounts};
pub use error::{ParkingError, ParkingResult};
pub use handlers::ApiDoc;
pub use models::{
    Coordinates, DiscountQualifier, DiscountType, LotListResponse, NearbyResponse,
    ParkingDiscount, ParkingLot, PricingBreakdown, PricingQuery, RankedResult, RateTier,
    RecommendationRequest, RecommendationResponse,
};
pub use pricing::calculate_pricing;
pub use ranking::{EARTH_RADIUS_KM, MAX_DISTANCE_KM, haversine_km, rank_by_cost, rank_by_distance};
pub use repository::ParkingLotRepository;
pub use service::ParkingService;
pub use tiers::{TierCost, compute_tier_cost, validate_tiers};
