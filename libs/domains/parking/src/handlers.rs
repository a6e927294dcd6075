//! HTTP handlers for parking domain

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ParkingResult;
use crate::models::{
    Coordinates, DiscountQualifier, DiscountType, LotListResponse, NearbyResponse,
    ParkingDiscount, ParkingLot, PricingBreakdown, PricingQuery, RankedResult, RateTier,
    RecommendationRequest, RecommendationResponse,
};
use crate::repository::ParkingLotRepository;
use crate::service::ParkingService;

/// OpenAPI tag for the parking endpoints
pub const TAG: &str = "parking";

/// OpenAPI documentation for Parking API
#[derive(OpenApi)]
#[openapi(
    paths(list_lots, get_lot, price_lot, recommend, nearby),
    components(
        schemas(
            ParkingLot,
            RateTier,
            ParkingDiscount,
            DiscountType,
            DiscountQualifier,
            Coordinates,
            PricingQuery,
            PricingBreakdown,
            RankedResult,
            RecommendationRequest,
            RecommendationResponse,
            NearbyResponse,
            LotListResponse,
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Parking lot pricing and recommendations")
    )
)]
pub struct ApiDoc;

/// Create the parking router with all HTTP endpoints
pub fn router<R: ParkingLotRepository + 'static>(service: ParkingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/lots", get(list_lots))
        .route("/lots/{id}", get(get_lot))
        .route("/lots/{id}/price", post(price_lot))
        .route("/recommend", post(recommend))
        .route("/nearby", post(nearby))
        .with_state(shared_service)
}

/// List every parking lot in the catalog
#[utoipa::path(
    get,
    path = "/lots",
    tag = TAG,
    responses(
        (status = 200, description = "Parking lot catalog", body = LotListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_lots<R: ParkingLotRepository>(
    State(service): State<Arc<ParkingService<R>>>,
) -> ParkingResult<Json<LotListResponse>> {
    let data = service.list_lots().await?;
    Ok(Json(LotListResponse { data }))
}

/// Get a parking lot by ID
#[utoipa::path(
    get,
    path = "/lots/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Parking lot ID")
    ),
    responses(
        (status = 200, description = "Parking lot found", body = ParkingLot),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_lot<R: ParkingLotRepository>(
    State(service): State<Arc<ParkingService<R>>>,
    Path(id): Path<String>,
) -> ParkingResult<Json<ParkingLot>> {
    let lot = service.get_lot(&id).await?;
    Ok(Json(lot))
}

/// Price a stay at one parking lot
#[utoipa::path(
    post,
    path = "/lots/{id}/price",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Parking lot ID")
    ),
    request_body = PricingQuery,
    responses(
        (status = 200, description = "Cost breakdown", body = PricingBreakdown),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn price_lot<R: ParkingLotRepository>(
    State(service): State<Arc<ParkingService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(query): ValidatedJson<PricingQuery>,
) -> ParkingResult<Json<PricingBreakdown>> {
    let breakdown = service.price_lot(&id, query).await?;
    Ok(Json(breakdown))
}

/// Recommend parking lots, cheapest first
#[utoipa::path(
    post,
    path = "/recommend",
    tag = TAG,
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "Lots ranked by total cost", body = RecommendationResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn recommend<R: ParkingLotRepository>(
    State(service): State<Arc<ParkingService<R>>>,
    ValidatedJson(request): ValidatedJson<RecommendationRequest>,
) -> ParkingResult<Json<RecommendationResponse>> {
    let response = service.recommend(request).await?;
    Ok(Json(response))
}

/// Lots near the request origin, closest first
#[utoipa::path(
    post,
    path = "/nearby",
    tag = TAG,
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "Priced lots within the search radius", body = NearbyResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn nearby<R: ParkingLotRepository>(
    State(service): State<Arc<ParkingService<R>>>,
    ValidatedJson(request): ValidatedJson<RecommendationRequest>,
) -> ParkingResult<Json<NearbyResponse>> {
    let response = service.nearby(request).await?;
    Ok(Json(response))
}
