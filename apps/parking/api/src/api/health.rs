//! Readiness handler backed by the lot catalog.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_parking::ParkingLotRepository;

pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "catalog",
        Box::pin(async {
            match state.catalog.list_lots().await {
                Ok(lots) if lots.is_empty() => Err("Catalog is empty".to_string()),
                Ok(_) => Ok(()),
                Err(e) => Err(format!("Catalog unavailable: {}", e)),
            }
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
