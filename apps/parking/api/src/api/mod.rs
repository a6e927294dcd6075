use axum::Router;
use axum::routing::get;
use domain_parking::{ParkingService, handlers};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    let service = ParkingService::new(state.catalog.clone());

    Router::new().nest("/parking", handlers::router(service))
}

/// Creates a router with the /ready endpoint, which checks that the lot
/// catalog is loaded and non-empty.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
