use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{ErrorCode, ErrorResponse};
use thiserror::Error;

/// Result type for parking operations
pub type ParkingResult<T> = Result<T, ParkingError>;

/// Errors that can occur in the parking domain
#[derive(Debug, Error)]
pub enum ParkingError {
    /// Malformed duration, spend or qualifier values
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Lot not found
    #[error("Parking lot not found: {0}")]
    NotFound(String),

    /// The lot catalog could not be fetched
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Catalog data violates the tier invariants
    #[error("Calculation error: {0}")]
    Calculation(String),
}

impl ParkingError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            ParkingError::InvalidInput(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            ParkingError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            ParkingError::DataUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DataUnavailable)
            }
            ParkingError::Calculation(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ParkingError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            ParkingError::InvalidInput(_) | ParkingError::NotFound(_) => {
                tracing::info!(error_code = code.code(), "{}", self);
                self.to_string()
            }
            ParkingError::DataUnavailable(_) | ParkingError::Calculation(_) => {
                tracing::error!(error_code = code.code(), "{}", self);
                code.default_message().to_string()
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
