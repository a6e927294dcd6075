use async_trait::async_trait;

use crate::error::ParkingResult;
use crate::models::ParkingLot;

/// Repository trait for the parking lot catalog
///
/// The pricing core only ever reads lots; implementations decide where they
/// come from (embedded seed data, a JSON file, a database).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParkingLotRepository: Send + Sync {
    /// List every lot in catalog order
    async fn list_lots(&self) -> ParkingResult<Vec<ParkingLot>>;

    /// Get a lot by its ID
    async fn get_lot(&self, id: &str) -> ParkingResult<Option<ParkingLot>>;
}
