//! Parking spot repository interface

use async_trait::async_trait;

use super::model::ParkingSpot;
use crate::domain::VehicleClass;
use crate::shared::errors::AppResult;

#[async_trait]
pub trait SpotRepository: Send + Sync {
    /// Lowest-numbered available spot of the given class.
    async fn find_available(&self, class: VehicleClass) -> AppResult<Option<ParkingSpot>>;
    /// Fails with a persistence error when the spot does not exist.
    async fn set_availability(&self, spot_id: i32, available: bool) -> AppResult<()>;
    async fn find_by_id(&self, spot_id: i32) -> AppResult<Option<ParkingSpot>>;
    async fn find_all(&self) -> AppResult<Vec<ParkingSpot>>;
    async fn insert(&self, spot: ParkingSpot) -> AppResult<()>;
    async fn count(&self) -> AppResult<u64>;
}
