//! Spot allocation

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{AppResult, DomainError, ParkingSpot, RepositoryProvider, VehicleClass};

/// Hands out and takes back parking spots.
///
/// Allocation is a read followed by a write, which is only safe with a single
/// operator terminal.
pub struct SpotAllocator {
    repos: Arc<dyn RepositoryProvider>,
}

impl SpotAllocator {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Reserve the lowest-numbered available spot of `class`.
    ///
    /// The returned spot is already persisted as unavailable; the caller owns
    /// it until a ticket references it or it is released.
    pub async fn allocate(&self, class: VehicleClass) -> AppResult<ParkingSpot> {
        let Some(mut spot) = self.repos.spots().find_available(class).await? else {
            warn!(%class, "No available parking spot, parking lot might be full");
            return Err(DomainError::LotFull { class }.into());
        };

        self.repos.spots().set_availability(spot.id, false).await?;
        spot.available = false;

        debug!(spot_id = spot.id, %class, "Parking spot allocated");
        Ok(spot)
    }

    /// Make `spot` available again.
    pub async fn release(&self, spot: &mut ParkingSpot) -> AppResult<()> {
        self.repos.spots().set_availability(spot.id, true).await?;
        spot.available = true;

        debug!(spot_id = spot.id, class = %spot.class, "Parking spot released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn allocator(spots: Vec<ParkingSpot>) -> (SpotAllocator, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::with_spots(spots));
        (SpotAllocator::new(repos.clone()), repos)
    }

    #[tokio::test]
    async fn allocates_lowest_available_spot_of_class() {
        let (allocator, repos) = allocator(ParkingSpot::layout(3, 2));

        let spot = allocator.allocate(VehicleClass::Bike).await.unwrap();
        assert_eq!(spot.id, 4);
        assert!(!spot.available);

        let stored = repos.spots().find_by_id(4).await.unwrap().unwrap();
        assert!(!stored.available);
    }

    #[tokio::test]
    async fn successive_allocations_never_repeat_a_spot() {
        let (allocator, _) = allocator(ParkingSpot::layout(3, 0));

        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(allocator.allocate(VehicleClass::Car).await.unwrap().id);
        }
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn full_lot_is_reported() {
        let (allocator, _) = allocator(ParkingSpot::layout(1, 0));
        allocator.allocate(VehicleClass::Car).await.unwrap();

        let err = allocator.allocate(VehicleClass::Car).await.unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::LotFull {
                class: VehicleClass::Car
            })
        );

        let err = allocator.allocate(VehicleClass::Bike).await.unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::LotFull {
                class: VehicleClass::Bike
            })
        );
    }

    #[tokio::test]
    async fn released_spot_is_allocated_again() {
        let (allocator, _) = allocator(ParkingSpot::layout(2, 0));

        let mut first = allocator.allocate(VehicleClass::Car).await.unwrap();
        allocator.release(&mut first).await.unwrap();
        assert!(first.available);

        let again = allocator.allocate(VehicleClass::Car).await.unwrap();
        assert_eq!(again.id, first.id);
    }

    #[tokio::test]
    async fn releasing_unknown_spot_is_a_persistence_failure() {
        let (allocator, _) = allocator(Vec::new());
        let mut ghost = ParkingSpot::new(99, VehicleClass::Car);
        let err = allocator.release(&mut ghost).await.unwrap_err();
        assert!(err.is_persistence_failure());
    }
}
