//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    AppResult, InfraError, NewTicket, ParkingSpot, RepositoryProvider, SpotRepository, Ticket,
    TicketRepository, VehicleClass,
};

/// Spots keyed by id
#[derive(Default)]
pub struct InMemorySpotRepository {
    spots: DashMap<i32, ParkingSpot>,
}

#[async_trait]
impl SpotRepository for InMemorySpotRepository {
    async fn find_available(&self, class: VehicleClass) -> AppResult<Option<ParkingSpot>> {
        Ok(self
            .spots
            .iter()
            .filter(|s| s.class == class && s.available)
            .min_by_key(|s| s.id)
            .map(|s| s.value().clone()))
    }

    async fn set_availability(&self, spot_id: i32, available: bool) -> AppResult<()> {
        let mut spot = self.spots.get_mut(&spot_id).ok_or(InfraError::WriteRejected {
            entity: "ParkingSpot",
            id: spot_id,
        })?;
        spot.available = available;
        Ok(())
    }

    async fn find_by_id(&self, spot_id: i32) -> AppResult<Option<ParkingSpot>> {
        Ok(self.spots.get(&spot_id).map(|s| s.value().clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<ParkingSpot>> {
        let mut spots: Vec<ParkingSpot> = self.spots.iter().map(|s| s.value().clone()).collect();
        spots.sort_by_key(|s| s.id);
        Ok(spots)
    }

    async fn insert(&self, spot: ParkingSpot) -> AppResult<()> {
        self.spots.insert(spot.id, spot);
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.spots.len() as u64)
    }
}

/// Tickets keyed by id
pub struct InMemoryTicketRepository {
    tickets: DashMap<i32, Ticket>,
    ticket_counter: AtomicI32,
}

impl Default for InMemoryTicketRepository {
    fn default() -> Self {
        Self {
            tickets: DashMap::new(),
            ticket_counter: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn save(&self, ticket: NewTicket) -> AppResult<Ticket> {
        let id = self.ticket_counter.fetch_add(1, Ordering::SeqCst);
        let ticket = Ticket::opened(id, ticket);
        self.tickets.insert(id, ticket.clone());
        Ok(ticket)
    }

    async fn find_open_by_registration(&self, registration: &str) -> AppResult<Option<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.registration == registration && t.is_open())
            .max_by_key(|t| (t.entry_time, t.id))
            .map(|t| t.value().clone()))
    }

    async fn close(&self, ticket: &Ticket) -> AppResult<()> {
        let mut stored = self.tickets.get_mut(&ticket.id).ok_or(InfraError::WriteRejected {
            entity: "Ticket",
            id: ticket.id,
        })?;
        stored.price = ticket.price;
        stored.exit_time = ticket.exit_time;
        Ok(())
    }

    async fn has_prior_ticket(&self, registration: &str) -> AppResult<bool> {
        Ok(self
            .tickets
            .iter()
            .any(|t| t.registration == registration && !t.is_open()))
    }

    async fn find_by_registration(&self, registration: &str) -> AppResult<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|t| t.registration == registration)
            .map(|t| t.value().clone())
            .collect();
        tickets.sort_by_key(|t| (t.entry_time, t.id));
        Ok(tickets)
    }
}

/// In-memory repositories for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    spots: InMemorySpotRepository,
    tickets: InMemoryTicketRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spots(spots: impl IntoIterator<Item = ParkingSpot>) -> Self {
        let provider = Self::default();
        for spot in spots {
            provider.spots.spots.insert(spot.id, spot);
        }
        provider
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn spots(&self) -> &dyn SpotRepository {
        &self.spots
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn find_available_picks_lowest_id() {
        let repos = InMemoryRepositoryProvider::with_spots(ParkingSpot::layout(3, 2));
        repos.spots().set_availability(1, false).await.unwrap();

        let spot = repos.spots().find_available(VehicleClass::Car).await.unwrap();
        assert_eq!(spot.map(|s| s.id), Some(2));

        let spot = repos.spots().find_available(VehicleClass::Bike).await.unwrap();
        assert_eq!(spot.map(|s| s.id), Some(4));
    }

    #[tokio::test]
    async fn set_availability_on_missing_spot_fails() {
        let repos = InMemoryRepositoryProvider::new();
        let err = repos.spots().set_availability(3, true).await.unwrap_err();
        assert!(err.is_persistence_failure());
    }

    #[tokio::test]
    async fn tickets_get_increasing_ids() {
        let repos = InMemoryRepositoryProvider::new();
        let entry = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let spot = ParkingSpot::new(1, VehicleClass::Car);

        let a = repos
            .tickets()
            .save(NewTicket::new(spot.clone(), "AAA", entry))
            .await
            .unwrap();
        let b = repos
            .tickets()
            .save(NewTicket::new(spot, "BBB", entry))
            .await
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn close_is_idempotent_and_hides_ticket_from_open_lookup() {
        let repos = InMemoryRepositoryProvider::new();
        let entry = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let ticket = repos
            .tickets()
            .save(NewTicket::new(ParkingSpot::new(1, VehicleClass::Car), "AAA", entry))
            .await
            .unwrap();

        let closed = ticket.closed(dec!(1.50), entry + Duration::hours(1));
        repos.tickets().close(&closed).await.unwrap();
        repos.tickets().close(&closed).await.unwrap();

        assert!(repos
            .tickets()
            .find_open_by_registration("AAA")
            .await
            .unwrap()
            .is_none());
        let history = repos.tickets().find_by_registration("AAA").await.unwrap();
        assert_eq!(history, vec![closed]);
    }
}
