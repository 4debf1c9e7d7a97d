//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::spot::SpotRepository;
use crate::domain::ticket::TicketRepository;

use super::spot_repository::SeaOrmSpotRepository;
use super::ticket_repository::SeaOrmTicketRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let spot = repos.spots().find_available(VehicleClass::Car).await?;
/// let ticket = repos.tickets().find_open_by_registration("AB-123").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    spots: SeaOrmSpotRepository,
    tickets: SeaOrmTicketRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            spots: SeaOrmSpotRepository::new(db.clone()),
            tickets: SeaOrmTicketRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn spots(&self) -> &dyn SpotRepository {
        &self.spots
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }
}
