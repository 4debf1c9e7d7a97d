//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod repository_provider;
pub mod spot_repository;
pub mod ticket_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
pub use spot_repository::SeaOrmSpotRepository;
pub use ticket_repository::SeaOrmTicketRepository;
