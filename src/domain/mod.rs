//! Domain layer: parking entities, fare rules and repository ports

pub mod fare;
pub mod repositories;
pub mod spot;
pub mod ticket;
pub mod vehicle;

// Re-export commonly used types
pub use fare::{round_to_cents, FarePolicy};
pub use repositories::RepositoryProvider;
pub use spot::{ParkingSpot, SpotRepository};
pub use ticket::{NewTicket, Ticket, TicketRepository, TicketStatus};
pub use vehicle::VehicleClass;

// Re-export errors from shared for convenience
pub use crate::shared::errors::{AppError, AppResult, DomainError, DomainResult, InfraError};
