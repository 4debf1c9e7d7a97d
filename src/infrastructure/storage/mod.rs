//! In-memory storage implementation of the repository ports

mod memory;

pub use memory::{InMemoryRepositoryProvider, InMemorySpotRepository, InMemoryTicketRepository};
