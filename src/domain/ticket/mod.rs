//! Ticket aggregate
//!
//! Contains the Ticket entity, its lifecycle status, and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewTicket, Ticket, TicketStatus};
pub use repository::TicketRepository;
