//! Ticket repository interface

use async_trait::async_trait;

use super::model::{NewTicket, Ticket};
use crate::shared::errors::AppResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn save(&self, ticket: NewTicket) -> AppResult<Ticket>;
    /// The open ticket of a registration, most recent first.
    async fn find_open_by_registration(&self, registration: &str) -> AppResult<Option<Ticket>>;
    /// Record price and exit time. Writing the same values twice is harmless;
    /// an unknown ticket id is a persistence failure.
    async fn close(&self, ticket: &Ticket) -> AppResult<()>;
    /// Whether the registration has at least one closed ticket.
    async fn has_prior_ticket(&self, registration: &str) -> AppResult<bool>;
    async fn find_by_registration(&self, registration: &str) -> AppResult<Vec<Ticket>>;
}
