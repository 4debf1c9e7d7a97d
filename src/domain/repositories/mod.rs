//! Repository traits for the domain layer
//!
//! `RepositoryProvider` is the persistence gateway handed to the services.

use super::spot::SpotRepository;
use super::ticket::TicketRepository;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Passed explicitly to every service; there is no global connection state.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let spot = repos.spots().find_available(VehicleClass::Car).await?;
///     let ticket = repos.tickets().find_open_by_registration("AB-123").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn spots(&self) -> &dyn SpotRepository;
    fn tickets(&self) -> &dyn TicketRepository;
}
