//! Parking lifecycle: vehicle entry and exit

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info};

use super::allocator::SpotAllocator;
use crate::application::ports::{Clock, InputSource, SystemClock};
use crate::domain::{
    AppResult, DomainError, FarePolicy, NewTicket, ParkingSpot, RepositoryProvider, Ticket,
    VehicleClass,
};
use crate::shared::validations::validate_registration;

/// Outcome of a vehicle entry
#[derive(Debug, Clone)]
pub struct EntryReceipt {
    /// The open ticket
    pub ticket: Ticket,
    /// The registration already completed a session
    pub returning_customer: bool,
}

/// Outcome of a vehicle exit
#[derive(Debug, Clone)]
pub struct ExitReceipt {
    /// The closed ticket, carrying the final price
    pub ticket: Ticket,
    /// Fare before the loyalty discount
    pub base_price: Decimal,
    pub discount_applied: bool,
    /// False when the ticket was closed but its spot could not be freed.
    /// The spot then stays unavailable until an operator releases it.
    pub spot_released: bool,
}

/// Orchestrates tickets and spots for entering and exiting vehicles.
///
/// One transaction runs to completion before the next starts. On exit the
/// closed ticket is persisted before its spot is released, so a spot never
/// becomes available while its ticket still reads as open.
pub struct ParkingService {
    repos: Arc<dyn RepositoryProvider>,
    allocator: SpotAllocator,
    input: Arc<dyn InputSource>,
    fare_policy: FarePolicy,
    clock: Arc<dyn Clock>,
}

impl ParkingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        input: Arc<dyn InputSource>,
        fare_policy: FarePolicy,
    ) -> Self {
        Self {
            allocator: SpotAllocator::new(repos.clone()),
            repos,
            input,
            fare_policy,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn fare_policy(&self) -> &FarePolicy {
        &self.fare_policy
    }

    /// Read the vehicle class from the operator and park the vehicle.
    pub async fn process_incoming_vehicle(&self) -> AppResult<EntryReceipt> {
        let class = self.input.read_vehicle_class()?;
        self.process_entry(class).await
    }

    /// Park a vehicle of `class`; the registration is read once a spot is held.
    ///
    /// Any failure after the spot was allocated releases it again.
    pub async fn process_entry(&self, class: VehicleClass) -> AppResult<EntryReceipt> {
        let mut spot = self.allocator.allocate(class).await?;

        match self.open_ticket(spot.clone()).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                error!(spot_id = spot.id, error = %e, "Unable to process incoming vehicle");
                if let Err(release_err) = self.allocator.release(&mut spot).await {
                    error!(
                        spot_id = spot.id,
                        error = %release_err,
                        "Failed to release parking spot after aborted entry"
                    );
                }
                Err(e)
            }
        }
    }

    async fn open_ticket(&self, spot: ParkingSpot) -> AppResult<EntryReceipt> {
        let registration = self.input.read_registration_number()?;
        let tickets = self.repos.tickets();

        if tickets
            .find_open_by_registration(&registration)
            .await?
            .is_some()
        {
            return Err(DomainError::VehicleAlreadyParked(registration).into());
        }

        // Only closed tickets count, so asking before saving gives the same answer.
        let returning_customer = tickets.has_prior_ticket(&registration).await?;

        let ticket = tickets
            .save(NewTicket::new(spot, registration, self.clock.now()))
            .await?;

        info!(
            ticket_id = ticket.id,
            spot_id = ticket.spot.id,
            class = %ticket.spot.class,
            registration = %ticket.registration,
            entry_time = %ticket.entry_time,
            returning_customer,
            "Vehicle entered"
        );

        Ok(EntryReceipt {
            ticket,
            returning_customer,
        })
    }

    /// Read the registration from the operator and let the vehicle out.
    pub async fn process_exiting_vehicle(&self) -> AppResult<ExitReceipt> {
        let registration = self.input.read_registration_number()?;
        self.process_exit(&registration).await
    }

    /// Close the open ticket of `registration`, bill it and free its spot.
    ///
    /// When the closed ticket cannot be persisted the spot stays held and the
    /// ticket stays open, so the exit can be retried.
    pub async fn process_exit(&self, registration: &str) -> AppResult<ExitReceipt> {
        let registration = validate_registration(registration)?;
        let tickets = self.repos.tickets();

        let ticket = tickets
            .find_open_by_registration(&registration)
            .await?
            .ok_or_else(|| DomainError::TicketNotFound(registration.clone()))?;

        let exit_time = self.clock.now();
        let base_price = self
            .fare_policy
            .compute_fare(ticket.entry_time, exit_time, ticket.spot.class)
            .inspect_err(|e| {
                error!(ticket_id = ticket.id, error = %e, "Unable to compute parking fare");
            })?;

        let discount_applied =
            base_price > Decimal::ZERO && tickets.has_prior_ticket(&registration).await?;
        let price = if discount_applied {
            self.fare_policy.apply_loyalty_discount(base_price)
        } else {
            base_price
        };

        let mut ticket = ticket.closed(price, exit_time);
        if let Err(e) = tickets.close(&ticket).await {
            error!(ticket_id = ticket.id, error = %e, "Unable to update ticket information");
            return Err(e);
        }

        // The ticket is closed from here on, so a failed release must not
        // surface as a failed exit.
        let spot_released = match self.allocator.release(&mut ticket.spot).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    ticket_id = ticket.id,
                    spot_id = ticket.spot.id,
                    error = %e,
                    "Ticket closed but parking spot could not be released"
                );
                false
            }
        };

        info!(
            ticket_id = ticket.id,
            spot_id = ticket.spot.id,
            registration = %ticket.registration,
            %base_price,
            %price,
            discount_applied,
            spot_released,
            "Vehicle exited"
        );

        Ok(ExitReceipt {
            ticket,
            base_price,
            discount_applied,
            spot_released,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
