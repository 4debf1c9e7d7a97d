//! Ticket domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::ParkingSpot;

/// Ticket lifecycle status. A closed ticket is never reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// Vehicle is parked
    Open,
    /// Vehicle left and the fare was recorded
    Closed,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// A ticket that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub spot: ParkingSpot,
    pub registration: String,
    pub entry_time: DateTime<Utc>,
}

impl NewTicket {
    pub fn new(spot: ParkingSpot, registration: impl Into<String>, entry_time: DateTime<Utc>) -> Self {
        Self {
            spot,
            registration: registration.into(),
            entry_time,
        }
    }
}

/// Record of one parking session from entry to exit
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Unique ticket ID
    pub id: i32,
    /// Spot held by the vehicle
    pub spot: ParkingSpot,
    /// Vehicle registration number
    pub registration: String,
    /// Price charged, zero while open
    pub price: Decimal,
    pub entry_time: DateTime<Utc>,
    /// Set when the ticket is closed
    pub exit_time: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Ticket for a freshly stored [`NewTicket`].
    pub fn opened(id: i32, new: NewTicket) -> Self {
        Self {
            id,
            spot: new.spot,
            registration: new.registration,
            price: Decimal::ZERO,
            entry_time: new.entry_time,
            exit_time: None,
        }
    }

    pub fn status(&self) -> TicketStatus {
        if self.exit_time.is_some() {
            TicketStatus::Closed
        } else {
            TicketStatus::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == TicketStatus::Open
    }

    /// The same ticket, closed at `exit_time` with its final `price`.
    pub fn closed(self, price: Decimal, exit_time: DateTime<Utc>) -> Self {
        Self {
            price,
            exit_time: Some(exit_time),
            ..self
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
