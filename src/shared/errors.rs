use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::VehicleClass;

/// Expected business outcomes of a parking transaction.
///
/// Every variant ends the current transaction; the console reports it and
/// re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("No {class} spot is available, the parking lot is full")]
    LotFull { class: VehicleClass },

    #[error("Invalid vehicle type selection: {0:?}")]
    InvalidSelection(String),

    #[error("Invalid vehicle registration number: {0:?}")]
    InvalidRegistration(String),

    #[error("Out time provided is incorrect: {exit} is not after {entry}")]
    InvalidDuration {
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
    },

    #[error("Unknown vehicle class: {0}")]
    UnknownVehicleClass(String),

    #[error("No open ticket for vehicle {0}")]
    TicketNotFound(String),

    #[error("Vehicle {0} is already parked")]
    VehicleAlreadyParked(String),
}

/// Persistence failures. Unlike [`DomainError`] these are faults, not outcomes.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Write rejected: no {entity} with id {id}")]
    WriteRejected { entity: &'static str, id: i32 },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl AppError {
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Infra(_))
    }

    /// The business error, if this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Infra(_) => None,
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Infra(InfraError::Database(e))
    }
}

/// Result type for pure domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for operations that touch persistence
pub type AppResult<T> = Result<T, AppError>;
