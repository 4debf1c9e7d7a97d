//! Fare calculation
//!
//! Contains the fare policy (rate table, grace period, loyalty discount)
//! and cent rounding.

pub mod model;

pub use model::{round_to_cents, FarePolicy};
