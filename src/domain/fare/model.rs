//! Fare policy

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::domain::VehicleClass;
use crate::shared::errors::{DomainError, DomainResult};

/// Round half-up to the nearest cent, always keeping two decimal places.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Pricing rules for a parking session.
///
/// Sessions up to the grace period are free. Longer sessions are billed per
/// whole elapsed minute at the hourly rate of the vehicle class.
#[derive(Debug, Clone, PartialEq)]
pub struct FarePolicy {
    /// Price of one hour per vehicle class
    hourly_rates: BTreeMap<VehicleClass, Decimal>,
    grace_period_minutes: i64,
    loyalty_discount_percent: Decimal,
}

impl FarePolicy {
    pub const GRACE_PERIOD_MINUTES: i64 = 30;
    pub const CAR_RATE_PER_HOUR: Decimal = dec!(1.5);
    pub const BIKE_RATE_PER_HOUR: Decimal = dec!(1.0);
    pub const LOYALTY_DISCOUNT_PERCENT: Decimal = dec!(5);

    pub fn new(
        hourly_rates: BTreeMap<VehicleClass, Decimal>,
        grace_period_minutes: i64,
        loyalty_discount_percent: Decimal,
    ) -> Self {
        Self {
            hourly_rates,
            grace_period_minutes,
            loyalty_discount_percent,
        }
    }

    /// 30 free minutes, 1.50/h for cars, 1.00/h for bikes, 5% loyalty discount.
    pub fn standard() -> Self {
        let hourly_rates = BTreeMap::from([
            (VehicleClass::Car, Self::CAR_RATE_PER_HOUR),
            (VehicleClass::Bike, Self::BIKE_RATE_PER_HOUR),
        ]);
        Self::new(
            hourly_rates,
            Self::GRACE_PERIOD_MINUTES,
            Self::LOYALTY_DISCOUNT_PERCENT,
        )
    }

    pub fn hourly_rate(&self, class: VehicleClass) -> DomainResult<Decimal> {
        self.hourly_rates
            .get(&class)
            .copied()
            .ok_or_else(|| DomainError::UnknownVehicleClass(class.to_string()))
    }

    pub fn grace_period_minutes(&self) -> i64 {
        self.grace_period_minutes
    }

    pub fn loyalty_discount_percent(&self) -> Decimal {
        self.loyalty_discount_percent
    }

    /// Price of a session from `entry` to `exit` for a vehicle of `class`.
    ///
    /// Fails with [`DomainError::InvalidDuration`] unless `exit` is strictly
    /// after `entry`, and with [`DomainError::UnknownVehicleClass`] when the
    /// class has no rate.
    pub fn compute_fare(
        &self,
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
        class: VehicleClass,
    ) -> DomainResult<Decimal> {
        if exit <= entry {
            return Err(DomainError::InvalidDuration { entry, exit });
        }
        let rate = self.hourly_rate(class)?;

        // Positive here, so truncation is a floor.
        let minutes = (exit - entry).num_minutes();
        if minutes <= self.grace_period_minutes {
            return Ok(round_to_cents(Decimal::ZERO));
        }

        Ok(round_to_cents(Decimal::from(minutes) * rate / dec!(60)))
    }

    /// Loyalty price for a returning vehicle. Free sessions stay free.
    pub fn apply_loyalty_discount(&self, price: Decimal) -> Decimal {
        if price <= Decimal::ZERO {
            return price;
        }
        round_to_cents(price * (dec!(100) - self.loyalty_discount_percent) / dec!(100))
    }
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

// ── Tests ──────────────────────────────────────────────────────
