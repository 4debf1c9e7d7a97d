//! # Parking Service
//!
//! Single-facility parking lot: spot allocation, ticketing and fare
//! calculation, driven from an operator console.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Spots, tickets, vehicle classes, the fare policy and the
//!   repository traits
//! - **application**: Entry/exit lifecycle, spot allocation, input and clock ports
//! - **infrastructure**: SeaORM (SQLite) and in-memory repositories
//! - **interfaces**: Interactive console
//! - **runtime**: Startup, seeding and shutdown shared by binaries

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod runtime;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use application::{ParkingService, SpotAllocator};
pub use runtime::{init_tracing, ParkingRuntime, RuntimeOptions};
