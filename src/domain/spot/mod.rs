//! Parking spot aggregate
//!
//! Contains the ParkingSpot entity and its repository interface.

pub mod model;
pub mod repository;

pub use model::ParkingSpot;
pub use repository::SpotRepository;
