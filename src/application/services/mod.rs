//! Application services

mod allocator;
mod parking;

pub use allocator::SpotAllocator;
pub use parking::{EntryReceipt, ExitReceipt, ParkingService};
