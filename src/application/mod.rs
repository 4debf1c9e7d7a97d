pub mod ports;
pub mod services;

// Re-export key types for convenience
pub use ports::{Clock, InputSource, SystemClock};
pub use services::{EntryReceipt, ExitReceipt, ParkingService, SpotAllocator};
