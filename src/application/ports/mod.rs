//! Application ports
//!
//! Boundaries the services depend on without knowing the concrete adapter:
//! operator input and the wall clock. Persistence ports live in `domain`.

pub mod clock;
pub mod input;

#[cfg(test)]
pub mod testing;

pub use clock::{Clock, SystemClock};
pub use input::InputSource;
