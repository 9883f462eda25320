//! Touch controller drivers

pub mod cst816s;

pub use cst816s::{ContactTracker, Cst816s, TouchEvent, TouchGesture, TouchReport};

/// Errors from a touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// I2C transfer failed
    Bus,
    /// Chip ID not recognised
    UnknownChip(u8),
}
