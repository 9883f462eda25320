//! Inertial sensor drivers

pub mod qmi8658;

pub use qmi8658::{tilt_from_accel, Accel, Qmi8658};

/// Errors from an inertial sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError {
    /// I2C transfer failed
    Bus,
    /// WHO_AM_I did not match
    WrongChip(u8),
}
