//! Hardware driver implementations
//!
//! This crate provides drivers for the peripherals of the round-display
//! watch board:
//!
//! - Touch controller (CST816S, I2C)
//! - Accelerometer tilt (QMI8658, I2C)
//! - Round LCD (GC9A01, SPI) and its RGB565 frame buffer
//!
//! The two I2C devices share one bus, so their drivers borrow the bus per
//! call instead of owning it.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod imu;
pub mod touch;
