//! Board-agnostic core logic for the Catcompass watch face
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or a rendering backend:
//!
//! - Gesture disambiguation (tap, double tap, long press)
//! - The "cat level" chase animation and its particle burst
//! - Face display modes and the controller tying them together
//! - Compass math (heading smoothing, true north, bubble level)
//! - Timer values driven by an injected clock
//! - Configuration type definitions
//! - Feedback collaborator traits (haptics, chime)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod chase;
pub mod compass;
pub mod config;
pub mod face;
pub mod geometry;
pub mod gesture;
pub mod state;
pub mod timer;
pub mod traits;

pub use face::{CompassFace, FaceLayout, FaceSnapshot};
pub use geometry::{Color, Rect, Tilt, Vec2};
