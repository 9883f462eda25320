//! Frame rendering for the Catcompass face
//!
//! This crate provides:
//! - `render`, a pure function from a `FaceSnapshot` to a `Frame`
//! - `DrawCommand` and `Frame`, immutable per-frame draw descriptors
//! - `Canvas`, the trait a drawing backend implements, and `replay`
//! - An `embedded-graphics` canvas (feature `embedded-graphics`)
//!
//! # Architecture
//!
//! The face never draws. Each frame the host takes a snapshot, renders it
//! into a fresh `Frame`, replays the frame onto its canvas, and keeps the
//! frame's hot region for hit-testing the next touches.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod command;
#[cfg(feature = "embedded-graphics")]
pub mod eg;
pub mod readout;
pub mod scene;
pub mod style;

// Re-export key types
pub use backend::{replay, Canvas};
pub use command::{DrawCommand, Frame, Glyph, TextSize, MAX_COMMANDS};
pub use scene::render;
