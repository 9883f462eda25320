//! Configuration types
//!
//! Timing and physics parameters for the face. Defaults reproduce the
//! shipped behaviour; the firmware overrides them from `face.toml`.

pub mod types;

pub use types::*;
