//! Gesture disambiguation
//!
//! Turns raw pointer events on the mode symbol into discrete intents.
//! The disambiguator is explicit, finite, and driven by an injected clock.

pub mod disambiguator;
pub mod events;

pub use disambiguator::{GestureDisambiguator, GesturePhase};
pub use events::{HotRegion, Intent, PointerEvent, PointerPhase, TouchOutcome};
