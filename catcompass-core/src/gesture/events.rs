//! Pointer input and gesture intents

use crate::geometry::{Rect, Vec2};

/// Pointer event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer sample in face-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerEvent {
    pub position: Vec2,
    pub phase: PointerPhase,
    /// Time of the sample in milliseconds (same clock as `tick`)
    pub timestamp_ms: u64,
}

impl PointerEvent {
    pub const fn new(position: Vec2, phase: PointerPhase, timestamp_ms: u64) -> Self {
        Self {
            position,
            phase,
            timestamp_ms,
        }
    }

    pub const fn down(position: Vec2, timestamp_ms: u64) -> Self {
        Self::new(position, PointerPhase::Down, timestamp_ms)
    }

    pub const fn moved(position: Vec2, timestamp_ms: u64) -> Self {
        Self::new(position, PointerPhase::Move, timestamp_ms)
    }

    pub const fn up(position: Vec2, timestamp_ms: u64) -> Self {
        Self::new(position, PointerPhase::Up, timestamp_ms)
    }

    pub const fn cancel(timestamp_ms: u64) -> Self {
        Self::new(Vec2::ZERO, PointerPhase::Cancel, timestamp_ms)
    }
}

/// Discrete intents emitted by the disambiguator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Intent {
    /// Single tap, confirmed after the double-tap window closed
    Tap,
    /// Second tap inside the double-tap window
    DoubleTap,
    /// Press held past the long-press time
    LongPressStart,
    /// A long press ended (release, cancel or drag out)
    LongPressEnd,
}

/// Result of feeding one pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchOutcome {
    /// The event belonged to the hot region interaction
    pub consumed: bool,
    /// Intent resolved by this event, if any
    pub intent: Option<Intent>,
}

impl TouchOutcome {
    pub const IGNORED: TouchOutcome = TouchOutcome {
        consumed: false,
        intent: None,
    };

    pub const CONSUMED: TouchOutcome = TouchOutcome {
        consumed: true,
        intent: None,
    };

    pub const fn emit(intent: Intent) -> Self {
        Self {
            consumed: true,
            intent: Some(intent),
        }
    }
}

/// Hit-test predicate for the interactive region
pub trait HotRegion {
    fn contains(&self, point: Vec2) -> bool;
}

impl HotRegion for Rect {
    fn contains(&self, point: Vec2) -> bool {
        Rect::contains(self, point)
    }
}

impl<F> HotRegion for F
where
    F: Fn(Vec2) -> bool,
{
    fn contains(&self, point: Vec2) -> bool {
        self(point)
    }
}
