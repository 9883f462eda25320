//! Mode machine definition

use super::events::FaceEvent;

/// Face display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Normal compass: needle, bezel, readouts
    #[default]
    Compass,
    /// Compass with the secret text overlay (long press held)
    SecretShown,
    /// Chase animation running; gestures disarmed
    EasterEgg,
}

/// Which north the needle and bearing refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NorthReference {
    #[default]
    Magnetic,
    True,
}

impl NorthReference {
    pub fn toggled(self) -> Self {
        match self {
            NorthReference::Magnetic => NorthReference::True,
            NorthReference::True => NorthReference::Magnetic,
        }
    }

    /// Bearing suffix
    pub fn suffix(self) -> &'static str {
        match self {
            NorthReference::Magnetic => "°M",
            NorthReference::True => "°T",
        }
    }
}

impl Mode {
    /// Check if the needle, level and readouts are drawn
    pub fn shows_instruments(&self) -> bool {
        !matches!(self, Mode::EasterEgg)
    }

    /// Check if touches on the mode symbol are interpreted
    pub fn accepts_gestures(&self) -> bool {
        !matches!(self, Mode::EasterEgg)
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: FaceEvent) -> Self {
        use FaceEvent::*;
        use Mode::*;

        match (self, event) {
            // Compass transitions
            (Compass, LongPressStart) => SecretShown,
            (Compass, DoubleTap) => EasterEgg,

            // SecretShown transitions
            (SecretShown, LongPressEnd) => Compass,
            (SecretShown, DoubleTap) => EasterEgg,

            // EasterEgg transitions
            (EasterEgg, EasterEggFinished) => Compass,

            // Default: stay in current mode
            _ => self,
        }
    }
}
