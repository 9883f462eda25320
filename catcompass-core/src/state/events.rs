//! Events that trigger mode transitions

use crate::gesture::Intent;

/// Events that can change the face mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceEvent {
    // Gesture events
    /// Confirmed single tap on the mode symbol
    Tap,
    /// Double tap on the mode symbol
    DoubleTap,
    /// Mode symbol held past the long-press time
    LongPressStart,
    /// Long press released, cancelled or dragged off
    LongPressEnd,

    // Animation events
    /// Chase animation completed (burst over, timeout or stopped)
    EasterEggFinished,
}

impl From<Intent> for FaceEvent {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Tap => FaceEvent::Tap,
            Intent::DoubleTap => FaceEvent::DoubleTap,
            Intent::LongPressStart => FaceEvent::LongPressStart,
            Intent::LongPressEnd => FaceEvent::LongPressEnd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_intent() {
        assert_eq!(FaceEvent::from(Intent::DoubleTap), FaceEvent::DoubleTap);
        assert_eq!(FaceEvent::from(Intent::LongPressStart), FaceEvent::LongPressStart);
    }
}
