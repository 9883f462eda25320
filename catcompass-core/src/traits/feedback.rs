//! Haptic and audio feedback traits

/// Errors a feedback output can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackError {
    /// Output hardware missing or not initialised
    Unavailable,
    /// Output already playing something
    Busy,
    /// Bus or driver failure
    Io,
}

/// Vibration patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HapticPattern {
    /// Short click, as for a key press
    VirtualKey,
    /// Longer buzz acknowledging a long press
    LongPress,
}

/// Trait for vibration outputs
///
/// Failures are reported but never retried; the face state is already
/// updated when `perform` is called.
pub trait Haptics {
    fn perform(&mut self, pattern: HapticPattern) -> Result<(), FeedbackError>;
}

/// Trait for the easter-egg sound
pub trait Chime {
    /// Start playing; must not block until the sound ends
    fn play(&mut self) -> Result<(), FeedbackError>;
}

/// Feedback sink that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl Haptics for NoFeedback {
    fn perform(&mut self, _pattern: HapticPattern) -> Result<(), FeedbackError> {
        Ok(())
    }
}

impl Chime for NoFeedback {
    fn play(&mut self) -> Result<(), FeedbackError> {
        Ok(())
    }
}
