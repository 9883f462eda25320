//! Feedback collaborators for the watch board
//!
//! The board has neither a vibration motor nor a buzzer, so haptics and the
//! chime only show up in the log.

use defmt::*;

use catcompass_core::traits::{Chime, FeedbackError, HapticPattern, Haptics};

/// Logs feedback requests
pub struct LogFeedback;

impl Haptics for LogFeedback {
    fn perform(&mut self, pattern: HapticPattern) -> Result<(), FeedbackError> {
        debug!("Haptic: {}", pattern);
        Ok(())
    }
}

impl Chime for LogFeedback {
    fn play(&mut self) -> Result<(), FeedbackError> {
        info!("Chime");
        Ok(())
    }
}
