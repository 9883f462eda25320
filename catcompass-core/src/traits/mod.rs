//! Collaborator traits
//!
//! These traits define the interface between the face logic and the
//! board-specific outputs it pokes (vibration motor, speaker).

pub mod feedback;

pub use feedback::{Chime, FeedbackError, HapticPattern, Haptics, NoFeedback};
