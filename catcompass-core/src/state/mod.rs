//! Display mode state machine
//!
//! What the face shows is a function of the current mode and the north
//! reference. Both change only through explicit events.

pub mod events;
pub mod machine;

pub use events::FaceEvent;
pub use machine::{Mode, NorthReference};
