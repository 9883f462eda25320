//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Only the controller task owns the face; everything else talks to it here.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use catcompass_core::gesture::PointerPhase;
use catcompass_core::{FaceSnapshot, Rect, Tilt};

/// Channel capacity for input events
const INPUT_CHANNEL_SIZE: usize = 16;

/// Sensor and touch input for the controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Touch sample in screen pixels
    Pointer {
        x: u16,
        y: u16,
        phase: PointerPhase,
        at_ms: u64,
    },
    /// New accelerometer tilt
    Tilt(Tilt),
}

/// Input events from the input task (touch, IMU)
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Latest face state to draw; older snapshots are overwritten
pub static SNAPSHOT: Signal<CriticalSectionRawMutex, FaceSnapshot> = Signal::new();

/// Hot region of the last drawn frame, face-local coordinates
///
/// Written by the display task, read by the controller for hit testing.
pub static HOT_REGION: BlockingMutex<CriticalSectionRawMutex, Cell<Option<Rect>>> =
    BlockingMutex::new(Cell::new(None));
