//! CST816S capacitive touch controller (I2C)
//!
//! Single-finger controller found on most round 240x240 watch boards. The
//! INT line pulses low on every report; the host then reads registers
//! 0x01..=0x06 in one burst.
//!
//! # Report layout
//!
//! | Reg  | Content                                   |
//! |------|-------------------------------------------|
//! | 0x01 | Gesture ID                                |
//! | 0x02 | Finger count (0 or 1)                     |
//! | 0x03 | Event (bits 7:6), X high nibble (bits 3:0) |
//! | 0x04 | X low byte                                |
//! | 0x05 | Y high nibble (bits 3:0)                  |
//! | 0x06 | Y low byte                                |

use catcompass_core::gesture::PointerPhase;
use embedded_hal_async::i2c::I2c;

use super::TouchError;

/// Default I2C address
pub const DEFAULT_ADDRESS: u8 = 0x15;

/// Register addresses
pub mod reg {
    /// First byte of a touch report
    pub const GESTURE_ID: u8 = 0x01;
    /// Chip identifier
    pub const CHIP_ID: u8 = 0xA7;
    /// Write non-zero to keep the controller out of auto sleep
    pub const DIS_AUTO_SLEEP: u8 = 0xFE;
}

/// Chip IDs reported by CST816 variants
const KNOWN_CHIP_IDS: [u8; 3] = [0xB4, 0xB5, 0xB6];

/// Report length starting at `GESTURE_ID`
pub const REPORT_LEN: usize = 6;

/// Contact event from the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    Down,
    Up,
    Contact,
    /// Reserved encoding
    None,
}

/// On-chip gesture recognition result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchGesture {
    None,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    SingleClick,
    DoubleClick,
    LongPress,
    Unknown(u8),
}

impl From<u8> for TouchGesture {
    fn from(id: u8) -> Self {
        match id {
            0x00 => TouchGesture::None,
            0x01 => TouchGesture::SlideUp,
            0x02 => TouchGesture::SlideDown,
            0x03 => TouchGesture::SlideLeft,
            0x04 => TouchGesture::SlideRight,
            0x05 => TouchGesture::SingleClick,
            0x0B => TouchGesture::DoubleClick,
            0x0C => TouchGesture::LongPress,
            other => TouchGesture::Unknown(other),
        }
    }
}

/// One decoded touch report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchReport {
    pub gesture: TouchGesture,
    pub fingers: u8,
    pub event: TouchEvent,
    /// Screen pixels, origin top-left
    pub x: u16,
    pub y: u16,
}

impl TouchReport {
    /// Decode registers 0x01..=0x06
    pub fn decode(buf: &[u8; REPORT_LEN]) -> Self {
        let event = match buf[2] >> 6 {
            0 => TouchEvent::Down,
            1 => TouchEvent::Up,
            2 => TouchEvent::Contact,
            _ => TouchEvent::None,
        };

        Self {
            gesture: TouchGesture::from(buf[0]),
            fingers: buf[1],
            event,
            x: (((buf[2] & 0x0F) as u16) << 8) | buf[3] as u16,
            y: (((buf[4] & 0x0F) as u16) << 8) | buf[5] as u16,
        }
    }

    pub fn is_touching(&self) -> bool {
        self.fingers > 0 && self.event != TouchEvent::Up
    }
}

/// CST816S driver
///
/// Holds only the address; the bus is passed to each call.
#[derive(Debug, Clone, Copy)]
pub struct Cst816s {
    address: u8,
}

impl Default for Cst816s {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl Cst816s {
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    /// Check the chip ID and keep the controller awake
    ///
    /// Call after releasing the reset line. Returns the chip ID.
    pub async fn init<I: I2c>(&self, i2c: &mut I) -> Result<u8, TouchError> {
        let id = self.read_register(i2c, reg::CHIP_ID).await?;
        if !KNOWN_CHIP_IDS.contains(&id) {
            return Err(TouchError::UnknownChip(id));
        }

        i2c.write(self.address, &[reg::DIS_AUTO_SLEEP, 0x01])
            .await
            .map_err(|_| TouchError::Bus)?;

        Ok(id)
    }

    /// Read and decode the current report
    pub async fn read_report<I: I2c>(&self, i2c: &mut I) -> Result<TouchReport, TouchError> {
        let mut buf = [0u8; REPORT_LEN];
        i2c.write_read(self.address, &[reg::GESTURE_ID], &mut buf)
            .await
            .map_err(|_| TouchError::Bus)?;
        Ok(TouchReport::decode(&buf))
    }

    async fn read_register<I: I2c>(&self, i2c: &mut I, register: u8) -> Result<u8, TouchError> {
        let mut buf = [0u8; 1];
        i2c.write_read(self.address, &[register], &mut buf)
            .await
            .map_err(|_| TouchError::Bus)?;
        Ok(buf[0])
    }
}

/// Turns a stream of reports into pointer phases
///
/// The controller reports Down/Contact/Up but drops reports under load, so
/// the phase comes from whether a finger was down on the previous report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactTracker {
    touching: bool,
    last: (u16, u16),
}

impl ContactTracker {
    pub const fn new() -> Self {
        Self {
            touching: false,
            last: (0, 0),
        }
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Phase and position for `report`, `None` if nothing changed
    pub fn update(&mut self, report: &TouchReport) -> Option<(PointerPhase, u16, u16)> {
        let now_touching = report.is_touching();
        let position = (report.x, report.y);

        let phase = match (self.touching, now_touching) {
            (false, true) => PointerPhase::Down,
            (true, true) if position != self.last => PointerPhase::Move,
            (true, true) => return None,
            // Lift reports carry the last contact position
            (true, false) => PointerPhase::Up,
            (false, false) => return None,
        };

        self.touching = now_touching;
        self.last = position;
        Some((phase, position.0, position.1))
    }

    /// Lost contact with the controller mid-touch
    pub fn cancel(&mut self) -> Option<PointerPhase> {
        if self.touching {
            self.touching = false;
            Some(PointerPhase::Cancel)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(fingers: u8, event: u8, x: u16, y: u16) -> TouchReport {
        TouchReport::decode(&[
            0x00,
            fingers,
            (event << 6) | ((x >> 8) as u8 & 0x0F),
            x as u8,
            (y >> 8) as u8 & 0x0F,
            y as u8,
        ])
    }

    #[test]
    fn test_decode_report() {
        let r = TouchReport::decode(&[0x0B, 0x01, 0x80, 0xF0, 0x00, 0x78]);
        assert_eq!(r.gesture, TouchGesture::DoubleClick);
        assert_eq!(r.fingers, 1);
        assert_eq!(r.event, TouchEvent::Contact);
        assert_eq!(r.x, 240);
        assert_eq!(r.y, 120);
        assert!(r.is_touching());
    }

    #[test]
    fn test_decode_twelve_bit_coordinates() {
        let r = report(1, 0, 0x123, 0x0AB);
        assert_eq!((r.x, r.y), (0x123, 0x0AB));
        assert_eq!(r.event, TouchEvent::Down);
    }

    #[test]
    fn test_tracker_sequence() {
        let mut tracker = ContactTracker::new();
        assert_eq!(
            tracker.update(&report(1, 0, 10, 20)),
            Some((PointerPhase::Down, 10, 20))
        );
        assert_eq!(tracker.update(&report(1, 2, 10, 20)), None);
        assert_eq!(
            tracker.update(&report(1, 2, 12, 20)),
            Some((PointerPhase::Move, 12, 20))
        );
        assert_eq!(
            tracker.update(&report(1, 1, 12, 20)),
            Some((PointerPhase::Up, 12, 20))
        );
        assert_eq!(tracker.update(&report(0, 1, 12, 20)), None);
        assert!(!tracker.is_touching());
    }

    #[test]
    fn test_tracker_cancel_only_when_touching() {
        let mut tracker = ContactTracker::new();
        assert_eq!(tracker.cancel(), None);
        tracker.update(&report(1, 0, 1, 1));
        assert_eq!(tracker.cancel(), Some(PointerPhase::Cancel));
        assert_eq!(tracker.cancel(), None);
    }

    #[test]
    fn test_unknown_gesture() {
        assert_eq!(TouchGesture::from(0x42), TouchGesture::Unknown(0x42));
    }
}
