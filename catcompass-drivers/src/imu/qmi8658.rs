//! QMI8658 6-axis IMU (I2C)
//!
//! Only the accelerometer is used: the face needs pitch and roll for the
//! bubble level and the chase, not rates. Board axes are x to the right,
//! y up the screen and z out of the glass.

use catcompass_core::Tilt;
use embedded_hal_async::i2c::I2c;

use super::ImuError;

/// Default I2C address (SA0 high)
pub const DEFAULT_ADDRESS: u8 = 0x6B;

/// Expected WHO_AM_I value
const CHIP_ID: u8 = 0x05;

/// Register addresses
#[allow(dead_code)]
mod reg {
    pub const WHO_AM_I: u8 = 0x00;
    pub const REVISION: u8 = 0x01;
    pub const CTRL1: u8 = 0x02;
    pub const CTRL2: u8 = 0x03;
    pub const CTRL7: u8 = 0x08;
    pub const STATUS0: u8 = 0x2E;
    pub const AX_L: u8 = 0x35;
    pub const RESET: u8 = 0x60;
}

/// CTRL1: register address auto increment
const CTRL1_ADDR_AI: u8 = 0x40;
/// CTRL2: ±4 g full scale
const CTRL2_FS_4G: u8 = 0b001 << 4;
/// CTRL2: 125 Hz output data rate
const CTRL2_ODR_125HZ: u8 = 0x06;
/// CTRL7: accelerometer enable
const CTRL7_ACCEL_EN: u8 = 0x01;
/// STATUS0: new accelerometer sample
const STATUS0_ACCEL_READY: u8 = 0x01;

/// Counts per g at ±4 g
pub const LSB_PER_G: f32 = 8192.0;

/// Acceleration in g
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accel {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Accel {
    /// Decode six little-endian bytes starting at AX_L
    pub fn decode(buf: &[u8; 6]) -> Self {
        let axis = |i: usize| i16::from_le_bytes([buf[i], buf[i + 1]]) as f32 / LSB_PER_G;
        Self {
            x: axis(0),
            y: axis(2),
            z: axis(4),
        }
    }
}

/// Pitch and roll from a gravity vector
///
/// Positive pitch means the top edge of the watch is raised, positive roll
/// the right edge. Free fall (no gravity) reads as level.
pub fn tilt_from_accel(accel: Accel) -> Tilt {
    let Accel { x, y, z } = accel;
    if x == 0.0 && y == 0.0 && z == 0.0 {
        return Tilt::LEVEL;
    }

    let pitch = libm::atan2f(y, libm::sqrtf(x * x + z * z));
    let roll = libm::atan2f(x, libm::sqrtf(y * y + z * z));
    Tilt::new(pitch.to_degrees(), roll.to_degrees())
}

/// QMI8658 driver
///
/// Holds only the address; the bus is shared with the touch controller.
#[derive(Debug, Clone, Copy)]
pub struct Qmi8658 {
    address: u8,
}

impl Default for Qmi8658 {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl Qmi8658 {
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    /// Verify the chip and start the accelerometer
    pub async fn init<I: I2c>(&self, i2c: &mut I) -> Result<(), ImuError> {
        let id = self.read_register(i2c, reg::WHO_AM_I).await?;
        if id != CHIP_ID {
            return Err(ImuError::WrongChip(id));
        }

        self.write_register(i2c, reg::CTRL1, CTRL1_ADDR_AI).await?;
        self.write_register(i2c, reg::CTRL2, CTRL2_FS_4G | CTRL2_ODR_125HZ)
            .await?;
        self.write_register(i2c, reg::CTRL7, CTRL7_ACCEL_EN).await
    }

    /// True if a sample arrived since the last read
    pub async fn accel_ready<I: I2c>(&self, i2c: &mut I) -> Result<bool, ImuError> {
        let status = self.read_register(i2c, reg::STATUS0).await?;
        Ok(status & STATUS0_ACCEL_READY != 0)
    }

    pub async fn read_accel<I: I2c>(&self, i2c: &mut I) -> Result<Accel, ImuError> {
        let mut buf = [0u8; 6];
        i2c.write_read(self.address, &[reg::AX_L], &mut buf)
            .await
            .map_err(|_| ImuError::Bus)?;
        Ok(Accel::decode(&buf))
    }

    pub async fn read_tilt<I: I2c>(&self, i2c: &mut I) -> Result<Tilt, ImuError> {
        self.read_accel(i2c).await.map(tilt_from_accel)
    }

    async fn read_register<I: I2c>(&self, i2c: &mut I, register: u8) -> Result<u8, ImuError> {
        let mut buf = [0u8; 1];
        i2c.write_read(self.address, &[register], &mut buf)
            .await
            .map_err(|_| ImuError::Bus)?;
        Ok(buf[0])
    }

    async fn write_register<I: I2c>(&self, i2c: &mut I, register: u8, value: u8) -> Result<(), ImuError> {
        i2c.write(self.address, &[register, value])
            .await
            .map_err(|_| ImuError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 0.05, "{} != {}", a, b);
    }

    #[test]
    fn test_decode_little_endian() {
        // x = +1 g, y = -0.5 g, z = 0
        let accel = Accel::decode(&[0x00, 0x20, 0x00, 0xF0, 0x00, 0x00]);
        assert_eq!(accel, Accel { x: 1.0, y: -0.5, z: 0.0 });
    }

    #[test]
    fn test_flat_is_level() {
        let tilt = tilt_from_accel(Accel { x: 0.0, y: 0.0, z: 1.0 });
        assert_close(tilt.pitch_deg, 0.0);
        assert_close(tilt.roll_deg, 0.0);
    }

    #[test]
    fn test_top_edge_up_is_positive_pitch() {
        let s = libm::sinf(30f32.to_radians());
        let c = libm::cosf(30f32.to_radians());
        let tilt = tilt_from_accel(Accel { x: 0.0, y: s, z: c });
        assert_close(tilt.pitch_deg, 30.0);
        assert_close(tilt.roll_deg, 0.0);
    }

    #[test]
    fn test_on_edge_is_ninety_roll() {
        let tilt = tilt_from_accel(Accel { x: 1.0, y: 0.0, z: 0.0 });
        assert_close(tilt.roll_deg, 90.0);
    }

    #[test]
    fn test_free_fall_is_level() {
        assert_eq!(tilt_from_accel(Accel::default()), Tilt::LEVEL);
    }

    proptest! {
        #[test]
        fn prop_tilt_bounded(x in -4.0f32..4.0, y in -4.0f32..4.0, z in -4.0f32..4.0) {
            let tilt = tilt_from_accel(Accel { x, y, z });
            prop_assert!(tilt.pitch_deg.abs() <= 90.0 + 1e-3);
            prop_assert!(tilt.roll_deg.abs() <= 90.0 + 1e-3);
        }

        #[test]
        fn prop_tilt_scale_invariant(x in -1.0f32..1.0, y in -1.0f32..1.0, k in 0.5f32..4.0) {
            let a = tilt_from_accel(Accel { x, y, z: 1.0 });
            let b = tilt_from_accel(Accel { x: x * k, y: y * k, z: k });
            prop_assert!((a.pitch_deg - b.pitch_deg).abs() < 1e-2);
            prop_assert!((a.roll_deg - b.roll_deg).abs() < 1e-2);
        }
    }
}
