//! Plane geometry shared by the gesture, animation and render layers
//!
//! All coordinates are in a face-local frame: origin at the centre of the
//! display, x to the right, y down (screen convention), units in pixels.

use core::ops::{Add, AddAssign, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tilt angle (degrees) that maps to the full container radius before the
/// doubling factor is applied
pub const TILT_FULL_SCALE_DEG: f32 = 45.0;

/// 2D vector / point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along `angle_rad` (0 = +x, clockwise on screen)
    pub fn from_polar(radius: f32, angle_rad: f32) -> Self {
        Self::new(radius * libm::cosf(angle_rad), radius * libm::sinf(angle_rad))
    }

    pub fn length(self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Scale down to `max_len` if longer; shorter vectors are returned as-is
    pub fn clamp_length(self, max_len: f32) -> Self {
        let len = self.length();
        if len > max_len && len > 0.0 {
            self * (max_len / len)
        } else {
            self
        }
    }

    /// Angle from +x axis in radians
    ///
    /// A zero vector (including signed zeros) has angle 0.
    pub fn angle(self) -> f32 {
        if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            libm::atan2f(self.y, self.x)
        }
    }

    /// Rotate clockwise on screen by `degrees` about the origin
    pub fn rotated_deg(self, degrees: f32) -> Self {
        let rad = degrees.to_radians();
        let (s, c) = (libm::sinf(rad), libm::cosf(rad));
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle (left <= right, top <= bottom)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of `width` x `height` centred on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    /// Grow on every side by `amount`
    pub fn inflate(self, amount: f32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }
}

/// Device tilt from the sensor collaborator, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tilt {
    pub pitch_deg: f32,
    pub roll_deg: f32,
}

impl Tilt {
    pub const LEVEL: Tilt = Tilt {
        pitch_deg: 0.0,
        roll_deg: 0.0,
    };

    pub const fn new(pitch_deg: f32, roll_deg: f32) -> Self {
        Self {
            pitch_deg,
            roll_deg,
        }
    }

    /// Bubble-level style offset for a container of `radius`, not clamped
    ///
    /// The offset is `2·sin(angle)` of the radius on each axis, so a 30° tilt
    /// reaches the rim.
    pub fn offset(self, radius: f32) -> Vec2 {
        let gain = 90.0 / TILT_FULL_SCALE_DEG;
        let roll = self.roll_deg.to_radians();
        let pitch = self.pitch_deg.to_radians();
        Vec2::new(
            -radius * libm::sinf(roll) * gain,
            radius * libm::sinf(pitch) * gain,
        )
    }

    /// Offset clamped into the disc of `radius`
    pub fn position_in(self, radius: f32) -> Vec2 {
        self.offset(radius).clamp_length(radius)
    }
}

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const DARK_GRAY: Color = Color::rgb(0x44, 0x44, 0x44);
    pub const LIGHT_BLUE: Color = Color::rgb(0xAD, 0xD8, 0xE6);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xEB, 0x3B);
    pub const ORANGE: Color = Color::rgb(0xFF, 0x98, 0x00);
    pub const MAGENTA: Color = Color::rgb(0xE9, 0x1E, 0x63);
    pub const CYAN: Color = Color::rgb(0x00, 0xBC, 0xD4);
    pub const GREEN: Color = Color::rgb(0x8B, 0xC3, 0x4A);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Scale alpha by `factor` in [0, 1]
    pub fn faded(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        self.with_alpha((self.a as f32 * factor) as u8)
    }

    /// Blend onto an opaque background and pack as RGB565
    pub fn to_rgb565_over(self, background: Color) -> u16 {
        let a = self.a as u16;
        let mix = |fg: u8, bg: u8| -> u16 { (fg as u16 * a + bg as u16 * (255 - a)) / 255 };
        let r = mix(self.r, background.r);
        let g = mix(self.g, background.g);
        let b = mix(self.b, background.b);
        ((r & 0xF8) << 8) | ((g & 0xFC) << 3) | (b >> 3)
    }
}
