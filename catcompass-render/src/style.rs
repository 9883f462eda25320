//! Colours, stroke widths and sizes used by the scene

use catcompass_core::compass::SensorAccuracy;
use catcompass_core::state::NorthReference;
use catcompass_core::Color;

use crate::command::Glyph;

pub const BEZEL_COLOR: Color = Color::WHITE;
pub const BEZEL_WIDTH: u8 = 2;
pub const BEZEL_TICK_STEP_DEG: u16 = 15;
pub const MAJOR_TICK_INNER: f32 = 0.90;
pub const MINOR_TICK_INNER: f32 = 0.95;
pub const CARDINAL_RADIUS: f32 = 0.80;

pub const NEEDLE_WIDTH: u8 = 8;
pub const NEEDLE_INNER: f32 = 0.3;
pub const NEEDLE_OUTER: f32 = 0.9;
/// Needle alpha while the magnetometer is uncalibrated
pub const NEEDLE_DIM_ALPHA: u8 = 0x60;

pub const MARKER_COLOR: Color = Color::LIGHT_BLUE;
pub const MARKER_HEIGHT: f32 = 0.10;
pub const MARKER_WIDTH: f32 = 0.12;

/// Mode symbol box (px)
pub const SYMBOL_SIZE: f32 = 36.0;
/// Extra touch margin around the symbol (px)
pub const SYMBOL_TOUCH_PADDING: f32 = 20.0;
pub const EVADER_COLOR: Color = Color::WHITE;

pub const BOUNDARY_COLOR: Color = Color::WHITE.with_alpha(0x44);
pub const BOUNDARY_WIDTH: u8 = 2;
pub const BOUNDARY_DASH: f32 = 10.0;
pub const PARTICLE_RADIUS: f32 = 3.0;

pub const LEVEL_OUTLINE_COLOR: Color = Color::DARK_GRAY;
pub const LEVEL_OUTLINE_WIDTH: u8 = 3;
pub const BUBBLE_COLOR: Color = Color::WHITE.with_alpha(0x88);

pub const READOUT_COLOR: Color = Color::WHITE;
pub const READOUT_LINE_SPACING: f32 = 1.15;

pub const SECRET_TEXT: &str = "VA3FOD";
pub const SECRET_COLOR: Color = Color::RED;
pub const SECRET_OFFSET: f32 = 0.5;

/// Needle and symbol colour for a north reference
pub fn north_color(north: NorthReference) -> Color {
    match north {
        NorthReference::Magnetic => Color::RED,
        NorthReference::True => Color::BLUE,
    }
}

pub fn north_glyph(north: NorthReference) -> Glyph {
    match north {
        NorthReference::Magnetic => Glyph::Cat,
        NorthReference::True => Glyph::Paw,
    }
}

pub fn needle_color(north: NorthReference, accuracy: SensorAccuracy) -> Color {
    let color = north_color(north);
    if accuracy.is_trustworthy() {
        color
    } else {
        color.with_alpha(NEEDLE_DIM_ALPHA)
    }
}
