//! Readout text lines

use core::fmt::Write;

use catcompass_core::compass::{LocationFix, NO_CLOCK};
use catcompass_core::state::NorthReference;
use heapless::String;

use crate::command::TEXT_LEN;

/// Number of readout lines
pub const READOUT_LINES: usize = 6;

pub type Line = String<TEXT_LEN>;

/// Format into a fresh line; overflow truncates to what was written
fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut s = Line::new();
    let _ = s.write_fmt(args);
    s
}

/// `BRG 123°M`; the bearing is truncated to whole degrees
pub fn bearing_line(bearing_deg: f32, north: NorthReference) -> Line {
    line(format_args!("BRG {}{}", bearing_deg as i32, north.suffix()))
}

pub fn speed_line(speed_kmh: f32) -> Line {
    line(format_args!("Spd: {:.1} km/h", speed_kmh))
}

pub fn altitude_line(altitude_m: f32) -> Line {
    line(format_args!("Alt: {:.0} m", altitude_m))
}

pub fn declination_line(declination_deg: f32) -> Line {
    line(format_args!("Decl: {:+.1}°", declination_deg))
}

pub fn local_line(clock: &str) -> Line {
    line(format_args!("Loc: {}", clock))
}

pub fn utc_line(clock: &str) -> Line {
    line(format_args!("UTC: {}", clock))
}

/// All readout lines, top to bottom
///
/// Without a fix the numeric lines show zero and the clocks `--:--`.
pub fn readout_lines(
    bearing_deg: f32,
    north: NorthReference,
    location: Option<&LocationFix>,
) -> [Line; READOUT_LINES] {
    let (speed, altitude, declination) =
        location.map_or((0.0, 0.0, 0.0), |f| (f.speed_kmh, f.altitude_m, f.declination_deg));
    let local = location.map_or(NO_CLOCK, |f| f.local_time.as_str());
    let utc = location.map_or(NO_CLOCK, |f| f.utc_time.as_str());

    [
        bearing_line(bearing_deg, north),
        speed_line(speed),
        altitude_line(altitude),
        declination_line(declination),
        local_line(local),
        utc_line(utc),
    ]
}
