//! Compass math and the readings the face displays
//!
//! Angles are degrees, clockwise from north, normalised to [0, 360).

use core::fmt::Write;

use heapless::String;

use crate::geometry::{Tilt, Vec2};
use crate::state::NorthReference;

/// Capacity of an `HH:MM` clock string
pub const CLOCK_LEN: usize = 8;

/// Placeholder shown when no time is known
pub const NO_CLOCK: &str = "--:--";

/// Wrap any angle into [0, 360)
pub fn normalize_degrees(deg: f32) -> f32 {
    let r = libm::fmodf(deg, 360.0);
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -tiny + 360 rounds to 360
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Shortest signed difference `to - from` in (-180, 180]
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let mut delta = normalize_degrees(to) - normalize_degrees(from);
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

/// True heading from magnetic heading and declination (east positive)
pub fn true_heading(magnetic_deg: f32, declination_deg: f32) -> f32 {
    normalize_degrees(magnetic_deg - declination_deg)
}

/// Bearing read off a bezel rotated by `bezel_deg`
pub fn bezel_bearing(bezel_deg: f32) -> f32 {
    normalize_degrees(360.0 - bezel_deg)
}

/// Apply one rotary input step
///
/// Scrolling forward turns the bezel counter-clockwise.
pub fn rotate_bezel(bezel_deg: f32, scroll: f32, sensitivity: f32) -> f32 {
    normalize_degrees(bezel_deg - scroll * sensitivity)
}

/// Low-pass filter for a wrapping heading
///
/// Moves a fraction `alpha` of the shortest arc towards each sample, so
/// 359° → 1° passes through 0° instead of swinging round.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AzimuthFilter {
    alpha: f32,
    value: Option<f32>,
}

impl AzimuthFilter {
    pub const fn new(alpha: f32) -> Self {
        Self { alpha, value: None }
    }

    /// Feed a raw sample and return the filtered heading
    ///
    /// The first sample is taken as-is.
    pub fn update(&mut self, raw_deg: f32) -> f32 {
        let raw = normalize_degrees(raw_deg);
        let next = match self.value {
            None => raw,
            Some(current) => normalize_degrees(current + self.alpha * shortest_arc(current, raw)),
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<f32> {
        self.value
    }
}

/// Bubble level geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BubbleLevel {
    pub center: Vec2,
    pub radius: f32,
    pub bubble_radius: f32,
}

impl BubbleLevel {
    /// Level placed right of centre, sized from the main dial radius
    pub fn for_main_radius(main_radius: f32) -> Self {
        let radius = main_radius * 0.15;
        Self {
            center: Vec2::new(main_radius * 0.6, 0.0),
            radius,
            bubble_radius: radius * 0.3,
        }
    }

    /// Bubble centre for `tilt`, kept fully inside the outline
    pub fn bubble_position(&self, tilt: Tilt) -> Vec2 {
        let travel = self.radius - self.bubble_radius;
        self.center + tilt.offset(self.radius).clamp_length(travel)
    }
}

/// Magnetometer calibration state reported by the sensor collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorAccuracy {
    #[default]
    Unreliable,
    Low,
    Medium,
    High,
}

impl SensorAccuracy {
    /// Check if the heading is good enough to draw at full strength
    pub fn is_trustworthy(&self) -> bool {
        matches!(self, SensorAccuracy::Medium | SensorAccuracy::High)
    }
}

/// Location data from the positioning collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    pub speed_kmh: f32,
    pub altitude_m: f32,
    /// Magnetic declination, east positive
    pub declination_deg: f32,
    /// Local time `HH:MM`
    pub local_time: String<CLOCK_LEN>,
    /// UTC time `HH:MM`
    pub utc_time: String<CLOCK_LEN>,
}

impl LocationFix {
    /// Fix without wall-clock times
    pub fn new(speed_kmh: f32, altitude_m: f32, declination_deg: f32) -> Self {
        Self {
            speed_kmh,
            altitude_m,
            declination_deg,
            local_time: clock_text(NO_CLOCK),
            utc_time: clock_text(NO_CLOCK),
        }
    }

    /// Attach local and UTC times as minutes past midnight
    pub fn with_times(mut self, local_minutes: u16, utc_minutes: u16) -> Self {
        self.local_time = format_clock(local_minutes);
        self.utc_time = format_clock(utc_minutes);
        self
    }
}

/// `HH:MM` for minutes past midnight (wraps at 24 h)
pub fn format_clock(minutes: u16) -> String<CLOCK_LEN> {
    let minutes = minutes % (24 * 60);
    let mut s = String::new();
    if write!(s, "{:02}:{:02}", minutes / 60, minutes % 60).is_err() {
        return clock_text(NO_CLOCK);
    }
    s
}

fn clock_text(text: &str) -> String<CLOCK_LEN> {
    let mut s = String::new();
    // NO_CLOCK always fits
    let _ = s.push_str(text);
    s
}

/// Everything the sensor and location collaborators feed the face
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompassReadings {
    /// Smoothed magnetic heading
    pub magnetic_heading: f32,
    pub tilt: Tilt,
    /// Bezel rotation, clockwise
    pub bezel_deg: f32,
    pub accuracy: SensorAccuracy,
    pub location: Option<LocationFix>,
}

impl CompassReadings {
    /// Declination from the fix, 0 without one
    pub fn declination(&self) -> f32 {
        self.location.as_ref().map_or(0.0, |fix| fix.declination_deg)
    }

    /// Heading the needle shows for `north`
    pub fn heading(&self, north: NorthReference) -> f32 {
        match north {
            NorthReference::Magnetic => self.magnetic_heading,
            NorthReference::True => true_heading(self.magnetic_heading, self.declination()),
        }
    }

    pub fn bearing(&self) -> f32 {
        bezel_bearing(self.bezel_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!(close(normalize_degrees(-90.0), 270.0));
        assert!(close(normalize_degrees(725.0), 5.0));
        assert!(normalize_degrees(-1e-6) < 360.0);
    }

    #[test]
    fn test_shortest_arc_wraps() {
        assert!(close(shortest_arc(350.0, 10.0), 20.0));
        assert!(close(shortest_arc(10.0, 350.0), -20.0));
        assert!(close(shortest_arc(0.0, 180.0), 180.0));
    }

    #[test]
    fn test_filter_takes_short_way_round() {
        let mut filter = AzimuthFilter::new(0.25);
        assert_eq!(filter.update(350.0), 350.0);

        // 20° ahead through north; a quarter of it lands on 355°
        let v = filter.update(10.0);
        assert!(close(v, 355.0));

        let v = filter.update(10.0);
        assert!(close(v, 358.75));
        let v = filter.update(10.0);
        assert!(close(v, normalize_degrees(358.75 + 0.25 * 11.25)));
    }

    #[test]
    fn test_true_heading_and_bearing() {
        assert!(close(true_heading(10.0, 15.0), 355.0));
        assert!(close(true_heading(10.0, -5.0), 15.0));
        assert_eq!(bezel_bearing(0.0), 0.0);
        assert!(close(bezel_bearing(90.0), 270.0));
    }

    #[test]
    fn test_rotary_direction() {
        // One forward detent at sensitivity 4 turns the bezel back 4°
        assert!(close(rotate_bezel(0.0, 1.0, 4.0), 356.0));
        assert!(close(rotate_bezel(356.0, -1.0, 4.0), 0.0));
    }

    #[test]
    fn test_bubble_clamped_inside_outline() {
        let level = BubbleLevel::for_main_radius(100.0);
        assert!(close(level.center.x, 60.0));
        assert!(close(level.center.y, 0.0));
        assert!(close(level.radius, 15.0));
        assert!(close(level.bubble_radius, 4.5));

        assert_eq!(level.bubble_position(Tilt::LEVEL), level.center);
        let p = level.bubble_position(Tilt::new(80.0, 0.0));
        assert!(close(p.distance(level.center), 10.5));
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(format_clock(0).as_str(), "00:00");
        assert_eq!(format_clock(13 * 60 + 7).as_str(), "13:07");
        assert_eq!(format_clock(24 * 60 + 1).as_str(), "00:01");
        let fix = LocationFix::new(0.0, 0.0, 0.0);
        assert_eq!(fix.utc_time.as_str(), NO_CLOCK);
    }

    #[test]
    fn test_readings_heading_by_reference() {
        let readings = CompassReadings {
            magnetic_heading: 100.0,
            location: Some(LocationFix::new(0.0, 0.0, 12.5)),
            ..CompassReadings::default()
        };
        assert_eq!(readings.heading(NorthReference::Magnetic), 100.0);
        assert!(close(readings.heading(NorthReference::True), 87.5));

        let no_fix = CompassReadings {
            magnetic_heading: 100.0,
            ..CompassReadings::default()
        };
        assert_eq!(no_fix.heading(NorthReference::True), 100.0);
    }

    #[test]
    fn test_accuracy_trust() {
        assert!(!SensorAccuracy::default().is_trustworthy());
        assert!(!SensorAccuracy::Low.is_trustworthy());
        assert!(SensorAccuracy::High.is_trustworthy());
    }
}
