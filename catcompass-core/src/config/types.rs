//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum particles in one burst
pub const MAX_PARTICLES: usize = 48;

/// Gesture timing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Hold time before a press becomes a long press
    pub long_press_ms: u32,
    /// Maximum gap between two releases that counts as a double tap
    pub double_tap_ms: u32,
    /// Extra wait after the double-tap window before a single tap is confirmed
    pub confirm_slack_ms: u32,
}

impl GestureConfig {
    /// Delay from release until a single tap is confirmed
    pub fn confirm_delay_ms(&self) -> u32 {
        self.double_tap_ms.saturating_add(self.confirm_slack_ms)
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 3000,
            double_tap_ms: 300,
            confirm_slack_ms: 50,
        }
    }
}

/// Chase phase parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChaseConfig {
    /// Capture distance (px)
    pub catch_threshold: f32,
    /// Pursuer displacement per frame that counts as movement (px)
    pub motion_epsilon: f32,
    /// Pursuer stillness before the evader starts moving
    pub idle_timeout_ms: u32,
    /// Fraction of the remaining gap the evader covers per reference tick
    pub evader_speed_factor: f32,
    /// Tick length the speed factor is calibrated for
    pub reference_tick_ms: u32,
    /// Evader start distance as a fraction of the container radius
    pub evader_start_fraction: f32,
    /// Give up and finish if nothing is caught in this time
    pub timeout_ms: u32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            catch_threshold: 15.0,
            motion_epsilon: 2.0,
            idle_timeout_ms: 400,
            evader_speed_factor: 0.02,
            reference_tick_ms: 16,
            evader_start_fraction: 0.8,
            timeout_ms: 6000,
        }
    }
}

/// Particle burst parameters
///
/// Speeds are in container radii per second; gravity is in px/s².
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BurstConfig {
    /// Burst length
    pub duration_ms: u32,
    /// Particles spawned at capture
    pub particle_count: u8,
    /// Slowest launch speed
    pub min_speed: f32,
    /// Fastest launch speed
    pub max_speed: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Velocity multiplier applied every tick
    pub drag: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            particle_count: 40,
            min_speed: 1.0,
            max_speed: 3.0,
            gravity: 9.8 * 50.0,
            drag: 0.99,
        }
    }
}

/// Complete face configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    pub gesture: GestureConfig,
    pub chase: ChaseConfig,
    pub burst: BurstConfig,
    /// Low-pass factor for the heading (0 < alpha <= 1)
    pub heading_smoothing: f32,
    /// Bezel degrees per rotary scroll unit
    pub bezel_sensitivity: f32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            chase: ChaseConfig::default(),
            burst: BurstConfig::default(),
            heading_smoothing: 0.25,
            bezel_sensitivity: 4.0,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A duration is zero or the tap windows overlap the long press
    InvalidTiming,
    /// Capture or motion threshold is not positive
    InvalidThreshold,
    /// Speed factor outside (0, 1) or speed range inverted
    InvalidSpeed,
    /// Drag outside (0, 1]
    InvalidDrag,
    /// More particles than a burst can hold
    TooManyParticles,
    /// Heading smoothing outside (0, 1]
    InvalidSmoothing,
}

impl FaceConfig {
    /// Check every parameter is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        if g.long_press_ms == 0 || g.double_tap_ms == 0 || g.confirm_delay_ms() >= g.long_press_ms
        {
            return Err(ConfigError::InvalidTiming);
        }

        let c = &self.chase;
        if c.reference_tick_ms == 0 || c.timeout_ms == 0 {
            return Err(ConfigError::InvalidTiming);
        }
        if !(c.catch_threshold > 0.0) || !(c.motion_epsilon > 0.0) {
            return Err(ConfigError::InvalidThreshold);
        }
        if !(c.evader_speed_factor > 0.0 && c.evader_speed_factor < 1.0)
            || !(c.evader_start_fraction > 0.0 && c.evader_start_fraction <= 1.0)
        {
            return Err(ConfigError::InvalidSpeed);
        }

        let b = &self.burst;
        if b.duration_ms == 0 {
            return Err(ConfigError::InvalidTiming);
        }
        if b.particle_count as usize > MAX_PARTICLES {
            return Err(ConfigError::TooManyParticles);
        }
        if !(b.min_speed >= 0.0) || !(b.max_speed >= b.min_speed) {
            return Err(ConfigError::InvalidSpeed);
        }
        if !(b.drag > 0.0 && b.drag <= 1.0) {
            return Err(ConfigError::InvalidDrag);
        }

        if !(self.heading_smoothing > 0.0 && self.heading_smoothing <= 1.0) {
            return Err(ConfigError::InvalidSmoothing);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(FaceConfig::default().validate(), Ok(()));
        assert_eq!(GestureConfig::default().confirm_delay_ms(), 350);
    }

    #[test]
    fn test_tap_window_must_fit_in_long_press() {
        let mut config = FaceConfig::default();
        config.gesture.long_press_ms = 300;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));
    }

    #[test]
    fn test_particle_limit() {
        let mut config = FaceConfig::default();
        config.burst.particle_count = (MAX_PARTICLES + 1) as u8;
        assert_eq!(config.validate(), Err(ConfigError::TooManyParticles));
    }

    #[test]
    fn test_speed_factor_bounds() {
        let mut config = FaceConfig::default();
        config.chase.evader_speed_factor = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed));

        config.chase.evader_speed_factor = 0.02;
        config.burst.min_speed = 4.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let mut config = FaceConfig::default();
        config.chase.catch_threshold = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::InvalidThreshold));
    }
}
