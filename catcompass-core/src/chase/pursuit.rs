//! Pursuer / evader positions for the chase phase

use crate::config::ChaseConfig;
use crate::geometry::{Tilt, Vec2};

/// Positions and capture flag for one chase
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChaseState {
    /// Tilt-tracked marker ("cat")
    pub pursuer: Vec2,
    /// Marker being chased ("prey")
    pub evader: Vec2,
    /// Set once, never cleared
    pub captured: bool,
    radius: f32,
    /// Time since start (ms)
    elapsed_ms: u64,
    /// Last time the pursuer moved more than the motion epsilon
    last_pursuer_move_ms: u64,
}

impl ChaseState {
    /// Place the pursuer from `tilt` and the evader opposite it
    ///
    /// `radius` must be positive; the animation checks it before calling.
    pub fn new(tilt: Tilt, radius: f32, config: &ChaseConfig) -> Self {
        let pursuer = tilt.position_in(radius);
        let angle = pursuer.angle() + core::f32::consts::PI;
        let evader =
            Vec2::from_polar(radius * config.evader_start_fraction, angle).clamp_length(radius);

        Self {
            pursuer,
            evader,
            captured: false,
            radius,
            elapsed_ms: 0,
            last_pursuer_move_ms: 0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Time since the chase started
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn distance(&self) -> f32 {
        self.pursuer.distance(self.evader)
    }

    /// Advance by `dt_ms` with the current tilt
    ///
    /// Returns true on the step that captures the evader.
    pub fn step(&mut self, tilt: Tilt, dt_ms: u32, config: &ChaseConfig) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms as u64);

        let target = tilt.position_in(self.radius);
        if target.distance(self.pursuer) > config.motion_epsilon {
            self.last_pursuer_move_ms = self.elapsed_ms;
        }
        self.pursuer = target;

        if self.captured {
            self.evader = self.pursuer;
            return false;
        }

        if self.distance() < config.catch_threshold {
            self.captured = true;
            self.evader = self.pursuer;
            return true;
        }

        let still_for = self.elapsed_ms - self.last_pursuer_move_ms;
        if still_for > config.idle_timeout_ms as u64 {
            let fraction = closing_fraction(dt_ms, config);
            let gap = self.pursuer - self.evader;
            self.evader = (self.evader + gap * fraction).clamp_length(self.radius);
        }

        false
    }
}

/// Fraction of the gap the evader closes in `dt_ms`
///
/// `speed_factor` per reference tick, compounded so that two half ticks
/// cover the same distance as one full tick.
pub fn closing_fraction(dt_ms: u32, config: &ChaseConfig) -> f32 {
    if dt_ms == 0 {
        return 0.0;
    }
    let ticks = dt_ms as f32 / config.reference_tick_ms as f32;
    1.0 - libm::powf(1.0 - config.evader_speed_factor, ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_level_start_positions() {
        let chase = ChaseState::new(Tilt::LEVEL, 100.0, &ChaseConfig::default());
        assert_eq!(chase.pursuer, Vec2::ZERO);
        assert!(close(chase.evader.x, -80.0));
        assert!(close(chase.evader.y, 0.0));
        assert!(!chase.captured);
    }

    #[test]
    fn test_evader_starts_opposite() {
        // Pitched forward: pursuer below centre, evader above
        let chase = ChaseState::new(Tilt::new(10.0, 0.0), 100.0, &ChaseConfig::default());
        assert!(chase.pursuer.y > 0.0);
        assert!(chase.evader.y < 0.0);
        assert!(close(chase.evader.length(), 80.0));
    }

    #[test]
    fn test_capture_below_threshold_snaps() {
        let config = ChaseConfig::default();
        let mut chase = ChaseState::new(Tilt::LEVEL, 100.0, &config);
        chase.evader = Vec2::new(14.0, 0.0);

        assert!(chase.step(Tilt::LEVEL, 16, &config));
        assert!(chase.captured);
        assert_eq!(chase.evader, chase.pursuer);

        // Only the first capture reports
        assert!(!chase.step(Tilt::LEVEL, 16, &config));
        assert!(chase.captured);
    }

    #[test]
    fn test_evader_waits_for_idle_pursuer() {
        let config = ChaseConfig::default();
        let mut chase = ChaseState::new(Tilt::LEVEL, 100.0, &config);
        let start = chase.evader;

        // 400 ms of stillness is not yet "more than" the idle timeout
        for _ in 0..25 {
            chase.step(Tilt::LEVEL, 16, &config);
        }
        assert_eq!(chase.evader, start);

        chase.step(Tilt::LEVEL, 16, &config);
        assert!(chase.evader.x > start.x);
        assert!(close(chase.evader.x, -80.0 * (1.0 - 0.02)));
    }

    #[test]
    fn test_moving_pursuer_holds_evader() {
        let config = ChaseConfig::default();
        let mut chase = ChaseState::new(Tilt::LEVEL, 100.0, &config);
        let start = chase.evader;

        // Sweep the tilt so the pursuer keeps moving more than 2 px per tick
        for i in 0..60 {
            let roll = if i % 2 == 0 { 5.0 } else { -5.0 };
            chase.step(Tilt::new(0.0, roll), 16, &config);
        }
        assert_eq!(chase.evader, start);
    }

    #[test]
    fn test_closing_fraction_is_rate_independent() {
        let config = ChaseConfig::default();
        assert!(close(closing_fraction(16, &config), 0.02));
        assert_eq!(closing_fraction(0, &config), 0.0);

        let half = closing_fraction(8, &config);
        let combined = 1.0 - (1.0 - half) * (1.0 - half);
        assert!(close(combined, 0.02));
    }
}
