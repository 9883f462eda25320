//! Chase animation driver
//!
//! Owns the chase, the burst and the random source. The host calls
//! `on_tick` at display rate and `on_tilt_update` at sensor rate; the
//! returned events tell it when the evader was caught and when the whole
//! sequence is over.

use heapless::Vec;
use rand_core::RngCore;

use super::burst::{Particle, ParticleBurst};
use super::pursuit::ChaseState;
use crate::config::{BurstConfig, ChaseConfig, MAX_PARTICLES};
use crate::geometry::{Tilt, Vec2};

/// Burst origin: the container centre
const BURST_ORIGIN: Vec2 = Vec2::ZERO;

/// Animation phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationPhase {
    /// Not running
    Idle,
    /// Pursuer chasing the evader
    Chasing,
    /// Evader caught, fireworks playing
    Bursting,
}

/// Events reported by `on_tick` and `stop`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationEvent {
    /// Evader caught; the burst has started
    Captured,
    /// The run is over. Reported exactly once per successful `start`.
    Completed,
}

/// Per-frame view of a running animation
#[derive(Debug, Clone)]
pub struct AnimationSnapshot {
    pub phase: AnimationPhase,
    pub radius: f32,
    pub pursuer: Vec2,
    pub evader: Vec2,
    pub captured: bool,
    /// Draw pursuer and evader sprites this frame
    pub sprites_visible: bool,
    /// Burst progress in [0, 1]; 0 while chasing
    pub burst_progress: f32,
    pub particles: Vec<Particle, MAX_PARTICLES>,
}

/// Chase-and-fireworks animation
pub struct ChaseAnimation<R: RngCore> {
    chase_config: ChaseConfig,
    burst_config: BurstConfig,
    rng: R,
    tilt: Tilt,
    chase: Option<ChaseState>,
    burst: Option<ParticleBurst>,
}

impl<R: RngCore> ChaseAnimation<R> {
    pub fn new(chase_config: ChaseConfig, burst_config: BurstConfig, rng: R) -> Self {
        Self {
            chase_config,
            burst_config,
            rng,
            tilt: Tilt::LEVEL,
            chase: None,
            burst: None,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        match (&self.chase, &self.burst) {
            (None, _) => AnimationPhase::Idle,
            (Some(_), None) => AnimationPhase::Chasing,
            (Some(_), Some(_)) => AnimationPhase::Bursting,
        }
    }

    pub fn is_running(&self) -> bool {
        self.chase.is_some()
    }

    /// Start a run
    ///
    /// Returns false without changing anything if already running or if
    /// `radius` is not a positive finite number (no layout yet).
    pub fn start(&mut self, tilt: Tilt, radius: f32) -> bool {
        if self.is_running() || !(radius > 0.0) || !radius.is_finite() {
            return false;
        }

        self.tilt = tilt;
        self.chase = Some(ChaseState::new(tilt, radius, &self.chase_config));
        self.burst = None;
        true
    }

    /// Latest tilt from the sensor
    pub fn on_tilt_update(&mut self, pitch_deg: f32, roll_deg: f32) {
        self.tilt = Tilt::new(pitch_deg, roll_deg);
    }

    /// Advance by `dt_ms`
    pub fn on_tick(&mut self, dt_ms: u32) -> Option<AnimationEvent> {
        let chase = self.chase.as_mut()?;
        let captured_now = chase.step(self.tilt, dt_ms, &self.chase_config);

        if let Some(burst) = self.burst.as_mut() {
            burst.advance(dt_ms);
            if burst.is_finished() {
                return self.finish();
            }
            return None;
        }

        if captured_now {
            self.burst = Some(ParticleBurst::spawn(
                BURST_ORIGIN,
                chase.radius(),
                &self.burst_config,
                &mut self.rng,
            ));
            return Some(AnimationEvent::Captured);
        }

        if chase.elapsed_ms() >= self.chase_config.timeout_ms as u64 {
            return self.finish();
        }

        None
    }

    /// Abort the run
    ///
    /// Returns `Completed` if a run was in progress, `None` otherwise.
    pub fn stop(&mut self) -> Option<AnimationEvent> {
        if self.is_running() {
            self.finish()
        } else {
            None
        }
    }

    /// Current frame state, `None` when not running
    pub fn snapshot(&self) -> Option<AnimationSnapshot> {
        let chase = self.chase.as_ref()?;

        let (sprites_visible, burst_progress, particles): (bool, f32, Vec<Particle, MAX_PARTICLES>) =
            match &self.burst {
                Some(burst) => (
                    burst.sprites_visible(),
                    burst.progress(),
                    burst.particles().iter().copied().collect(),
                ),
                None => (true, 0.0, Vec::new()),
            };

        Some(AnimationSnapshot {
            phase: self.phase(),
            radius: chase.radius(),
            pursuer: chase.pursuer,
            evader: chase.evader,
            captured: chase.captured,
            sprites_visible,
            burst_progress,
            particles,
        })
    }

    fn finish(&mut self) -> Option<AnimationEvent> {
        self.chase = None;
        self.burst = None;
        Some(AnimationEvent::Completed)
    }
}
