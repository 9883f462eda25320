//! Ballistic particle burst
//!
//! Each particle launches in a random direction, falls under gravity and
//! loses speed to drag every tick. Life runs from 1 to 0 over the burst
//! duration; dead particles are dropped, so the set only ever shrinks.

use heapless::Vec;
use rand_core::RngCore;

use crate::config::{BurstConfig, MAX_PARTICLES};
use crate::geometry::{Color, Vec2};

/// Colours handed out to particles
const PALETTE: [Color; 8] = [
    Color::YELLOW,
    Color::ORANGE,
    Color::RED,
    Color::MAGENTA,
    Color::CYAN,
    Color::GREEN,
    Color::LIGHT_BLUE,
    Color::WHITE,
];

/// One firework spark
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Particle {
    pub position: Vec2,
    /// px/s
    pub velocity: Vec2,
    pub color: Color,
    /// Remaining life in [0, 1]
    pub life: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Particle set for one capture
#[derive(Debug, Clone)]
pub struct ParticleBurst {
    particles: Vec<Particle, MAX_PARTICLES>,
    elapsed_ms: u32,
    duration_ms: u32,
    gravity: f32,
    drag: f32,
}

impl ParticleBurst {
    /// Spawn `config.particle_count` particles at `origin`
    ///
    /// Launch speeds scale with `radius` so the burst fills the same share
    /// of the container on any display size.
    pub fn spawn<R: RngCore>(origin: Vec2, radius: f32, config: &BurstConfig, rng: &mut R) -> Self {
        let mut particles = Vec::new();
        let count = (config.particle_count as usize).min(MAX_PARTICLES);

        for _ in 0..count {
            let angle = unit(rng) * core::f32::consts::TAU;
            let speed = (config.min_speed + (config.max_speed - config.min_speed) * unit(rng)) * radius;
            let color = PALETTE[(rng.next_u32() as usize) % PALETTE.len()];

            // Capacity checked above
            let _ = particles.push(Particle {
                position: origin,
                velocity: Vec2::from_polar(speed, angle),
                color,
                life: 1.0,
            });
        }

        Self {
            particles,
            elapsed_ms: 0,
            duration_ms: config.duration_ms.max(1),
            gravity: config.gravity,
            drag: config.drag,
        }
    }

    /// Integrate one tick of `dt_ms`
    pub fn advance(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);

        let dt = dt_ms as f32 / 1000.0;
        let decay = dt_ms as f32 / self.duration_ms as f32;

        for p in self.particles.iter_mut() {
            p.velocity.y += self.gravity * dt;
            p.velocity = p.velocity * self.drag;
            p.position += p.velocity * dt;
            p.life = (p.life - decay).max(0.0);
        }

        self.particles.retain(|p| p.is_alive());
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Elapsed share of the burst in [0, 1]
    pub fn progress(&self) -> f32 {
        self.elapsed_ms as f32 / self.duration_ms as f32
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Sprites show for the first and last third of the burst
    pub fn sprites_visible(&self) -> bool {
        let e = self.elapsed_ms as u64 * 3;
        let d = self.duration_ms as u64;
        e < d || e > 2 * d
    }
}

/// Uniform float in [0, 1) from the top 24 bits
fn unit<R: RngCore>(rng: &mut R) -> f32 {
    (rng.next_u32() >> 8) as f32 / 16_777_216.0
}
