//! Chase-and-fireworks easter egg
//!
//! Two phases: a tilt-driven pursuer chases an evader inside a disc until
//! it gets close enough, then a particle burst plays for a fixed time.
//! Everything advances from `on_tick` with the elapsed time, so the same
//! code runs under a test clock and under the firmware ticker.

pub mod animation;
pub mod burst;
pub mod pursuit;

pub use animation::{AnimationEvent, AnimationPhase, AnimationSnapshot, ChaseAnimation};
pub use burst::{Particle, ParticleBurst};
pub use pursuit::ChaseState;
