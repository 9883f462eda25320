//! Main controller task
//!
//! Owns the compass face. Applies touch and tilt input, ticks gesture
//! timers and the animation, and publishes a snapshot per tick for the
//! display task.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::clocks::RoscRng;

use catcompass_core::compass::SensorAccuracy;
use catcompass_core::config::FaceConfig;
use catcompass_core::gesture::{PointerEvent, PointerPhase, TouchOutcome};
use catcompass_core::{CompassFace, Vec2};
use catcompass_drivers::display::{HEIGHT, WIDTH};

use crate::channels::{InputEvent, HOT_REGION, INPUT_CHANNEL, SNAPSHOT};
use crate::feedback::LogFeedback;
use crate::tasks::tick::TICK_SIGNAL;

/// Heading fed to the face; the board has no magnetometer
const FIXED_AZIMUTH_DEG: f32 = 0.0;

type Face = CompassFace<LogFeedback, LogFeedback, RoscRng>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: FaceConfig) {
    info!("Controller task started");

    let mut face: Face = CompassFace::new(config, LogFeedback, LogFeedback, RoscRng);
    face.set_viewport(WIDTH as f32, HEIGHT as f32);
    face.set_accuracy(SensorAccuracy::Unreliable);
    face.update_orientation(FIXED_AZIMUTH_DEG, 0.0, 0.0);
    SNAPSHOT.signal(face.snapshot());

    loop {
        match select(INPUT_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(InputEvent::Pointer { x, y, phase, at_ms }) => {
                let outcome = handle_pointer(&mut face, x, y, phase, at_ms);
                if let Some(intent) = outcome.intent {
                    debug!("Intent: {}", intent);
                }
            }
            Either::First(InputEvent::Tilt(tilt)) => {
                face.update_orientation(FIXED_AZIMUTH_DEG, tilt.pitch_deg, tilt.roll_deg);
            }
            Either::Second(now_ms) => {
                for event in face.tick(now_ms) {
                    debug!("Face event: {} -> {}", event, face.mode());
                }
                SNAPSHOT.signal(face.snapshot());
            }
        }
    }
}

/// Hit test against the region drawn in the last frame
fn handle_pointer(
    face: &mut Face,
    x: u16,
    y: u16,
    phase: PointerPhase,
    at_ms: u64,
) -> TouchOutcome {
    let position = match face.layout() {
        Some(layout) => layout.to_local(x as f32, y as f32),
        None => Vec2::ZERO,
    };
    let event = PointerEvent::new(position, phase, at_ms);

    match HOT_REGION.lock(|region| region.get()) {
        Some(region) => face.handle_pointer(event, &region),
        // Nothing tappable on screen (easter egg running)
        None => face.handle_pointer(event, &|_: Vec2| false),
    }
}
