//! Compass face controller
//!
//! Ties sensor readings, the gesture disambiguator and the chase animation
//! to the display mode. All mutation goes through the methods here; the
//! renderer only ever sees an immutable `FaceSnapshot`.

use heapless::Vec;
use rand_core::RngCore;

use crate::chase::{AnimationEvent, AnimationSnapshot, ChaseAnimation};
use crate::compass::{
    normalize_degrees, rotate_bezel, AzimuthFilter, CompassReadings, LocationFix,
    SensorAccuracy,
};
use crate::config::FaceConfig;
use crate::geometry::{Tilt, Vec2};
use crate::gesture::{GestureDisambiguator, HotRegion, PointerEvent, TouchOutcome};
use crate::state::{FaceEvent, Mode, NorthReference};
use crate::traits::{Chime, HapticPattern, Haptics};

/// Cat-level container as a share of the main radius
const CAT_CONTAINER_SCALE: f32 = 0.35 * 1.8;

/// Events applied during one call
pub type AppliedEvents = Vec<FaceEvent, 4>;

/// Geometry derived from the viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceLayout {
    pub width: f32,
    pub height: f32,
    /// Half the shorter side; the bezel sits on it
    pub edge_radius: f32,
    /// Dial radius for needle, symbol and level
    pub main_radius: f32,
    /// Disc the chase runs in
    pub cat_container_radius: f32,
    /// Resting place of the mode symbol
    pub symbol_center: Vec2,
}

impl FaceLayout {
    /// Layout for a `width` x `height` viewport, `None` if either is not positive
    pub fn for_viewport(width: f32, height: f32) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return None;
        }

        let edge_radius = width.min(height) / 2.0;
        let main_radius = edge_radius * 0.9;
        Some(Self {
            width,
            height,
            edge_radius,
            main_radius,
            cat_container_radius: main_radius * CAT_CONTAINER_SCALE,
            symbol_center: Vec2::new(-main_radius * 0.6, 0.0),
        })
    }

    /// Convert a screen pixel (origin top-left) to face-local coordinates
    pub fn to_local(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x - self.width / 2.0, y - self.height / 2.0)
    }
}

/// Immutable view of the face for one frame
#[derive(Debug, Clone)]
pub struct FaceSnapshot {
    pub layout: Option<FaceLayout>,
    pub mode: Mode,
    pub north: NorthReference,
    /// Needle heading for `north`
    pub heading_deg: f32,
    pub bezel_deg: f32,
    pub bearing_deg: f32,
    pub tilt: Tilt,
    pub accuracy: SensorAccuracy,
    pub location: Option<LocationFix>,
    pub animation: Option<AnimationSnapshot>,
}

impl FaceSnapshot {
    pub fn secret_shown(&self) -> bool {
        self.mode == Mode::SecretShown
    }
}

/// The compass face
pub struct CompassFace<H: Haptics, C: Chime, R: RngCore> {
    config: FaceConfig,
    readings: CompassReadings,
    filter: AzimuthFilter,
    mode: Mode,
    north: NorthReference,
    gestures: GestureDisambiguator,
    animation: ChaseAnimation<R>,
    layout: Option<FaceLayout>,
    last_tick_ms: Option<u64>,
    haptics: H,
    chime: C,
}

impl<H: Haptics, C: Chime, R: RngCore> CompassFace<H, C, R> {
    pub fn new(config: FaceConfig, haptics: H, chime: C, rng: R) -> Self {
        Self {
            config,
            readings: CompassReadings::default(),
            filter: AzimuthFilter::new(config.heading_smoothing),
            mode: Mode::Compass,
            north: NorthReference::Magnetic,
            gestures: GestureDisambiguator::new(config.gesture),
            animation: ChaseAnimation::new(config.chase, config.burst, rng),
            layout: None,
            last_tick_ms: None,
            haptics,
            chime,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn north(&self) -> NorthReference {
        self.north
    }

    pub fn readings(&self) -> &CompassReadings {
        &self.readings
    }

    pub fn layout(&self) -> Option<FaceLayout> {
        self.layout
    }

    pub fn gestures(&self) -> &GestureDisambiguator {
        &self.gestures
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    pub fn chime(&self) -> &C {
        &self.chime
    }

    /// Earliest time `tick` has work to do, given the host clock `now_ms`
    ///
    /// A running animation needs every frame, so it reports `now_ms`.
    pub fn next_deadline(&self, now_ms: u64) -> Option<u64> {
        if self.animation.is_running() {
            Some(now_ms)
        } else {
            self.gestures.next_deadline()
        }
    }

    /// Set the display size; a zero size disables the easter egg
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.layout = FaceLayout::for_viewport(width, height);
    }

    /// New orientation sample from the sensor collaborator
    pub fn update_orientation(&mut self, azimuth_deg: f32, pitch_deg: f32, roll_deg: f32) {
        self.readings.magnetic_heading = self.filter.update(azimuth_deg);
        self.readings.tilt = Tilt::new(pitch_deg, roll_deg);
        self.animation.on_tilt_update(pitch_deg, roll_deg);
    }

    pub fn set_bezel_rotation(&mut self, bezel_deg: f32) {
        self.readings.bezel_deg = normalize_degrees(bezel_deg);
    }

    /// Rotary input, `scroll` in detents (positive = forward)
    pub fn rotate_bezel(&mut self, scroll: f32) {
        self.readings.bezel_deg =
            rotate_bezel(self.readings.bezel_deg, scroll, self.config.bezel_sensitivity);
    }

    pub fn set_location(&mut self, fix: LocationFix) {
        self.readings.location = Some(fix);
    }

    pub fn clear_location(&mut self) {
        self.readings.location = None;
    }

    pub fn set_accuracy(&mut self, accuracy: SensorAccuracy) {
        self.readings.accuracy = accuracy;
    }

    /// Feed a pointer event hit-tested against `region`
    pub fn handle_pointer<G: HotRegion + ?Sized>(
        &mut self,
        event: PointerEvent,
        region: &G,
    ) -> TouchOutcome {
        let outcome = self.gestures.handle(event, region);
        if let Some(intent) = outcome.intent {
            let mut applied = AppliedEvents::new();
            self.apply(FaceEvent::from(intent), &mut applied);
        }
        outcome
    }

    /// Advance timers and the animation to `now_ms`
    pub fn tick(&mut self, now_ms: u64) -> AppliedEvents {
        let mut applied = AppliedEvents::new();

        while let Some(intent) = self.gestures.poll(now_ms) {
            self.apply(FaceEvent::from(intent), &mut applied);
        }

        // Read after polling: a start clears the previous tick time
        let dt_ms = match self.last_tick_ms.replace(now_ms) {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };

        match self.animation.on_tick(u32::try_from(dt_ms).unwrap_or(u32::MAX)) {
            Some(AnimationEvent::Captured) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Chase: captured");
            }
            Some(AnimationEvent::Completed) => self.apply(FaceEvent::EasterEggFinished, &mut applied),
            None => {}
        }

        applied
    }

    /// End a running easter egg early (host going to background)
    pub fn stop_easter_egg(&mut self) -> AppliedEvents {
        let mut applied = AppliedEvents::new();
        if self.animation.stop() == Some(AnimationEvent::Completed) {
            self.apply(FaceEvent::EasterEggFinished, &mut applied);
        }
        applied
    }

    pub fn snapshot(&self) -> FaceSnapshot {
        FaceSnapshot {
            layout: self.layout,
            mode: self.mode,
            north: self.north,
            heading_deg: self.readings.heading(self.north),
            bezel_deg: self.readings.bezel_deg,
            bearing_deg: self.readings.bearing(),
            tilt: self.readings.tilt,
            accuracy: self.readings.accuracy,
            location: self.readings.location.clone(),
            animation: self.animation.snapshot(),
        }
    }

    /// Apply one event; state changes first, collaborators last
    fn apply(&mut self, event: FaceEvent, applied: &mut AppliedEvents) {
        match event {
            FaceEvent::Tap => {
                if !self.mode.accepts_gestures() {
                    return;
                }
                self.north = self.north.toggled();
                self.haptic(HapticPattern::VirtualKey);
            }
            FaceEvent::DoubleTap => {
                if self.mode.transition(event) != Mode::EasterEgg || !self.start_easter_egg() {
                    return;
                }
                self.mode = Mode::EasterEgg;
                self.gestures.disarm();
                self.haptic(HapticPattern::VirtualKey);
                if let Err(_e) = self.chime.play() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Chime failed: {}", _e);
                }
            }
            FaceEvent::LongPressStart => {
                let next = self.mode.transition(event);
                if next == self.mode {
                    return;
                }
                self.mode = next;
                self.haptic(HapticPattern::LongPress);
            }
            FaceEvent::LongPressEnd => {
                self.mode = self.mode.transition(event);
            }
            FaceEvent::EasterEggFinished => {
                self.mode = self.mode.transition(event);
                self.gestures.arm();
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Face event {} -> {}", event, self.mode);

        // Capacity is only exceeded by a burst of expired timers; dropping
        // the record does not undo the transition
        let _ = applied.push(event);
    }

    fn start_easter_egg(&mut self) -> bool {
        let Some(layout) = self.layout else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Easter egg: no viewport");
            return false;
        };
        if !self
            .animation
            .start(self.readings.tilt, layout.cat_container_radius)
        {
            return false;
        }
        // Idle time before the start must not count as animation time
        self.last_tick_ms = None;
        true
    }

    fn haptic(&mut self, pattern: HapticPattern) {
        if let Err(_e) = self.haptics.perform(pattern) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Haptics failed: {}", _e);
        }
    }
}
