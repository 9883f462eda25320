//! Tap / double tap / long press state machine
//!
//! States: `Idle`, `Holding`, `LongPressed`. Pointer handlers return a
//! `TouchOutcome`; timer expiry is observed through `poll`. Every timer
//! firing re-checks the phase it was scheduled under, so a firing that
//! races a cancellation is dropped rather than acted on.

use super::events::{HotRegion, Intent, PointerEvent, PointerPhase, TouchOutcome};
use crate::config::GestureConfig;
use crate::geometry::Vec2;
use crate::timer::TimerSlot;

/// Disambiguator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GesturePhase {
    /// No press on the hot region
    Idle,
    /// Pressed inside the hot region, long press not reached yet
    Holding,
    /// Long press fired, still holding
    LongPressed,
}

/// Gesture disambiguator for a single hot region
#[derive(Debug, Clone)]
pub struct GestureDisambiguator {
    config: GestureConfig,
    phase: GesturePhase,
    /// Release time of the last qualifying tap (double-tap window anchor)
    last_tap_ms: Option<u64>,
    long_press: TimerSlot,
    tap_confirm: TimerSlot,
    armed: bool,
}

impl GestureDisambiguator {
    /// Create an armed disambiguator in `Idle`
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
            last_tap_ms: None,
            long_press: TimerSlot::new(),
            tap_confirm: TimerSlot::new(),
            armed: true,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// True between a qualifying press and its resolution
    pub fn is_holding(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    /// True once the long-press timer fired for the current press
    pub fn is_long_pressed(&self) -> bool {
        self.phase == GesturePhase::LongPressed
    }

    pub fn last_tap_ms(&self) -> Option<u64> {
        self.last_tap_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.long_press.deadline(), self.tap_confirm.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Stop recognising gestures (easter egg running)
    ///
    /// Drops any press in progress and all timers without emitting intents.
    pub fn disarm(&mut self) {
        self.clear();
        self.armed = false;
    }

    /// Resume recognising gestures from a clean `Idle`
    pub fn arm(&mut self) {
        self.clear();
        self.armed = true;
    }

    /// Dispatch a pointer event by phase
    pub fn handle<R: HotRegion + ?Sized>(&mut self, event: PointerEvent, region: &R) -> TouchOutcome {
        let now = event.timestamp_ms;
        match event.phase {
            PointerPhase::Down => self.on_pointer_down(event.position, now, region),
            PointerPhase::Move => self.on_pointer_move(event.position, now, region),
            PointerPhase::Up => self.on_pointer_up(event.position, now, region),
            PointerPhase::Cancel => self.on_pointer_cancel(now),
        }
    }

    /// Pointer pressed
    pub fn on_pointer_down<R: HotRegion + ?Sized>(
        &mut self,
        point: Vec2,
        now_ms: u64,
        region: &R,
    ) -> TouchOutcome {
        if !self.armed {
            return TouchOutcome::CONSUMED;
        }

        // Any new press invalidates a pending single-tap confirmation,
        // wherever it lands
        self.tap_confirm.cancel();

        // A press still open here lost its release
        let stale = self.end_press();

        if region.contains(point) {
            self.phase = GesturePhase::Holding;
            self.long_press.schedule(now_ms, self.config.long_press_ms);
            TouchOutcome {
                consumed: true,
                intent: stale,
            }
        } else {
            self.last_tap_ms = None;
            TouchOutcome {
                consumed: stale.is_some(),
                intent: stale,
            }
        }
    }

    /// Pointer moved
    pub fn on_pointer_move<R: HotRegion + ?Sized>(
        &mut self,
        point: Vec2,
        _now_ms: u64,
        region: &R,
    ) -> TouchOutcome {
        if !self.armed {
            return TouchOutcome::CONSUMED;
        }

        match self.phase {
            GesturePhase::Idle => TouchOutcome::IGNORED,
            GesturePhase::Holding | GesturePhase::LongPressed => {
                if region.contains(point) {
                    return TouchOutcome::CONSUMED;
                }
                // Dragged off the symbol
                let ended = self.end_press();
                self.last_tap_ms = None;
                TouchOutcome {
                    consumed: true,
                    intent: ended,
                }
            }
        }
    }

    /// Pointer released
    pub fn on_pointer_up<R: HotRegion + ?Sized>(
        &mut self,
        point: Vec2,
        now_ms: u64,
        region: &R,
    ) -> TouchOutcome {
        if !self.armed {
            return TouchOutcome::CONSUMED;
        }

        match self.phase {
            GesturePhase::Idle => {
                self.last_tap_ms = None;
                TouchOutcome::IGNORED
            }
            GesturePhase::LongPressed => {
                let ended = self.end_press();
                self.last_tap_ms = None;
                TouchOutcome {
                    consumed: true,
                    intent: ended,
                }
            }
            GesturePhase::Holding => {
                self.end_press();

                if !region.contains(point) {
                    self.last_tap_ms = None;
                    return TouchOutcome::CONSUMED;
                }

                let within_window = self
                    .last_tap_ms
                    .is_some_and(|t| now_ms.saturating_sub(t) <= self.config.double_tap_ms as u64);

                if within_window {
                    self.last_tap_ms = None;
                    self.tap_confirm.cancel();
                    TouchOutcome::emit(Intent::DoubleTap)
                } else {
                    self.last_tap_ms = Some(now_ms);
                    self.tap_confirm
                        .schedule(now_ms, self.config.confirm_delay_ms());
                    TouchOutcome::CONSUMED
                }
            }
        }
    }

    /// Pointer stream cancelled by the host
    pub fn on_pointer_cancel(&mut self, _now_ms: u64) -> TouchOutcome {
        if !self.armed {
            return TouchOutcome::CONSUMED;
        }

        match self.phase {
            GesturePhase::Idle => {
                self.last_tap_ms = None;
                TouchOutcome::IGNORED
            }
            GesturePhase::Holding | GesturePhase::LongPressed => {
                let ended = self.end_press();
                self.last_tap_ms = None;
                TouchOutcome {
                    consumed: true,
                    intent: ended,
                }
            }
        }
    }

    /// Advance timers to `now_ms`
    ///
    /// Returns at most one intent per call; call again until `None` when
    /// catching up over a long gap.
    pub fn poll(&mut self, now_ms: u64) -> Option<Intent> {
        if !self.armed {
            return None;
        }

        if self.long_press.poll(now_ms) && self.phase == GesturePhase::Holding {
            self.phase = GesturePhase::LongPressed;
            return Some(Intent::LongPressStart);
        }

        if self.tap_confirm.poll(now_ms) && self.phase == GesturePhase::Idle {
            self.last_tap_ms = None;
            return Some(Intent::Tap);
        }

        None
    }

    /// Close the current press, returning `LongPressEnd` if it had fired
    fn end_press(&mut self) -> Option<Intent> {
        self.long_press.cancel();
        let was_long = self.phase == GesturePhase::LongPressed;
        self.phase = GesturePhase::Idle;
        was_long.then_some(Intent::LongPressEnd)
    }

    fn clear(&mut self) {
        self.long_press.cancel();
        self.tap_confirm.cancel();
        self.phase = GesturePhase::Idle;
        self.last_tap_ms = None;
    }
}

impl Default for GestureDisambiguator {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use proptest::prelude::*;
    use std::vec::Vec;

    const INSIDE: Vec2 = Vec2::new(-60.0, 0.0);
    const OUTSIDE: Vec2 = Vec2::new(60.0, 0.0);

    fn region() -> Rect {
        Rect::centered(INSIDE, 60.0, 60.0)
    }

    /// Feed events in order, polling every millisecond up to `until_ms`
    fn drive(gd: &mut GestureDisambiguator, events: &[PointerEvent], until_ms: u64) -> Vec<(u64, Intent)> {
        let region = region();
        let mut out = Vec::new();
        let mut pending = events.iter().peekable();
        for now in 0..=until_ms {
            while let Some(intent) = gd.poll(now) {
                out.push((now, intent));
            }
            while let Some(ev) = pending.next_if(|e| e.timestamp_ms == now) {
                if let Some(intent) = gd.handle(*ev, &region).intent {
                    out.push((now, intent));
                }
            }
        }
        out
    }

    fn count(intents: &[(u64, Intent)], which: Intent) -> usize {
        intents.iter().filter(|(_, i)| *i == which).count()
    }

    #[test]
    fn test_single_tap_confirmed_after_window() {
        let mut gd = GestureDisambiguator::default();
        let out = drive(
            &mut gd,
            &[PointerEvent::down(INSIDE, 100), PointerEvent::up(INSIDE, 200)],
            2000,
        );
        assert_eq!(out, [(550, Intent::Tap)]);
        assert_eq!(gd.last_tap_ms(), None);
    }

    #[test]
    fn test_double_tap_suppresses_single() {
        let mut gd = GestureDisambiguator::default();
        let out = drive(
            &mut gd,
            &[
                PointerEvent::down(INSIDE, 100),
                PointerEvent::up(INSIDE, 150),
                PointerEvent::down(INSIDE, 300),
                PointerEvent::up(INSIDE, 400),
            ],
            3000,
        );
        assert_eq!(out, [(400, Intent::DoubleTap)]);
    }

    #[test]
    fn test_double_tap_window_edge_is_inclusive() {
        let mut gd = GestureDisambiguator::default();
        let out = drive(
            &mut gd,
            &[
                PointerEvent::down(INSIDE, 0),
                PointerEvent::up(INSIDE, 100),
                PointerEvent::down(INSIDE, 350),
                PointerEvent::up(INSIDE, 400),
            ],
            2000,
        );
        assert_eq!(out, [(400, Intent::DoubleTap)]);
    }

    #[test]
    fn test_slow_second_tap_is_a_new_tap() {
        let mut gd = GestureDisambiguator::default();
        let out = drive(
            &mut gd,
            &[
                PointerEvent::down(INSIDE, 0),
                PointerEvent::up(INSIDE, 100),
                PointerEvent::down(INSIDE, 600),
                PointerEvent::up(INSIDE, 700),
            ],
            2000,
        );
        assert_eq!(out, [(450, Intent::Tap), (1050, Intent::Tap)]);
    }

    #[test]
    fn test_long_press_start_and_end() {
        let mut gd = GestureDisambiguator::default();
        let out = drive(
            &mut gd,
            &[PointerEvent::down(INSIDE, 0), PointerEvent::up(INSIDE, 4000)],
            6000,
        );
        assert_eq!(out, [(3000, Intent::LongPressStart), (4000, Intent::LongPressEnd)]);
        assert_eq!(gd.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_long_press_cancel_emits_end() {
        let mut gd = GestureDisambiguator::default();
        let out = drive(
            &mut gd,
            &[PointerEvent::down(INSIDE, 0), PointerEvent::cancel(3500)],
            5000,
        );
        assert_eq!(out, [(3000, Intent::LongPressStart), (3500, Intent::LongPressEnd)]);
    }

    #[test]
    fn test_drag_out_while_holding_is_silent() {
        let mut gd = GestureDisambiguator::default();
        let out = drive(
            &mut gd,
            &[
                PointerEvent::down(INSIDE, 0),
                PointerEvent::moved(OUTSIDE, 500),
                PointerEvent::up(OUTSIDE, 600),
            ],
            5000,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_drag_out_after_long_press_ends_it() {
        let mut gd = GestureDisambiguator::default();
        let out = drive(
            &mut gd,
            &[
                PointerEvent::down(INSIDE, 0),
                PointerEvent::moved(INSIDE, 3200),
                PointerEvent::moved(OUTSIDE, 3300),
            ],
            5000,
        );
        assert_eq!(out, [(3000, Intent::LongPressStart), (3300, Intent::LongPressEnd)]);
    }

    #[test]
    fn test_press_outside_not_consumed_and_clears_pending_tap() {
        let mut gd = GestureDisambiguator::default();
        let region = region();

        assert!(gd.on_pointer_down(INSIDE, 0, &region).consumed);
        assert!(gd.on_pointer_up(INSIDE, 50, &region).consumed);
        assert!(gd.next_deadline().is_some());

        let outcome = gd.on_pointer_down(OUTSIDE, 100, &region);
        assert_eq!(outcome, TouchOutcome::IGNORED);
        assert_eq!(gd.next_deadline(), None);
        assert_eq!(gd.last_tap_ms(), None);
        assert_eq!(gd.poll(10_000), None);
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut gd = GestureDisambiguator::default();
        let outcome = gd.on_pointer_cancel(10);
        assert_eq!(outcome, TouchOutcome::IGNORED);
        assert_eq!(gd.phase(), GesturePhase::Idle);
        assert_eq!(gd.next_deadline(), None);
        assert_eq!(gd.poll(100_000), None);
    }

    #[test]
    fn test_timer_after_release_does_not_fire_long_press() {
        let mut gd = GestureDisambiguator::default();
        let region = region();
        gd.on_pointer_down(INSIDE, 0, &region);
        gd.on_pointer_up(OUTSIDE, 100, &region);
        // Well past the long-press deadline
        assert_eq!(gd.poll(10_000), None);
    }

    #[test]
    fn test_lost_release_resolves_previous_press() {
        let mut gd = GestureDisambiguator::default();
        let region = region();
        gd.on_pointer_down(INSIDE, 0, &region);
        assert_eq!(gd.poll(3000), Some(Intent::LongPressStart));

        let outcome = gd.on_pointer_down(INSIDE, 3100, &region);
        assert_eq!(outcome, TouchOutcome::emit(Intent::LongPressEnd));
        assert_eq!(gd.phase(), GesturePhase::Holding);
    }

    #[test]
    fn test_disarmed_swallows_everything() {
        let mut gd = GestureDisambiguator::default();
        let region = region();
        gd.on_pointer_down(INSIDE, 0, &region);
        gd.disarm();

        assert_eq!(gd.on_pointer_up(INSIDE, 10, &region), TouchOutcome::CONSUMED);
        assert_eq!(gd.on_pointer_down(INSIDE, 20, &region), TouchOutcome::CONSUMED);
        assert_eq!(gd.poll(10_000), None);

        gd.arm();
        assert_eq!(gd.phase(), GesturePhase::Idle);
        assert!(gd.on_pointer_down(INSIDE, 20_000, &region).consumed);
    }

    #[test]
    fn test_closure_region() {
        let mut gd = GestureDisambiguator::default();
        let everywhere = |_: Vec2| true;
        assert!(gd.on_pointer_down(OUTSIDE, 0, &everywhere).consumed);
    }

    proptest! {
        #[test]
        fn prop_single_tap_fires_once(
            start in 0u64..1000,
            press in 1u64..2999,
        ) {
            let mut gd = GestureDisambiguator::default();
            let up_at = start + press;
            let out = drive(
                &mut gd,
                &[PointerEvent::down(INSIDE, start), PointerEvent::up(INSIDE, up_at)],
                up_at + 1000,
            );
            prop_assert_eq!(out, [(up_at + 350, Intent::Tap)]);
        }

        #[test]
        fn prop_second_tap_in_window_is_double(
            first_press in 1u64..200,
            gap in 1u64..150,
            second_press in 1u64..150,
        ) {
            let mut gd = GestureDisambiguator::default();
            let up1 = 10 + first_press;
            let down2 = up1 + gap;
            let up2 = down2 + second_press;
            let out = drive(
                &mut gd,
                &[
                    PointerEvent::down(INSIDE, 10),
                    PointerEvent::up(INSIDE, up1),
                    PointerEvent::down(INSIDE, down2),
                    PointerEvent::up(INSIDE, up2),
                ],
                up2 + 2000,
            );
            prop_assert_eq!(count(&out, Intent::DoubleTap), 1);
            prop_assert_eq!(count(&out, Intent::Tap), 0);
            prop_assert_eq!(out[0], (up2, Intent::DoubleTap));
        }

        #[test]
        fn prop_long_hold_fires_start_once(hold in 3000u64..8000) {
            let mut gd = GestureDisambiguator::default();
            let out = drive(
                &mut gd,
                &[PointerEvent::down(INSIDE, 0), PointerEvent::up(INSIDE, hold)],
                hold + 2000,
            );
            prop_assert_eq!(count(&out, Intent::LongPressStart), 1);
            prop_assert_eq!(count(&out, Intent::Tap), 0);
            prop_assert_eq!(count(&out, Intent::DoubleTap), 0);
            prop_assert_eq!(out[0], (3000, Intent::LongPressStart));
        }
    }
}
