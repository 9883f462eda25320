//! Scene composition
//!
//! Draw order: bezel, needle, bearing marker, mode symbol (or the chase),
//! bubble level, readouts, secret overlay. Later commands paint over
//! earlier ones.

use catcompass_core::chase::AnimationSnapshot;
use catcompass_core::compass::BubbleLevel;
use catcompass_core::state::NorthReference;
use catcompass_core::{FaceLayout, FaceSnapshot, Rect, Vec2};

use crate::command::{DrawCommand, Frame, Glyph, TextSize};
use crate::readout::readout_lines;
use crate::style::*;

const CARDINALS: [(f32, &str); 4] = [(0.0, "N"), (90.0, "E"), (180.0, "S"), (270.0, "W")];

/// Render a snapshot into a new frame
pub fn render(snapshot: &FaceSnapshot) -> Frame {
    let Some(layout) = snapshot.layout else {
        return Frame::empty();
    };

    let mut frame = Frame::new(layout.width, layout.height);
    let instruments = snapshot.mode.shows_instruments();

    draw_bezel(&mut frame, layout.edge_radius, snapshot.bezel_deg);

    if instruments {
        draw_needle(&mut frame, &layout, snapshot);
    }

    draw_bearing_marker(&mut frame, layout.edge_radius);

    match &snapshot.animation {
        Some(animation) => draw_chase(&mut frame, animation, snapshot.north),
        None => {
            frame.hot_region = Some(draw_symbol(&mut frame, &layout, snapshot.north));
        }
    }

    if instruments {
        draw_bubble_level(&mut frame, &layout, snapshot);
        draw_readouts(&mut frame, snapshot);
    }

    if snapshot.secret_shown() {
        frame.push(DrawCommand::text(
            Vec2::new(0.0, -layout.main_radius * SECRET_OFFSET),
            SECRET_TEXT,
            SECRET_COLOR,
            TextSize::Large,
        ));
    }

    frame
}

/// Point on the dial at `angle_deg` clockwise from 12 o'clock
fn dial_point(radius: f32, angle_deg: f32) -> Vec2 {
    Vec2::new(0.0, -radius).rotated_deg(angle_deg)
}

fn draw_bezel(frame: &mut Frame, radius: f32, rotation_deg: f32) {
    for angle in (0..360u16).step_by(BEZEL_TICK_STEP_DEG as usize) {
        let inner = if angle % 90 == 0 {
            MAJOR_TICK_INNER
        } else {
            MINOR_TICK_INNER
        };
        let a = angle as f32 + rotation_deg;
        frame.push(DrawCommand::Line {
            from: dial_point(radius, a),
            to: dial_point(radius * inner, a),
            color: BEZEL_COLOR,
            width: BEZEL_WIDTH,
        });
    }

    for (angle, label) in CARDINALS {
        frame.push(DrawCommand::text(
            dial_point(radius * CARDINAL_RADIUS, angle + rotation_deg),
            label,
            BEZEL_COLOR,
            TextSize::Small,
        ));
    }
}

fn draw_needle(frame: &mut Frame, layout: &FaceLayout, snapshot: &FaceSnapshot) {
    // The dial is fixed; north sits at -heading
    let angle = -snapshot.heading_deg;
    frame.push(DrawCommand::Line {
        from: dial_point(layout.main_radius * NEEDLE_INNER, angle),
        to: dial_point(layout.main_radius * NEEDLE_OUTER, angle),
        color: needle_color(snapshot.north, snapshot.accuracy),
        width: NEEDLE_WIDTH,
    });
}

fn draw_bearing_marker(frame: &mut Frame, radius: f32) {
    let outer_y = -radius;
    let inner_y = outer_y + radius * MARKER_HEIGHT;
    let half_width = radius * MARKER_WIDTH / 2.0;
    frame.push(DrawCommand::Triangle {
        points: [
            Vec2::new(0.0, outer_y),
            Vec2::new(-half_width, inner_y),
            Vec2::new(half_width, inner_y),
        ],
        color: MARKER_COLOR,
    });
}

/// Static mode symbol; returns its touch region
fn draw_symbol(frame: &mut Frame, layout: &FaceLayout, north: NorthReference) -> Rect {
    let center = layout.symbol_center;
    frame.push(DrawCommand::Glyph {
        center,
        glyph: north_glyph(north),
        size: SYMBOL_SIZE,
        color: north_color(north),
    });
    Rect::centered(center, SYMBOL_SIZE, SYMBOL_SIZE).inflate(SYMBOL_TOUCH_PADDING)
}

fn draw_chase(frame: &mut Frame, animation: &AnimationSnapshot, north: NorthReference) {
    frame.push(DrawCommand::DashedCircle {
        center: Vec2::ZERO,
        radius: animation.radius,
        color: BOUNDARY_COLOR,
        width: BOUNDARY_WIDTH,
        dash: BOUNDARY_DASH,
    });

    if animation.sprites_visible {
        frame.push(DrawCommand::Glyph {
            center: animation.evader,
            glyph: Glyph::Mouse,
            size: SYMBOL_SIZE * 0.6,
            color: EVADER_COLOR,
        });
        frame.push(DrawCommand::Glyph {
            center: animation.pursuer,
            glyph: north_glyph(north),
            size: SYMBOL_SIZE,
            color: north_color(north),
        });
    }

    for particle in &animation.particles {
        frame.push(DrawCommand::Disc {
            center: particle.position,
            radius: PARTICLE_RADIUS,
            color: particle.color.faded(particle.life),
        });
    }
}

fn draw_bubble_level(frame: &mut Frame, layout: &FaceLayout, snapshot: &FaceSnapshot) {
    let level = BubbleLevel::for_main_radius(layout.main_radius);
    frame.push(DrawCommand::Circle {
        center: level.center,
        radius: level.radius,
        color: LEVEL_OUTLINE_COLOR,
        width: LEVEL_OUTLINE_WIDTH,
    });
    frame.push(DrawCommand::Disc {
        center: level.bubble_position(snapshot.tilt),
        radius: level.bubble_radius,
        color: BUBBLE_COLOR,
    });
}

fn draw_readouts(frame: &mut Frame, snapshot: &FaceSnapshot) {
    let lines = readout_lines(snapshot.bearing_deg, snapshot.north, snapshot.location.as_ref());
    let spacing = TextSize::Small.line_height() * READOUT_LINE_SPACING;
    let total = (lines.len() - 1) as f32 * spacing;

    let mut y = -total / 2.0;
    for line in &lines {
        frame.push(DrawCommand::text(
            Vec2::new(0.0, y),
            line,
            READOUT_COLOR,
            TextSize::Small,
        ));
        y += spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catcompass_core::chase::{AnimationPhase, Particle};
    use catcompass_core::compass::SensorAccuracy;
    use catcompass_core::state::Mode;
    use catcompass_core::{Color, Tilt};

    fn snapshot() -> FaceSnapshot {
        FaceSnapshot {
            layout: FaceLayout::for_viewport(240.0, 240.0),
            mode: Mode::Compass,
            north: NorthReference::Magnetic,
            heading_deg: 0.0,
            bezel_deg: 0.0,
            bearing_deg: 0.0,
            tilt: Tilt::LEVEL,
            accuracy: SensorAccuracy::High,
            location: None,
            animation: None,
        }
    }

    fn animation(sprites_visible: bool) -> AnimationSnapshot {
        let mut particles = heapless::Vec::new();
        let _ = particles.push(Particle {
            position: Vec2::new(5.0, 5.0),
            velocity: Vec2::ZERO,
            color: Color::YELLOW,
            life: 0.5,
        });
        AnimationSnapshot {
            phase: AnimationPhase::Bursting,
            radius: 68.04,
            pursuer: Vec2::new(10.0, 0.0),
            evader: Vec2::new(10.0, 0.0),
            captured: true,
            sprites_visible,
            burst_progress: 0.2,
            particles,
        }
    }

    fn texts(frame: &Frame) -> std::vec::Vec<&str> {
        frame
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn needles(frame: &Frame) -> std::vec::Vec<&DrawCommand> {
        frame
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { width, .. } if *width == NEEDLE_WIDTH))
            .collect()
    }

    #[test]
    fn test_no_layout_renders_nothing() {
        let mut snap = snapshot();
        snap.layout = None;
        let frame = render(&snap);
        assert!(frame.is_empty());
        assert!(frame.hot_region.is_none());
    }

    #[test]
    fn test_compass_frame_contents() {
        let frame = render(&snapshot());
        assert_eq!(frame.dropped(), 0);

        let ticks = frame
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { width, .. } if *width == BEZEL_WIDTH))
            .count();
        assert_eq!(ticks, 24);

        let texts = texts(&frame);
        for label in ["N", "E", "S", "W", "BRG 0°M", "Loc: --:--"] {
            assert!(texts.contains(&label), "missing {}", label);
        }
        assert!(!texts.contains(&SECRET_TEXT));
        assert_eq!(needles(&frame).len(), 1);
    }

    #[test]
    fn test_major_ticks_are_longer() {
        let frame = render(&snapshot());
        let DrawCommand::Line { from, to, .. } = &frame.commands()[0] else {
            panic!("first command is not a tick");
        };
        // 0° is a major tick: 10% of the edge radius
        assert!((from.distance(*to) - 12.0).abs() < 1e-3);

        let DrawCommand::Line { from, to, .. } = &frame.commands()[1] else {
            panic!("second command is not a tick");
        };
        assert!((from.distance(*to) - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_hot_region_pads_symbol() {
        let frame = render(&snapshot());
        let region = frame.hot_region.unwrap();
        let center = FaceLayout::for_viewport(240.0, 240.0).unwrap().symbol_center;
        assert!(region.contains(center));
        assert!((region.width() - (SYMBOL_SIZE + 2.0 * SYMBOL_TOUCH_PADDING)).abs() < 1e-3);
        assert!(region.contains(Vec2::new(center.x - SYMBOL_SIZE / 2.0 - 19.0, center.y)));
        assert!(!region.contains(Vec2::new(center.x - SYMBOL_SIZE / 2.0 - 21.0, center.y)));
    }

    #[test]
    fn test_needle_points_north() {
        let mut snap = snapshot();
        snap.heading_deg = 90.0;
        let frame = render(&snap);
        let needle = needles(&frame)[0];
        let DrawCommand::Line { to, color, .. } = needle else {
            unreachable!()
        };
        // Facing east, north is to the left
        assert!(to.x < -90.0);
        assert!(to.y.abs() < 1e-3);
        assert_eq!(*color, Color::RED);
    }

    #[test]
    fn test_true_north_and_dim_needle() {
        let mut snap = snapshot();
        snap.north = NorthReference::True;
        snap.accuracy = SensorAccuracy::Low;
        let frame = render(&snap);

        let needle = needles(&frame)[0];
        let DrawCommand::Line { color, .. } = needle else {
            unreachable!()
        };
        assert_eq!(*color, Color::BLUE.with_alpha(NEEDLE_DIM_ALPHA));

        assert!(frame
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Glyph { glyph: Glyph::Paw, .. })));
        assert!(texts(&frame).contains(&"BRG 0°T"));
    }

    #[test]
    fn test_secret_overlay_drawn_last() {
        let mut snap = snapshot();
        snap.mode = Mode::SecretShown;
        let frame = render(&snap);
        match frame.commands().last() {
            Some(DrawCommand::Text { text, center, color, size }) => {
                assert_eq!(text.as_str(), SECRET_TEXT);
                assert_eq!(*color, SECRET_COLOR);
                assert_eq!(*size, TextSize::Large);
                assert!((center.y + 108.0 * 0.5).abs() < 1e-3);
            }
            other => panic!("unexpected last command {:?}", other),
        }
    }

    #[test]
    fn test_easter_egg_hides_instruments() {
        let mut snap = snapshot();
        snap.mode = Mode::EasterEgg;
        snap.animation = Some(animation(true));
        let frame = render(&snap);

        assert!(frame.hot_region.is_none());
        assert!(needles(&frame).is_empty());
        assert!(!texts(&frame).iter().any(|t| t.starts_with("BRG")));
        assert!(frame
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::DashedCircle { .. })));
        assert!(frame
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Glyph { glyph: Glyph::Mouse, .. })));
        assert!(frame.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Disc { color, .. } if *color == Color::YELLOW.faded(0.5)
        )));
    }

    #[test]
    fn test_hidden_sprites_mid_burst() {
        let mut snap = snapshot();
        snap.mode = Mode::EasterEgg;
        snap.animation = Some(animation(false));
        let frame = render(&snap);
        assert!(!frame
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Glyph { .. })));
    }

    #[test]
    fn test_bubble_follows_tilt() {
        let mut snap = snapshot();
        snap.tilt = Tilt::new(0.0, 90.0);
        let frame = render(&snap);
        let bubble = frame.commands().iter().find_map(|c| match c {
            DrawCommand::Disc { center, color, .. } if *color == BUBBLE_COLOR => Some(*center),
            _ => None,
        });
        let bubble = bubble.unwrap();
        // Rolled right: bubble at the left edge of the level
        let level = BubbleLevel::for_main_radius(108.0);
        assert!(bubble.x < level.center.x);
        assert!((bubble.distance(level.center) - (level.radius - level.bubble_radius)).abs() < 1e-3);
    }
}
