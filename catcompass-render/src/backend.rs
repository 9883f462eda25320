//! Canvas trait
//!
//! Defines the interface a drawing backend implements. Points handed to a
//! canvas are in screen pixels (origin top-left); `replay` does the shift
//! from face-local coordinates.

use catcompass_core::{Color, Vec2};

use crate::command::{DrawCommand, Frame, Glyph, TextSize};

/// Drawing backend
///
/// Only the primitives are required. Dashed circles and glyphs have
/// default implementations built from them.
pub trait Canvas {
    type Error;

    /// Fill the whole surface
    fn clear(&mut self, color: Color) -> Result<(), Self::Error>;

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: u8) -> Result<(), Self::Error>;

    /// Circle outline
    fn circle(&mut self, center: Vec2, radius: f32, color: Color, width: u8) -> Result<(), Self::Error>;

    /// Filled circle
    fn disc(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), Self::Error>;

    /// Filled triangle
    fn triangle(&mut self, points: [Vec2; 3], color: Color) -> Result<(), Self::Error>;

    /// Text centred on `center`
    fn text(&mut self, center: Vec2, text: &str, color: Color, size: TextSize) -> Result<(), Self::Error>;

    /// Circle outline as chords of `dash` px separated by equal gaps
    fn dashed_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
        width: u8,
        dash: f32,
    ) -> Result<(), Self::Error> {
        if !(radius > 0.0) || !(dash > 0.0) {
            return Ok(());
        }

        let circumference = core::f32::consts::TAU * radius;
        let dashes = libm::floorf(circumference / (2.0 * dash)).max(1.0) as u32;
        let step = core::f32::consts::TAU / dashes as f32;
        let sweep = (dash / radius).min(step);

        for i in 0..dashes {
            let start = i as f32 * step;
            self.line(
                center + Vec2::from_polar(radius, start),
                center + Vec2::from_polar(radius, start + sweep),
                color,
                width,
            )?;
        }
        Ok(())
    }

    /// Sprite fitting a `size` box centred on `center`
    fn glyph(&mut self, center: Vec2, glyph: Glyph, size: f32, color: Color) -> Result<(), Self::Error> {
        let at = |x: f32, y: f32| center + Vec2::new(x * size, y * size);
        match glyph {
            Glyph::Cat => {
                self.disc(at(0.0, 0.1), size * 0.35, color)?;
                self.triangle([at(-0.35, 0.0), at(-0.3, -0.45), at(-0.05, -0.2)], color)?;
                self.triangle([at(0.35, 0.0), at(0.3, -0.45), at(0.05, -0.2)], color)?;
            }
            Glyph::Paw => {
                self.disc(at(0.0, 0.12), size * 0.22, color)?;
                for (x, y) in [(-0.3, -0.12), (-0.11, -0.3), (0.11, -0.3), (0.3, -0.12)] {
                    self.disc(at(x, y), size * 0.09, color)?;
                }
            }
            Glyph::Mouse => {
                self.disc(at(0.0, 0.05), size * 0.25, color)?;
                self.disc(at(-0.2, -0.2), size * 0.12, color)?;
                self.disc(at(0.2, -0.2), size * 0.12, color)?;
            }
        }
        Ok(())
    }
}

/// Draw every command of `frame` onto `canvas`, background first
pub fn replay<C: Canvas + ?Sized>(frame: &Frame, canvas: &mut C) -> Result<(), C::Error> {
    let o = frame.origin();
    canvas.clear(frame.background)?;

    for command in frame.commands() {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => canvas.line(*from + o, *to + o, *color, *width)?,
            DrawCommand::Circle {
                center,
                radius,
                color,
                width,
            } => canvas.circle(*center + o, *radius, *color, *width)?,
            DrawCommand::DashedCircle {
                center,
                radius,
                color,
                width,
                dash,
            } => canvas.dashed_circle(*center + o, *radius, *color, *width, *dash)?,
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => canvas.disc(*center + o, *radius, *color)?,
            DrawCommand::Triangle { points, color } => {
                canvas.triangle(points.map(|p| p + o), *color)?
            }
            DrawCommand::Text {
                center,
                text,
                color,
                size,
            } => canvas.text(*center + o, text, *color, *size)?,
            DrawCommand::Glyph {
                center,
                glyph,
                size,
                color,
            } => canvas.glyph(*center + o, *glyph, *size, *color)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Line(Vec2, Vec2),
        Circle,
        Disc(Vec2),
        Triangle,
        Text(std::string::String),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        fail_on_text: bool,
    }

    impl Canvas for Recorder {
        type Error = ();

        fn clear(&mut self, _color: Color) -> Result<(), ()> {
            self.ops.push(Op::Clear);
            Ok(())
        }

        fn line(&mut self, from: Vec2, to: Vec2, _color: Color, _width: u8) -> Result<(), ()> {
            self.ops.push(Op::Line(from, to));
            Ok(())
        }

        fn circle(&mut self, _c: Vec2, _r: f32, _color: Color, _width: u8) -> Result<(), ()> {
            self.ops.push(Op::Circle);
            Ok(())
        }

        fn disc(&mut self, center: Vec2, _r: f32, _color: Color) -> Result<(), ()> {
            self.ops.push(Op::Disc(center));
            Ok(())
        }

        fn triangle(&mut self, _points: [Vec2; 3], _color: Color) -> Result<(), ()> {
            self.ops.push(Op::Triangle);
            Ok(())
        }

        fn text(&mut self, _c: Vec2, text: &str, _color: Color, _size: TextSize) -> Result<(), ()> {
            if self.fail_on_text {
                return Err(());
            }
            self.ops.push(Op::Text(text.into()));
            Ok(())
        }
    }

    #[test]
    fn test_replay_shifts_to_screen() {
        let mut frame = Frame::new(240.0, 200.0);
        frame.push(DrawCommand::Disc {
            center: Vec2::ZERO,
            radius: 2.0,
            color: Color::WHITE,
        });
        frame.push(DrawCommand::text(Vec2::ZERO, "N", Color::WHITE, TextSize::Small));

        let mut canvas = Recorder::default();
        replay(&frame, &mut canvas).unwrap();
        assert_eq!(
            canvas.ops,
            [Op::Clear, Op::Disc(Vec2::new(120.0, 100.0)), Op::Text("N".into())]
        );
    }

    #[test]
    fn test_replay_stops_on_error() {
        let mut frame = Frame::new(10.0, 10.0);
        frame.push(DrawCommand::text(Vec2::ZERO, "x", Color::WHITE, TextSize::Small));
        frame.push(DrawCommand::Circle {
            center: Vec2::ZERO,
            radius: 2.0,
            color: Color::WHITE,
            width: 1,
        });

        let mut canvas = Recorder {
            fail_on_text: true,
            ..Recorder::default()
        };
        assert_eq!(replay(&frame, &mut canvas), Err(()));
        assert_eq!(canvas.ops, [Op::Clear]);
    }

    #[test]
    fn test_dashes_stay_on_circle() {
        let mut canvas = Recorder::default();
        canvas
            .dashed_circle(Vec2::new(50.0, 50.0), 40.0, Color::WHITE, 2, 10.0)
            .unwrap();

        // 2π·40 / 20 ≈ 12.6 dash periods
        assert_eq!(canvas.ops.len(), 12);
        for op in &canvas.ops {
            let Op::Line(a, b) = op else { panic!("not a line") };
            assert!((a.distance(Vec2::new(50.0, 50.0)) - 40.0).abs() < 1e-3);
            assert!((b.distance(Vec2::new(50.0, 50.0)) - 40.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_glyphs_decompose() {
        let mut canvas = Recorder::default();
        canvas.glyph(Vec2::ZERO, Glyph::Cat, 36.0, Color::RED).unwrap();
        assert_eq!(canvas.ops.iter().filter(|op| **op == Op::Triangle).count(), 2);

        let mut canvas = Recorder::default();
        canvas.glyph(Vec2::ZERO, Glyph::Paw, 36.0, Color::BLUE).unwrap();
        assert_eq!(canvas.ops.len(), 5);
    }
}
