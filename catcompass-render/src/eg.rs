//! `embedded-graphics` canvas
//!
//! Draws onto any RGB565 `DrawTarget`. Colours with alpha are blended
//! against the frame background, which is good enough for the translucent
//! boundary, bubble and dimmed needle on a black face.

use catcompass_core::{Color, Vec2};
use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_6X10, FONT_7X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Triangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::backend::Canvas;
use crate::command::TextSize;

/// Canvas over a borrowed draw target
pub struct EgCanvas<'a, D> {
    target: &'a mut D,
    background: Color,
}

impl<'a, D> EgCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            background: Color::BLACK,
        }
    }

    fn color(&self, color: Color) -> Rgb565 {
        Rgb565::from(RawU16::new(color.to_rgb565_over(self.background)))
    }
}

fn point(p: Vec2) -> Point {
    Point::new(libm::roundf(p.x) as i32, libm::roundf(p.y) as i32)
}

fn diameter(radius: f32) -> u32 {
    libm::roundf(radius * 2.0).max(1.0) as u32
}

fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Small => &FONT_6X10,
        TextSize::Medium => &FONT_7X13,
        TextSize::Large => &FONT_10X20,
    }
}

impl<D> Canvas for EgCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn clear(&mut self, color: Color) -> Result<(), Self::Error> {
        self.background = color.with_alpha(0xFF);
        let fill = self.color(self.background);
        self.target.clear(fill)
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: u8) -> Result<(), Self::Error> {
        Line::new(point(from), point(to))
            .into_styled(PrimitiveStyle::with_stroke(self.color(color), width as u32))
            .draw(self.target)
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color, width: u8) -> Result<(), Self::Error> {
        Circle::with_center(point(center), diameter(radius))
            .into_styled(PrimitiveStyle::with_stroke(self.color(color), width as u32))
            .draw(self.target)
    }

    fn disc(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), Self::Error> {
        Circle::with_center(point(center), diameter(radius))
            .into_styled(PrimitiveStyle::with_fill(self.color(color)))
            .draw(self.target)
    }

    fn triangle(&mut self, points: [Vec2; 3], color: Color) -> Result<(), Self::Error> {
        Triangle::new(point(points[0]), point(points[1]), point(points[2]))
            .into_styled(PrimitiveStyle::with_fill(self.color(color)))
            .draw(self.target)
    }

    fn text(&mut self, center: Vec2, text: &str, color: Color, size: TextSize) -> Result<(), Self::Error> {
        let character_style = MonoTextStyle::new(font(size), self.color(color));
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(text, point(center), character_style, text_style)
            .draw(self.target)
            .map(|_| ())
    }
}
