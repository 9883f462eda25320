//! RGB565 frame buffer
//!
//! Pixels are stored big-endian, the byte order the GC9A01 expects, so a
//! flush is one contiguous SPI write.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::{HEIGHT, WIDTH};

const BYTES: usize = WIDTH * HEIGHT * 2;

/// Full-screen frame buffer
pub struct FrameBuffer {
    data: [u8; BYTES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self { data: [0; BYTES] }
    }

    /// Raw bytes in panel order
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Raw RGB565 value at (x, y), `None` outside the panel
    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let i = (y * WIDTH + x) * 2;
        Some(u16::from_be_bytes([self.data[i], self.data[i + 1]]))
    }

    fn set(&mut self, x: usize, y: usize, raw: u16) {
        let i = (y * WIDTH + x) * 2;
        self.data[i..i + 2].copy_from_slice(&raw.to_be_bytes());
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as usize, point.y as usize);
            if x < WIDTH && y < HEIGHT {
                self.set(x, y, RawU16::from(color).into_inner());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let bytes = RawU16::from(color).into_inner().to_be_bytes();
        for chunk in self.data.chunks_exact_mut(2) {
            chunk.copy_from_slice(&bytes);
        }
        Ok(())
    }
}
