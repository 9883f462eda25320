//! GC9A01 round LCD (SPI)
//!
//! 240x240 RGB565 panel. Commands are sent with DC low, parameters and
//! pixel data with DC high. Chip select is handled by the `SpiDevice`.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

use super::framebuffer::FrameBuffer;
use super::{DisplayError, HEIGHT, WIDTH};

/// GC9A01 commands
#[allow(dead_code)]
mod cmd {
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INVERT_ON: u8 = 0x21;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const ROW_ADDR: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const TEARING_ON: u8 = 0x35;
    pub const MEMORY_ACCESS: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
    pub const INTER_ENABLE_1: u8 = 0xFE;
    pub const INTER_ENABLE_2: u8 = 0xEF;
}

/// Vendor power-on sequence: command followed by its parameters
const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (cmd::INTER_ENABLE_2, &[]),
    (0xEB, &[0x14]),
    (cmd::INTER_ENABLE_1, &[]),
    (cmd::INTER_ENABLE_2, &[]),
    (0xEB, &[0x14]),
    (0x84, &[0x40]),
    (0x85, &[0xFF]),
    (0x86, &[0xFF]),
    (0x87, &[0xFF]),
    (0x88, &[0x0A]),
    (0x89, &[0x21]),
    (0x8A, &[0x00]),
    (0x8B, &[0x80]),
    (0x8C, &[0x01]),
    (0x8D, &[0x01]),
    (0x8E, &[0xFF]),
    (0x8F, &[0xFF]),
    (0xB6, &[0x00, 0x20]),
    (cmd::MEMORY_ACCESS, &[0x08]), // BGR order
    (cmd::PIXEL_FORMAT, &[0x05]),  // 16 bit
    (0x90, &[0x08, 0x08, 0x08, 0x08]),
    (0xBD, &[0x06]),
    (0xBC, &[0x00]),
    (0xFF, &[0x60, 0x01, 0x04]),
    (0xC3, &[0x13]),
    (0xC4, &[0x13]),
    (0xC9, &[0x22]),
    (0xBE, &[0x11]),
    (0xE1, &[0x10, 0x0E]),
    (0xDF, &[0x21, 0x0C, 0x02]),
    (0xF0, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF1, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xF2, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF3, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xED, &[0x1B, 0x0B]),
    (0xAE, &[0x77]),
    (0xCD, &[0x63]),
    (0x70, &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03]),
    (0xE8, &[0x34]),
    (0x62, &[0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70]),
    (0x63, &[0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70]),
    (0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    (0x66, &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00]),
    (0x67, &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98]),
    (0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    (0x98, &[0x3E, 0x07]),
    (cmd::TEARING_ON, &[]),
    (cmd::INVERT_ON, &[]),
];

/// GC9A01 driver
pub struct Gc9a01<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
}

impl<SPI, DC, RST> Gc9a01<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Hardware reset and power-on sequence
    pub async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(10).await;
        self.rst.set_low().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(10).await;
        self.rst.set_high().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(120).await;

        for &(command, params) in INIT_SEQUENCE {
            self.command(command, params).await?;
        }

        self.command(cmd::SLEEP_OUT, &[]).await?;
        delay.delay_ms(120).await;
        self.command(cmd::DISPLAY_ON, &[]).await?;
        delay.delay_ms(20).await;

        Ok(())
    }

    /// Turn the panel on or off; RAM content is kept
    pub async fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        let command = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.command(command, &[]).await
    }

    /// Restrict the next memory write to an inclusive pixel window
    pub async fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command(cmd::COLUMN_ADDR, &[x0h, x0l, x1h, x1l]).await?;
        self.command(cmd::ROW_ADDR, &[y0h, y0l, y1h, y1l]).await
    }

    /// Send the whole frame buffer
    pub async fn flush(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        self.set_window(0, 0, WIDTH as u16 - 1, HEIGHT as u16 - 1)
            .await?;
        self.command(cmd::MEMORY_WRITE, &[]).await?;
        self.data(frame.as_bytes()).await
    }

    async fn command(&mut self, command: u8, params: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Pin)?;
        self.spi
            .write(&[command])
            .await
            .map_err(|_| DisplayError::Bus)?;

        if params.is_empty() {
            return Ok(());
        }
        self.data(params).await
    }

    async fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::Pin)?;
        self.spi.write(bytes).await.map_err(|_| DisplayError::Bus)
    }
}
