//! Round LCD driver and frame buffer

pub mod framebuffer;
pub mod gc9a01;

pub use framebuffer::FrameBuffer;
pub use gc9a01::Gc9a01;

/// Panel width in pixels
pub const WIDTH: usize = 240;
/// Panel height in pixels
pub const HEIGHT: usize = 240;

/// Errors from the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI transfer failed
    Bus,
    /// DC or RST pin could not be driven
    Pin,
}
