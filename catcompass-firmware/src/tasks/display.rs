//! Display task
//!
//! Renders the latest face snapshot into the frame buffer and pushes it to
//! the GC9A01. Snapshots that arrive while a flush is running are
//! coalesced into the next frame.

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Async, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Delay;

use catcompass_drivers::display::{FrameBuffer, Gc9a01};
use catcompass_render::eg::EgCanvas;
use catcompass_render::{render, replay};

use crate::channels::{HOT_REGION, SNAPSHOT};

/// LCD on SPI1 with GPIO chip select
pub type Lcd = Gc9a01<
    SpiDevice<'static, CriticalSectionRawMutex, Spi<'static, SPI1, Async>, Output<'static>>,
    Output<'static>,
    Output<'static>,
>;

/// Display task - draws every snapshot the controller publishes
#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd, frame_buffer: &'static mut FrameBuffer) {
    info!("Display task started");

    if let Err(e) = lcd.init(&mut Delay).await {
        error!("GC9A01 init failed: {}", e);
        return;
    }
    info!("GC9A01 ready");

    loop {
        let snapshot = SNAPSHOT.wait().await;
        let frame = render(&snapshot);

        HOT_REGION.lock(|region| region.set(frame.hot_region));
        if frame.dropped() > 0 {
            warn!("Frame dropped {} draw commands", frame.dropped());
        }

        // Drawing into RAM cannot fail
        let _ = replay(&frame, &mut EgCanvas::new(frame_buffer));

        if let Err(e) = lcd.flush(frame_buffer).await {
            warn!("LCD flush failed: {}", e);
        }
    }
}
