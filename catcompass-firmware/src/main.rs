//! Catcompass - Wearable Compass Face Firmware
//!
//! Firmware for RP2040 watch boards with a round 240x240 GC9A01 display,
//! CST816S touch and QMI8658 IMU. Runs the compass face with its bubble
//! level and the "cat level" chase easter egg.

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, SPI1};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use catcompass_core::config::FaceConfig;
use catcompass_drivers::display::{FrameBuffer, Gc9a01};

use crate::config::parse_config;

/// Embedded face configuration (compiled into firmware)
/// Edit face.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../face.toml");

/// LCD SPI clock
const LCD_SPI_HZ: u32 = 62_500_000;

/// Touch and IMU share this bus
const I2C_HZ: u32 = 400_000;

mod channels;
mod config;
mod feedback;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

type LcdBus = Mutex<CriticalSectionRawMutex, Spi<'static, SPI1, spi::Async>>;

// Static cells (must live forever for task references)
static LCD_BUS: StaticCell<LcdBus> = StaticCell::new();
static FRAME_BUFFER: ConstStaticCell<FrameBuffer> = ConstStaticCell::new(FrameBuffer::new());

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Catcompass firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_face_config();
    info!(
        "Face config: long press {}ms, double tap {}ms, {} particles",
        config.gesture.long_press_ms, config.gesture.double_tap_ms, config.burst.particle_count
    );

    // Round LCD on SPI1 (SCK=GPIO10, MOSI=GPIO11, CS=GPIO9, DC=GPIO8, RST=GPIO12)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = LCD_SPI_HZ;
    let spi = Spi::new_txonly(p.SPI1, p.PIN_10, p.PIN_11, p.DMA_CH0, spi_config);
    let bus = LCD_BUS.init(Mutex::new(spi));

    let cs = Output::new(p.PIN_9, Level::High);
    let dc = Output::new(p.PIN_8, Level::Low);
    let rst = Output::new(p.PIN_12, Level::High);
    let lcd = Gc9a01::new(SpiDevice::new(bus, cs), dc, rst);

    // Backlight stays on for the lifetime of main
    let _backlight = Output::new(p.PIN_25, Level::High);

    info!("LCD SPI initialized");

    // Touch + IMU on I2C1 (SDA=GPIO6, SCL=GPIO7), touch INT=GPIO21, RST=GPIO22
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_7, p.PIN_6, Irqs, i2c_config);

    let touch_pins = tasks::TouchPins {
        interrupt: Input::new(p.PIN_21, Pull::Up),
        reset: Output::new(p.PIN_22, Level::High),
    };

    info!("I2C initialized");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::input_task(i2c, touch_pins)).unwrap();
    spawner
        .spawn(tasks::display_task(lcd, FRAME_BUFFER.take()))
        .unwrap();
    spawner.spawn(tasks::controller_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded face.toml
///
/// build.rs already rejected invalid files, so the fallback only matters
/// if the parser and the build check disagree.
fn load_face_config() -> FaceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            FaceConfig::default()
        }
    }
}
