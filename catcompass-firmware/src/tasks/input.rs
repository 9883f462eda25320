//! Input task
//!
//! Owns the shared I2C bus. Touch reports are read when the CST816S pulls
//! its interrupt line low; the QMI8658 is polled for tilt in between.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Duration, Instant, Ticker, Timer};

use catcompass_drivers::imu::Qmi8658;
use catcompass_drivers::touch::{ContactTracker, Cst816s};

use crate::channels::{InputEvent, INPUT_CHANNEL};

/// Tilt sampling interval
const IMU_POLL_MS: u64 = 50;

/// Touch controller control lines
pub struct TouchPins {
    pub interrupt: Input<'static>,
    pub reset: Output<'static>,
}

/// Input task - forwards touches and tilt to the controller
#[embassy_executor::task]
pub async fn input_task(mut i2c: I2c<'static, I2C1, Async>, mut touch_pins: TouchPins) {
    info!("Input task started");

    let touch = Cst816s::default();
    let imu = Qmi8658::default();

    // Reset pulse, then give the controller time to boot
    touch_pins.reset.set_low();
    Timer::after_millis(10).await;
    touch_pins.reset.set_high();
    Timer::after_millis(50).await;

    match touch.init(&mut i2c).await {
        Ok(id) => info!("CST816S ready, chip id {:#x}", id),
        Err(e) => warn!("CST816S init failed: {}", e),
    }

    let imu_ok = match imu.init(&mut i2c).await {
        Ok(()) => {
            info!("QMI8658 ready");
            true
        }
        Err(e) => {
            warn!("QMI8658 init failed, tilt disabled: {}", e);
            false
        }
    };

    let mut tracker = ContactTracker::new();
    let mut ticker = Ticker::every(Duration::from_millis(IMU_POLL_MS));

    loop {
        match select(touch_pins.interrupt.wait_for_falling_edge(), ticker.next()).await {
            Either::First(()) => {
                let at_ms = Instant::now().as_millis();
                match touch.read_report(&mut i2c).await {
                    Ok(report) => {
                        if let Some((phase, x, y)) = tracker.update(&report) {
                            trace!("Touch {} at ({}, {})", phase, x, y);
                            send(InputEvent::Pointer { x, y, phase, at_ms }).await;
                        }
                    }
                    Err(e) => {
                        warn!("Touch read failed: {}", e);
                        if let Some(phase) = tracker.cancel() {
                            send(InputEvent::Pointer {
                                x: 0,
                                y: 0,
                                phase,
                                at_ms,
                            })
                            .await;
                        }
                    }
                }
            }
            Either::Second(()) => {
                if !imu_ok {
                    continue;
                }
                match imu.read_tilt(&mut i2c).await {
                    Ok(tilt) => {
                        // Tilt is a stream; drop it rather than stall touches
                        let _ = INPUT_CHANNEL.try_send(InputEvent::Tilt(tilt));
                    }
                    Err(e) => warn!("Tilt read failed: {}", e),
                }
            }
        }
    }
}

async fn send(event: InputEvent) {
    INPUT_CHANNEL.send(event).await;
}
