//! Frame tick task
//!
//! Drives the face clock: gesture timers, the chase animation and redraws
//! all advance on these ticks.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick interval in milliseconds (~60 fps)
pub const TICK_INTERVAL_MS: u64 = 16;

/// Signal to notify controller of tick, carrying uptime in milliseconds
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;

        // Same clock as the touch timestamps
        TICK_SIGNAL.signal(Instant::now().as_millis());
    }
}
