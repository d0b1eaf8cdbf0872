//! Minute tick task
//!
//! Sends `Event::Tick` once per minute, aligned to the RTC minute boundary.

use ascent_core::state::Event;
use ascent_core::traits::WallClock;
use defmt::*;
use embassy_time::{Duration, Timer};

use crate::channels::EVENT_CHANNEL;
use crate::clock::SharedClock;

/// Wake this long after the boundary so the RTC has rolled over
const BOUNDARY_MARGIN_MS: u64 = 50;

/// Retry interval while the RTC is not running
const CLOCK_RETRY: Duration = Duration::from_secs(60);

#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut clock = SharedClock;
    let mut last_minute = None;

    loop {
        let Some(now) = clock.now() else {
            warn!("RTC not running, tick delayed");
            Timer::after(CLOCK_RETRY).await;
            continue;
        };

        let minute = (now.hour, now.minute);
        if last_minute == Some(minute) {
            // Woke before the rollover; sleep to the boundary
            let remaining = 60 - now.second.min(59) as u64;
            Timer::after_millis(remaining * 1000 + BOUNDARY_MARGIN_MS).await;
            continue;
        }

        if last_minute.is_some() {
            trace!("Tick {}:{}", now.hour, now.minute);
            EVENT_CHANNEL.send(Event::Tick(now)).await;
        }
        last_minute = Some(minute);

        let remaining = 60 - now.second.min(59) as u64;
        Timer::after_millis(remaining * 1000 + BOUNDARY_MARGIN_MS).await;
    }
}
