//! Companion connection monitor
//!
//! The BLE bridge drives its connection pin high while the companion is
//! connected.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use ascent_core::state::Event;

use crate::channels::EVENT_CHANNEL;

/// Settling time after an edge
const DEBOUNCE_MS: u64 = 20;

#[embassy_executor::task]
pub async fn bluetooth_task(mut pin: Input<'static>) {
    info!("Bluetooth task started");

    let mut connected = pin.is_high();
    EVENT_CHANNEL.send(Event::Bluetooth(connected)).await;

    loop {
        pin.wait_for_any_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;

        let level = pin.is_high();
        if level != connected {
            connected = level;
            EVENT_CHANNEL.send(Event::Bluetooth(connected)).await;
        }
    }
}
