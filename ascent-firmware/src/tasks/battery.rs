//! Battery monitor task
//!
//! Samples VSYS once a minute and whenever the charger status changes, and
//! reports the battery state when it differs from the last report.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use ascent_core::config::BatteryConfig;
use ascent_core::power::{percent_from_millivolts, BatteryState};
use ascent_core::state::Event;
use ascent_hal_rp2040::adc::vsys_millivolts;

use crate::channels::EVENT_CHANNEL;

const SAMPLE_INTERVAL: Duration = Duration::from_secs(60);

#[embassy_executor::task]
pub async fn battery_task(
    mut adc: Adc<'static, Async>,
    mut vsys: Channel<'static>,
    mut charging: Input<'static>,
    config: BatteryConfig,
) {
    info!("Battery task started");

    let mut last: Option<BatteryState> = None;

    loop {
        match adc.read(&mut vsys).await {
            Ok(raw) => {
                let mv = vsys_millivolts(raw);
                let percent = percent_from_millivolts(mv, config.empty_mv, config.full_mv);
                let state = BatteryState::new(percent, charging.is_high());
                trace!("VSYS {} mV -> {}%", mv, percent);

                if last != Some(state) {
                    last = Some(state);
                    EVENT_CHANNEL.send(Event::Battery(state)).await;
                }
            }
            Err(e) => warn!("ADC read failed: {:?}", e),
        }

        select(Timer::after(SAMPLE_INTERVAL), charging.wait_for_any_edge()).await;
    }
}
