//! Main controller task
//!
//! Owns the watchface. Receives every event from `EVENT_CHANNEL`, applies
//! it, and logs what the watchface reports back.

use defmt::*;

use ascent_core::config::FaceConfig;
use ascent_core::state::{Event, LinkStats};
use ascent_core::{Watchface, WatchfaceError};

use crate::channels::EVENT_CHANNEL;
use crate::clock::SharedClock;
use crate::config::{log_load_status, FlashBackedStorage};
use crate::display::FrameDisplay;
use crate::link::OutboxLink;

/// Controller task - main event loop
#[embassy_executor::task]
pub async fn controller_task(config: FaceConfig, storage: FlashBackedStorage) {
    info!("Controller task started");

    let (mut face, status) =
        Watchface::new(&config, FrameDisplay::new(), OutboxLink, storage, SharedClock);
    log_load_status(status);

    if let Err(e) = face.start() {
        report(e);
    }
    info!("Face drawn");

    loop {
        let event = EVENT_CHANNEL.receive().await;
        trace!("Event: {:?}", event);

        match &event {
            Event::Message(batch) => debug!("Companion message, {} updates", batch.len()),
            Event::OutboxFailed(failure) => warn!("Weather request failed: {:?}", failure),
            Event::InboxDropped(failure) => warn!("Companion message dropped: {:?}", failure),
            Event::Battery(state) => debug!("Battery {}% charging={}", state.percent, state.charging),
            Event::Bluetooth(connected) => info!("Companion connected: {}", connected),
            _ => {}
        }

        let link_event = event.is_link_event();
        let dropped_before = face.stats().requests_dropped;

        if let Err(e) = face.handle(event) {
            report(e);
        }

        if face.stats().requests_dropped != dropped_before {
            warn!("Outbox busy, weather request dropped");
        }
        if link_event {
            log_stats(face.stats());
        }
    }
}

fn report(error: WatchfaceError) {
    match error {
        WatchfaceError::Display(e) => warn!("Display update incomplete: {:?}", e),
        WatchfaceError::Save(e) => error!("Settings not saved: {:?}", e),
    }
}

fn log_stats(stats: &LinkStats) {
    debug!(
        "Link: sent={} failed={} dropped_in={} dropped_req={} applied={}",
        stats.sent,
        stats.failed,
        stats.inbound_dropped,
        stats.requests_dropped,
        stats.applied
    );
}
