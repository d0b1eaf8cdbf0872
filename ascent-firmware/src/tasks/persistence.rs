//! Settings persistence task
//!
//! Writes the newest settings record to flash. Records that arrive while a
//! write is in progress replace each other; only the latest is written.

use defmt::*;

use ascent_hal_rp2040::flash::{Rp2040FlashStorage, StorageKey};
use ascent_hal_rp2040::FlashStorageTrait;

use crate::channels::SETTINGS_SAVE;

#[embassy_executor::task]
pub async fn persistence_task(mut flash: Rp2040FlashStorage<'static>) {
    info!("Persistence task started");

    loop {
        let record = SETTINGS_SAVE.wait().await;

        match flash.write(StorageKey::Settings, &record).await {
            Ok(()) => debug!("Saved {} bytes of settings to flash", record.len()),
            Err(e) => error!("Failed to save settings: {:?}", e),
        }
    }
}
