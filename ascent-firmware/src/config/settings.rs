//! Settings persistence
//!
//! The controller saves synchronously, but flash is async. The stored record
//! is read once at boot; afterwards reads are served from memory and writes
//! are handed to the persistence task.

use defmt::*;

use ascent_core::config::{LoadStatus, MAX_RECORD_SIZE};
use ascent_core::traits::{SettingsStorage, StorageError};
use ascent_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey};
use ascent_hal_rp2040::FlashStorageTrait;

use crate::channels::{SettingsBlob, SETTINGS_SAVE};

/// Read the stored settings record at boot
pub async fn read_stored_settings(
    flash: &mut Rp2040FlashStorage<'_>,
) -> Result<SettingsBlob, StorageError> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let len = flash
        .read(StorageKey::Settings, &mut buffer)
        .await
        .map_err(|e| match e {
            FlashError::NotFound => StorageError::NotFound,
            FlashError::BufferTooSmall => StorageError::BufferTooSmall,
            FlashError::Flash | FlashError::Storage => StorageError::Io,
        })?;

    debug!("Read {} bytes of settings from flash", len);
    SettingsBlob::from_slice(&buffer[..len]).map_err(|_| StorageError::BufferTooSmall)
}

/// Settings slot backed by flash through the persistence task
pub struct FlashBackedStorage {
    current: Result<SettingsBlob, StorageError>,
}

impl FlashBackedStorage {
    /// `boot` is the outcome of [`read_stored_settings`]
    pub fn new(boot: Result<SettingsBlob, StorageError>) -> Self {
        Self { current: boot }
    }
}

impl SettingsStorage for FlashBackedStorage {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let data = self.current.as_ref().map_err(|e| *e)?;
        let target = buffer
            .get_mut(..data.len())
            .ok_or(StorageError::BufferTooSmall)?;
        target.copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), StorageError> {
        let blob = SettingsBlob::from_slice(data).map_err(|_| StorageError::BufferTooSmall)?;
        self.current = Ok(blob.clone());
        SETTINGS_SAVE.signal(blob);
        Ok(())
    }
}

/// Report how the settings were obtained at boot
pub fn log_load_status(status: LoadStatus) {
    match status {
        LoadStatus::Restored => info!("Loaded settings from flash"),
        LoadStatus::Absent => info!("No settings in flash, using defaults"),
        LoadStatus::Rejected(e) => warn!("Stored settings rejected: {:?}, using defaults", e),
        LoadStatus::Unreadable(e) => warn!("Failed to read settings: {:?}, using defaults", e),
    }
}
