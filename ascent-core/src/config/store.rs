//! Settings store
//!
//! Owns the live settings. Loading starts from defaults and overlays a
//! stored record only when it validates; anything else leaves the defaults
//! in place and reports why.

use super::record::{RecordError, SettingsRecord, MAX_RECORD_SIZE};
use super::settings::Settings;
use crate::traits::storage::{SettingsStorage, StorageError};

/// Outcome of loading settings at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadStatus {
    /// A valid record was found and applied
    Restored,
    /// Nothing stored yet; defaults in use
    Absent,
    /// A record was found but failed validation; defaults in use
    Rejected(RecordError),
    /// Storage could not be read; defaults in use
    Unreadable(StorageError),
}

/// Errors from saving settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaveError {
    /// Record could not be encoded
    Record(RecordError),
    /// Storage refused the write
    Storage(StorageError),
}

impl From<RecordError> for SaveError {
    fn from(e: RecordError) -> Self {
        SaveError::Record(e)
    }
}

impl From<StorageError> for SaveError {
    fn from(e: StorageError) -> Self {
        SaveError::Storage(e)
    }
}

/// The live settings and their persistence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsStore {
    settings: Settings,
}

impl SettingsStore {
    /// A store holding the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to defaults
    pub fn load_defaults(&mut self) {
        self.settings = Settings::default();
    }

    /// Defaults, overlaid by the stored record if it is valid
    pub fn load<S: SettingsStorage>(storage: &mut S) -> (Self, LoadStatus) {
        let mut store = Self::new();
        let status = match Self::read_record(storage) {
            Ok(record) => {
                store.settings = record.settings;
                LoadStatus::Restored
            }
            Err(status) => status,
        };
        (store, status)
    }

    fn read_record<S: SettingsStorage>(storage: &mut S) -> Result<SettingsRecord, LoadStatus> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = storage.read(&mut buffer).map_err(|e| match e {
            StorageError::NotFound => LoadStatus::Absent,
            StorageError::BufferTooSmall => LoadStatus::Rejected(RecordError::TooLarge),
            e => LoadStatus::Unreadable(e),
        })?;

        SettingsRecord::decode(&buffer[..len]).map_err(LoadStatus::Rejected)
    }

    /// Write the complete record
    pub fn save<S: SettingsStorage>(&self, storage: &mut S) -> Result<(), SaveError> {
        let record = SettingsRecord::new(self.settings.clone());
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes = record.encode(&mut buffer)?;
        storage.write(bytes)?;
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}
