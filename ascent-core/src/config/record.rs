//! Persisted settings record
//!
//! Settings are wrapped with a magic number, a format version and a CRC32
//! before being serialized to flash with postcard.

use serde::{Deserialize, Serialize};

use super::settings::Settings;

/// Magic number identifying a settings record
pub const SETTINGS_MAGIC: u32 = 0x4153_4353; // "ASCS"

/// Current record format version
pub const SETTINGS_VERSION: u8 = 1;

/// Largest serialized record accepted
pub const MAX_RECORD_SIZE: usize = 96;

/// Reasons a record cannot be written or accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Serialized record does not fit in `MAX_RECORD_SIZE`
    TooLarge,
    /// Stored bytes do not deserialize
    Deserialize,
    /// Magic number mismatch
    BadMagic,
    /// Record written by another format version
    VersionMismatch(u8),
    /// CRC check failed
    CrcMismatch,
}

/// Settings as stored in flash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsRecord {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// The settings themselves
    pub settings: Settings,
    /// CRC32 over magic, version and settings
    pub crc: u32,
}

impl SettingsRecord {
    /// Wrap settings in a record with a valid header and CRC
    pub fn new(settings: Settings) -> Self {
        let mut record = Self {
            magic: SETTINGS_MAGIC,
            version: SETTINGS_VERSION,
            settings,
            crc: 0,
        };
        record.update_crc();
        record
    }

    /// Calculate CRC32 for the record (excluding the crc field itself)
    pub fn calculate_crc(&self) -> u32 {
        let s = &self.settings;
        let mut crc: u32 = 0xFFFF_FFFF;

        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        crc = crc32_update(crc, &s.temperature.to_le_bytes());
        crc = crc32_update(crc, &[s.conditions.ordinal()]);
        crc = crc32_update(crc, &[s.api_key.len() as u8]);
        crc = crc32_update(crc, s.api_key.as_bytes());
        crc = crc32_update(crc, &[s.date_format as u8]);

        !crc
    }

    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Serialize into `buffer`, returning the used prefix
    pub fn encode<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], RecordError> {
        let limit = buffer.len().min(MAX_RECORD_SIZE);
        postcard::to_slice(self, &mut buffer[..limit]).map_err(|_| RecordError::TooLarge)
    }

    /// Deserialize and validate a stored record
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() > MAX_RECORD_SIZE {
            return Err(RecordError::TooLarge);
        }

        let record: SettingsRecord =
            postcard::from_bytes(bytes).map_err(|_| RecordError::Deserialize)?;

        if record.magic != SETTINGS_MAGIC {
            return Err(RecordError::BadMagic);
        }
        if record.version != SETTINGS_VERSION {
            return Err(RecordError::VersionMismatch(record.version));
        }
        if !record.verify_crc() {
            return Err(RecordError::CrcMismatch);
        }

        Ok(record)
    }
}

/// CRC32 update (IEEE 802.3 polynomial, reflected)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{api_key_from_str, Conditions, DateFormat};
    use proptest::prelude::*;

    fn sample() -> Settings {
        Settings {
            temperature: 81,
            conditions: Conditions::Rainy,
            api_key: api_key_from_str("0123456789abcdef").unwrap(),
            date_format: DateFormat::International,
        }
    }

    #[test]
    fn test_crc32_check_value() {
        assert_eq!(!crc32_update(0xFFFF_FFFF, b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_encode_decode() {
        let record = SettingsRecord::new(sample());
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes = record.encode(&mut buffer).unwrap();

        let decoded = SettingsRecord::decode(bytes).unwrap();
        assert_eq!(decoded.settings, sample());
    }

    #[test]
    fn test_crc_detects_change() {
        let mut record = SettingsRecord::new(sample());
        assert!(record.verify_crc());

        record.settings.temperature = 20;
        assert!(!record.verify_crc());

        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes = record.encode(&mut buffer).unwrap();
        assert_eq!(SettingsRecord::decode(bytes), Err(RecordError::CrcMismatch));
    }

    #[test]
    fn test_bad_magic() {
        let mut record = SettingsRecord::new(sample());
        record.magic = 0x5049_4443;
        record.update_crc();

        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes = record.encode(&mut buffer).unwrap();
        assert_eq!(SettingsRecord::decode(bytes), Err(RecordError::BadMagic));
    }

    #[test]
    fn test_version_mismatch() {
        let mut record = SettingsRecord::new(sample());
        record.version = 2;
        record.update_crc();

        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes = record.encode(&mut buffer).unwrap();
        assert_eq!(
            SettingsRecord::decode(bytes),
            Err(RecordError::VersionMismatch(2))
        );
    }

    #[test]
    fn test_garbage_does_not_decode() {
        assert_eq!(
            SettingsRecord::decode(&[0xFF; 8]),
            Err(RecordError::Deserialize)
        );
        assert_eq!(SettingsRecord::decode(&[]), Err(RecordError::Deserialize));
    }

    #[test]
    fn test_buffer_too_small() {
        let record = SettingsRecord::new(sample());
        let mut buffer = [0u8; 8];
        assert_eq!(record.encode(&mut buffer), Err(RecordError::TooLarge));
    }

    proptest! {
        #[test]
        fn prop_settings_survive_storage(
            temperature in any::<i32>(),
            conditions in 0i32..6,
            key in "[a-zA-Z0-9]{0,39}",
            american in any::<bool>(),
        ) {
            let settings = Settings {
                temperature,
                conditions: Conditions::from_ordinal(conditions).unwrap(),
                api_key: api_key_from_str(&key).unwrap(),
                date_format: if american { DateFormat::American } else { DateFormat::International },
            };

            let mut buffer = [0u8; MAX_RECORD_SIZE];
            let bytes = SettingsRecord::new(settings.clone()).encode(&mut buffer).unwrap();
            prop_assert!(bytes.len() <= MAX_RECORD_SIZE);
            prop_assert_eq!(SettingsRecord::decode(bytes).unwrap().settings, settings);
        }
    }
}
