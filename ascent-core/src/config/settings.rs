//! User settings
//!
//! The durable state of the watchface: the last weather report, the weather
//! service API key and the preferred date format.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Longest API key accepted (a 40-byte buffer with its terminator)
pub const MAX_API_KEY_LEN: usize = 39;

/// Bounded API key string
pub type ApiKey = String<MAX_API_KEY_LEN>;

/// Temperature shown before the first weather report
pub const DEFAULT_TEMPERATURE: i32 = 65;

/// Errors from settings validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// API key longer than `MAX_API_KEY_LEN` bytes
    ApiKeyTooLong,
}

/// Weather conditions reported by the companion
///
/// Ordinals are fixed by the companion protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Conditions {
    #[default]
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
}

impl Conditions {
    pub const ALL: [Conditions; 6] = [
        Conditions::Sunny,
        Conditions::PartlyCloudy,
        Conditions::Cloudy,
        Conditions::Rainy,
        Conditions::Snowy,
        Conditions::Stormy,
    ];

    /// Map a wire ordinal (0-5)
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Date label layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateFormat {
    /// "Wed May 30"
    #[default]
    American,
    /// "Wed 30 May"
    International,
}

impl DateFormat {
    /// Interpret the companion's flag: 1 selects American, anything else
    /// International
    pub fn from_flag(flag: i32) -> Self {
        if flag == 1 {
            DateFormat::American
        } else {
            DateFormat::International
        }
    }
}

/// Watchface settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Last reported temperature, raw companion units
    pub temperature: i32,
    /// Last reported conditions
    pub conditions: Conditions,
    /// Weather service key forwarded with every request
    pub api_key: ApiKey,
    /// Date label layout
    pub date_format: DateFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            conditions: Conditions::Sunny,
            api_key: ApiKey::new(),
            date_format: DateFormat::American,
        }
    }
}

/// Build a bounded API key without truncating
pub fn api_key_from_str(key: &str) -> Result<ApiKey, SettingsError> {
    ApiKey::try_from(key).map_err(|_| SettingsError::ApiKeyTooLong)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.temperature, 65);
        assert_eq!(settings.conditions, Conditions::Sunny);
        assert!(settings.api_key.is_empty());
        assert_eq!(settings.date_format, DateFormat::American);
    }

    #[test]
    fn test_conditions_ordinals() {
        assert_eq!(Conditions::from_ordinal(0), Some(Conditions::Sunny));
        assert_eq!(Conditions::from_ordinal(5), Some(Conditions::Stormy));
        assert_eq!(Conditions::from_ordinal(6), None);
        assert_eq!(Conditions::from_ordinal(-1), None);
        for (i, c) in Conditions::ALL.iter().enumerate() {
            assert_eq!(c.ordinal() as usize, i);
        }
    }

    #[test]
    fn test_date_format_flag() {
        assert_eq!(DateFormat::from_flag(1), DateFormat::American);
        assert_eq!(DateFormat::from_flag(0), DateFormat::International);
        assert_eq!(DateFormat::from_flag(7), DateFormat::International);
    }

    #[test]
    fn test_api_key_limit() {
        let max = "k".repeat(MAX_API_KEY_LEN);
        assert_eq!(api_key_from_str(&max).unwrap().len(), MAX_API_KEY_LEN);

        let too_long = "k".repeat(MAX_API_KEY_LEN + 1);
        assert_eq!(
            api_key_from_str(&too_long),
            Err(SettingsError::ApiKeyTooLong)
        );
    }
}
