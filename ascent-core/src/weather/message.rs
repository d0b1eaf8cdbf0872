//! Inbound companion messages
//!
//! An app message is decoded once, at the boundary, into the updates it
//! carries. The batch is ordered the way updates are applied: API key
//! first, then the weather report (or a poke asking the watch to fetch
//! one), then the date format.

use ascent_protocol::dictionary::{keys, Dictionary, DictionaryError, Tuple};
use heapless::Vec;

use crate::config::settings::{api_key_from_str, ApiKey, Conditions, DateFormat};

/// Most updates a single app message can carry
pub const MAX_BATCH_LEN: usize = 3;

/// Updates carried by one app message, in application order
pub type InboundBatch = Vec<InboundMessage, MAX_BATCH_LEN>;

/// Reasons an app message is dropped as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Malformed tuple encoding
    Dictionary(DictionaryError),
    /// Known key carrying the wrong value type
    WrongType { key: u8 },
    /// Conditions ordinal outside 0-5
    InvalidConditions(i32),
    /// API key does not fit
    ApiKeyTooLong,
}

impl From<DictionaryError> for MessageError {
    fn from(e: DictionaryError) -> Self {
        MessageError::Dictionary(e)
    }
}

/// A single decoded update
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InboundMessage {
    /// New weather service key
    ApiKeyUpdate(ApiKey),
    /// Complete weather report
    WeatherUpdate {
        temperature: i32,
        conditions: Conditions,
    },
    /// Settings-only push, partial report or empty poke: ask for weather
    SettingsPoke,
    /// New date label layout
    DateFormatUpdate(DateFormat),
}

/// Decode an app message dictionary
///
/// Unknown keys are ignored. When a key repeats, its first occurrence wins.
pub fn decode(dictionary: &Dictionary<'_>) -> Result<InboundBatch, MessageError> {
    let mut temperature = None;
    let mut conditions = None;
    let mut api_key = None;
    let mut american_date = None;

    for tuple in dictionary.iter() {
        let tuple = tuple?;
        match tuple.key {
            keys::TEMPERATURE if temperature.is_none() => {
                temperature = Some(int_value(&tuple)?);
            }
            keys::CONDITIONS if conditions.is_none() => {
                let ordinal = int_value(&tuple)?;
                let value = Conditions::from_ordinal(ordinal)
                    .ok_or(MessageError::InvalidConditions(ordinal))?;
                conditions = Some(value);
            }
            keys::API_KEY if api_key.is_none() => {
                let s = tuple
                    .value
                    .as_str()
                    .ok_or(MessageError::WrongType { key: tuple.key })?;
                api_key = Some(api_key_from_str(s).map_err(|_| MessageError::ApiKeyTooLong)?);
            }
            keys::AMERICAN_DATE if american_date.is_none() => {
                american_date = Some(int_value(&tuple)?);
            }
            _ => {}
        }
    }

    let mut batch = InboundBatch::new();

    // Pushes cannot fail: at most one entry per step and MAX_BATCH_LEN steps
    if let Some(key) = api_key {
        let _ = batch.push(InboundMessage::ApiKeyUpdate(key));
    }

    let weather = match (temperature, conditions) {
        (Some(temperature), Some(conditions)) => InboundMessage::WeatherUpdate {
            temperature,
            conditions,
        },
        _ => InboundMessage::SettingsPoke,
    };
    let _ = batch.push(weather);

    if let Some(flag) = american_date {
        let _ = batch.push(InboundMessage::DateFormatUpdate(DateFormat::from_flag(flag)));
    }

    Ok(batch)
}

fn int_value(tuple: &Tuple<'_>) -> Result<i32, MessageError> {
    tuple
        .value
        .as_int()
        .ok_or(MessageError::WrongType { key: tuple.key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascent_protocol::DictionaryWriter;

    fn decode_bytes(bytes: &[u8]) -> Result<InboundBatch, MessageError> {
        decode(&Dictionary::new(bytes))
    }

    #[test]
    fn test_weather_report() {
        let mut dict = DictionaryWriter::<64>::new();
        dict.push_int(keys::TEMPERATURE, 72).unwrap();
        dict.push_int(keys::CONDITIONS, 2).unwrap();

        let batch = decode_bytes(dict.as_bytes()).unwrap();
        assert_eq!(
            batch.as_slice(),
            &[InboundMessage::WeatherUpdate {
                temperature: 72,
                conditions: Conditions::Cloudy
            }]
        );
    }

    #[test]
    fn test_full_message_order() {
        let mut dict = DictionaryWriter::<64>::new();
        // Wire order does not matter
        dict.push_int(keys::AMERICAN_DATE, 0).unwrap();
        dict.push_int(keys::CONDITIONS, 5).unwrap();
        dict.push_str(keys::API_KEY, "abc").unwrap();
        dict.push_int(keys::TEMPERATURE, -10).unwrap();

        let batch = decode_bytes(dict.as_bytes()).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(
            batch[0],
            InboundMessage::ApiKeyUpdate(api_key_from_str("abc").unwrap())
        );
        assert_eq!(
            batch[1],
            InboundMessage::WeatherUpdate {
                temperature: -10,
                conditions: Conditions::Stormy
            }
        );
        assert_eq!(
            batch[2],
            InboundMessage::DateFormatUpdate(DateFormat::International)
        );
    }

    #[test]
    fn test_settings_push_becomes_poke() {
        let mut dict = DictionaryWriter::<64>::new();
        dict.push_str(keys::API_KEY, "key").unwrap();
        dict.push_int(keys::AMERICAN_DATE, 1).unwrap();

        let batch = decode_bytes(dict.as_bytes()).unwrap();
        assert_eq!(batch[1], InboundMessage::SettingsPoke);
        assert_eq!(
            batch[2],
            InboundMessage::DateFormatUpdate(DateFormat::American)
        );
    }

    #[test]
    fn test_partial_weather_becomes_poke() {
        let mut dict = DictionaryWriter::<64>::new();
        dict.push_int(keys::TEMPERATURE, 50).unwrap();

        let batch = decode_bytes(dict.as_bytes()).unwrap();
        assert_eq!(batch.as_slice(), &[InboundMessage::SettingsPoke]);
    }

    #[test]
    fn test_empty_message_is_poke() {
        let batch = decode_bytes(&[]).unwrap();
        assert_eq!(batch.as_slice(), &[InboundMessage::SettingsPoke]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut dict = DictionaryWriter::<64>::new();
        dict.push_int(42, 7).unwrap();
        dict.push_str(43, "x").unwrap();

        let batch = decode_bytes(dict.as_bytes()).unwrap();
        assert_eq!(batch.as_slice(), &[InboundMessage::SettingsPoke]);
    }

    #[test]
    fn test_conditions_out_of_range() {
        let mut dict = DictionaryWriter::<64>::new();
        dict.push_int(keys::TEMPERATURE, 50).unwrap();
        dict.push_int(keys::CONDITIONS, 6).unwrap();

        assert_eq!(
            decode_bytes(dict.as_bytes()),
            Err(MessageError::InvalidConditions(6))
        );
    }

    #[test]
    fn test_wrong_type() {
        let mut dict = DictionaryWriter::<64>::new();
        dict.push_str(keys::TEMPERATURE, "hot").unwrap();
        assert_eq!(
            decode_bytes(dict.as_bytes()),
            Err(MessageError::WrongType {
                key: keys::TEMPERATURE
            })
        );

        let mut dict = DictionaryWriter::<64>::new();
        dict.push_int(keys::API_KEY, 1).unwrap();
        assert_eq!(
            decode_bytes(dict.as_bytes()),
            Err(MessageError::WrongType { key: keys::API_KEY })
        );
    }

    #[test]
    fn test_api_key_too_long() {
        let mut dict = DictionaryWriter::<64>::new();
        dict.push_str(keys::API_KEY, &"k".repeat(40)).unwrap();
        assert_eq!(
            decode_bytes(dict.as_bytes()),
            Err(MessageError::ApiKeyTooLong)
        );
    }

    #[test]
    fn test_malformed_dictionary() {
        assert_eq!(
            decode_bytes(&[keys::TEMPERATURE, 1, 4, 0]),
            Err(MessageError::Dictionary(DictionaryError::Truncated))
        );
    }
}
