//! Outbound companion messages

use ascent_protocol::WatchMessage;

use crate::config::settings::ApiKey;

/// Message queued for the companion
///
/// Owns its data so it can sit in the outbox while the settings change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutboundMessage {
    /// Ask the companion to fetch the weather with this key
    WeatherRequest { api_key: ApiKey },
}

impl OutboundMessage {
    pub fn weather_request(api_key: &ApiKey) -> Self {
        OutboundMessage::WeatherRequest {
            api_key: api_key.clone(),
        }
    }

    /// Borrowed wire form
    pub fn as_wire(&self) -> WatchMessage<'_> {
        match self {
            OutboundMessage::WeatherRequest { api_key } => WatchMessage::WeatherRequest {
                api_key: api_key.as_str(),
            },
        }
    }
}
