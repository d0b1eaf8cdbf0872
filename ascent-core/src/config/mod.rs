//! Configuration and settings
//!
//! Face configuration comes from a TOML file embedded at build time.
//! User settings live in a versioned record in flash.

pub mod face;
pub mod record;
pub mod settings;
pub mod store;
pub mod toml;

pub use face::{
    BatteryConfig, ClockConfig, ConfigError, FaceConfig, GaugeConfig, LayoutConfig, WeatherConfig,
};
pub use record::{RecordError, SettingsRecord, MAX_RECORD_SIZE};
pub use settings::{ApiKey, Conditions, DateFormat, Settings, SettingsError, MAX_API_KEY_LEN};
pub use store::{LoadStatus, SaveError, SettingsStore};
pub use toml::{parse_face_config, ParseError};
