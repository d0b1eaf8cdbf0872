//! Face configuration loading
//!
//! Parses the embedded `watchface.toml`. The build script has already
//! checked it, so a failure here means the core parser and the build-time
//! checks disagree; the built-in face is used instead.

use defmt::*;

use ascent_core::config::{parse_face_config, ConfigError, FaceConfig, ParseError};

/// Embedded face configuration (compiled into firmware)
/// Edit watchface.toml and rebuild to customize
const EMBEDDED_FACE_CONFIG: &str = include_str!("../../watchface.toml");

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum LoadError {
    Parse(ParseError),
    Invalid(ConfigError),
}

/// Load the face configuration, falling back to the built-in face
pub fn load_face_config() -> FaceConfig {
    match load_face_config_inner() {
        Ok(config) => {
            info!(
                "Face config: {}x{}, gauge {}..{}, weather every {} min",
                config.layout.screen_width,
                config.layout.screen_height,
                config.gauge.min(),
                config.gauge.max(),
                config.weather.check_rate_min
            );
            config
        }
        Err(e) => {
            error!("Embedded face config unusable: {:?}", e);
            error!("Using built-in face");
            FaceConfig::default()
        }
    }
}

fn load_face_config_inner() -> Result<FaceConfig, LoadError> {
    let config = parse_face_config(EMBEDDED_FACE_CONFIG).map_err(LoadError::Parse)?;
    config.validate().map_err(LoadError::Invalid)?;
    Ok(config)
}
