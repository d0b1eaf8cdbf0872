//! Configuration loading
//!
//! The face layout comes from the embedded `watchface.toml`; the user
//! settings come from flash.

pub mod loader;
pub mod settings;

pub use loader::load_face_config;
pub use settings::{log_load_status, read_stored_settings, FlashBackedStorage};
