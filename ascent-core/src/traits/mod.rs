//! Collaborator traits
//!
//! These traits define the interface between the watchface logic and the
//! board-specific implementations that drive the display, talk to the
//! companion, persist settings and read the wall clock.

pub mod clock;
pub mod companion;
pub mod display;
pub mod storage;

pub use clock::WallClock;
pub use companion::{CompanionLink, SendError};
pub use display::{DisplayError, WatchfaceDisplay};
pub use storage::{SettingsStorage, StorageError};
