//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod battery;
pub mod bluetooth;
pub mod companion_rx;
pub mod companion_tx;
pub mod controller;
pub mod display_tx;
pub mod persistence;
pub mod tick;

pub use battery::battery_task;
pub use bluetooth::bluetooth_task;
pub use companion_rx::companion_rx_task;
pub use companion_tx::companion_tx_task;
pub use controller::controller_task;
pub use display_tx::display_tx_task;
pub use persistence::persistence_task;
pub use tick::tick_task;
