//! Controller events and link status

pub mod events;
pub mod stats;

pub use events::{Event, LinkFailure};
pub use stats::LinkStats;
