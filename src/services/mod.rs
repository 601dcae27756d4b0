//! Background services.

pub mod event_broadcaster;
pub mod watchdog;

pub use event_broadcaster::EventBroadcaster;
pub use watchdog::{WatchdogConfig, start_watchdog_task};
