//! Command implementations for vconnect

pub mod charger;
pub mod climate;
pub mod heating;
pub mod lock;
pub mod signal;
pub mod status;

pub use charger::charger;
pub use climate::climate;
pub use heating::{pre_heater, ventilation, window_heating};
pub use lock::lock;
pub use signal::{flash, honk};
pub use status::{refresh, status};
