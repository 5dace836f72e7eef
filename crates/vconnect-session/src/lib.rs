//! vconnect-session - Session orchestration for connected-vehicle services
//!
//! [`ConnectSession`] owns the login state of one account and drives a
//! [`VehicleService`](vconnect_core::VehicleService) on its behalf:
//!
//! - **login**: idempotent, every public operation checks it first
//! - **update**: discovers the account's vehicles once, then refreshes their
//!   data on every call with a bounded retry budget
//! - **refresh**: asks the service to pull fresh data from a vehicle, with
//!   a permanent exclusion set for vehicles that do not support it and one
//!   re-login retry on expired authorization
//! - **commands**: lock, climatisation, charger, heating, ventilation,
//!   honk/flash, all dispatched through a single primitive
//!
//! Every operation reports its outcome as a `bool`; failures are logged via
//! `tracing` and never propagated to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vconnect_session::{ConnectConfig, ConnectSession};
//!
//! let config = ConnectConfig::load("vconnect.toml")?;
//! let session = ConnectSession::new(&config, Arc::new(auth), Arc::new(service));
//!
//! if session.update(None).await {
//!     for vehicle in session.vehicles().await {
//!         println!("{}: {:?}", vehicle.vin(), vehicle.mileage());
//!     }
//! }
//! session.switch_lock("WAUZZZ8V5KA123456", true).await;
//! ```

mod command;
pub mod config;
mod connect;
mod refresh;
pub mod registry;
pub mod session;
pub mod vehicle;

#[cfg(test)]
mod mock;

pub use command::VehicleCommand;
pub use config::{ConfigError, ConnectConfig, ControlSettings};
pub use connect::ConnectSession;
pub use refresh::ExclusionSet;
pub use registry::VehicleRegistry;
pub use session::{Credentials, SessionManager, SessionState};
pub use vehicle::{FetchPolicy, Vehicle};
