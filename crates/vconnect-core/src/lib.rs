//! vconnect-core - Core traits and types for connected-vehicle sessions
//!
//! This crate provides the collaborator abstractions consumed by the session
//! orchestrator: an [`Authenticator`] that establishes account credentials and
//! a [`VehicleService`] exposing the remote vehicle listing, data and command
//! surface. Concrete transports (REST, mocks) implement these traits.

pub mod error;
pub mod models;
pub mod service;

pub use error::{FailureKind, ServiceError, ServiceResult};
pub use models::*;
pub use service::{Authenticator, VehicleService};
