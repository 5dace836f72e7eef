//! vconnect REST client
//!
//! A typed HTTP client for a connected-vehicle REST service. [`ConnectClient`]
//! implements both [`Authenticator`](vconnect_core::Authenticator) and
//! [`VehicleService`](vconnect_core::VehicleService), so one instance (and its
//! bearer token) serves a whole [`ConnectSession`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vconnect_client::ConnectClient;
//! use vconnect_session::{ConnectConfig, ConnectSession};
//!
//! let client = Arc::new(ConnectClient::new("https://api.example.com")?.with_spin("1234"));
//! let session = ConnectSession::new(&config, client.clone(), client);
//! session.update(None).await;
//! ```
//!
//! # Testing
//!
//! The `testing` module starts an axum router on an ephemeral port:
//!
//! ```rust,ignore
//! use vconnect_client::testing::TestServer;
//!
//! let server = TestServer::start(router).await?;
//! let vehicles = server.client.list_vehicles().await?;
//! ```

mod client;
mod error;
mod service;
pub mod testing;
mod types;

pub use client::ConnectClient;
pub use error::{ClientError, Result};
pub use types::*;

// Re-export core types for convenience
pub use vconnect_core::{HeaterSource, HonkFlashMode, VehicleDescriptor, VehicleList};
