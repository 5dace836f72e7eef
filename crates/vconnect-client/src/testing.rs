//! Local stand-in for the vehicle cloud
//!
//! [`TestServer`] serves an axum router on an ephemeral loopback port and
//! hands out a [`ConnectClient`] bound to it. [`TestServer::stop`] takes the
//! service down while the client lives on, so later calls fail at the
//! transport level.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::{ConnectClient, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Mock service bound to `127.0.0.1`, stopped when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: ConnectClient,
    stop_tx: Option<oneshot::Sender<()>>,
    serving: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Serve `router` and build a client for it
    ///
    /// ```ignore
    /// let router = Router::new().route("/vehicles", get(list_vehicles));
    /// let server = TestServer::start(router).await?;
    /// let session = ConnectSession::new(&config, Arc::new(server.client.clone()), ...);
    /// ```
    pub async fn start(router: Router) -> Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let serving = tokio::spawn(async move {
            let stopped = async {
                let _ = stop_rx.await;
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(stopped)
                .await
            {
                warn!(error = %e, "Test server terminated");
            }
        });

        let client =
            ConnectClient::with_config(&format!("http://{}", addr), REQUEST_TIMEOUT, CONNECT_TIMEOUT)?;

        Ok(Self {
            addr,
            client,
            stop_tx: Some(stop_tx),
            serving: Some(serving),
        })
    }

    /// Stop serving and wait for open connections to close
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(serving) = self.serving.take() {
            let _ = serving.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(serving) = self.serving.take() {
            serving.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum::Json;
    use vconnect_core::{VehicleDescriptor, VehicleList, VehicleService};

    use super::*;

    fn listing_router() -> Router {
        Router::new().route(
            "/vehicles",
            get(|| async { Json(VehicleList::new(vec![VehicleDescriptor::new("VIN1")])) }),
        )
    }

    #[tokio::test]
    async fn test_client_reaches_server() {
        let server = TestServer::start(listing_router()).await.unwrap();

        assert!(server.addr.ip().is_loopback());
        let listing = VehicleService::list_vehicles(&server.client).await.unwrap();
        assert_eq!(listing.user_vehicles.map(|v| v.len()), Some(1));
    }

    #[tokio::test]
    async fn test_stopped_server_is_transport_failure() {
        let mut server = TestServer::start(listing_router()).await.unwrap();
        VehicleService::list_vehicles(&server.client).await.unwrap();

        server.stop().await;

        let err = VehicleService::list_vehicles(&server.client)
            .await
            .unwrap_err();
        assert!(err.is_transport(), "unexpected error: {:?}", err);
    }
}
