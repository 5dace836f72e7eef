//! Account login state

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use vconnect_core::Authenticator;

/// Login state of the account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Account credentials handed to the [`Authenticator`]
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub country: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            country: country.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("country", &self.country)
            .finish()
    }
}

/// Tracks whether the account is logged in and performs idempotent login.
///
/// Callers mark the session as expired with [`invalidate`](Self::invalidate);
/// the next [`ensure_logged_in`](Self::ensure_logged_in) then authenticates
/// again. Concurrent callers share a single login attempt.
pub struct SessionManager {
    authenticator: Arc<dyn Authenticator>,
    credentials: Credentials,
    state: RwLock<SessionState>,
    login_lock: Mutex<()>,
}

impl SessionManager {
    pub fn new(authenticator: Arc<dyn Authenticator>, credentials: Credentials) -> Self {
        Self {
            authenticator,
            credentials,
            state: RwLock::new(SessionState::Unauthenticated),
            login_lock: Mutex::new(()),
        }
    }

    /// Get the current session state
    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Make sure the account is logged in.
    ///
    /// Returns `true` immediately when already authenticated; otherwise calls
    /// the authenticator once and records the result.
    pub async fn ensure_logged_in(&self) -> bool {
        if self.is_authenticated() {
            return true;
        }

        let _guard = self.login_lock.lock().await;
        // Another caller may have logged in while we waited
        if self.is_authenticated() {
            return true;
        }

        let Credentials {
            username,
            password,
            country,
        } = &self.credentials;

        match self
            .authenticator
            .authenticate(username, password, country)
            .await
        {
            Ok(true) => {
                *self.state.write() = SessionState::Authenticated;
                info!(username = %username, "Logged in");
                true
            }
            Ok(false) => {
                warn!(username = %username, "Login rejected");
                false
            }
            Err(e) => {
                error!(username = %username, error = %e, "Login failed");
                false
            }
        }
    }

    /// Force re-authentication on next use
    pub fn invalidate(&self) {
        let mut state = self.state.write();
        if *state == SessionState::Authenticated {
            debug!("Session invalidated, next call will log in again");
        }
        *state = SessionState::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAuthenticator;
    use vconnect_core::ServiceError;

    fn manager(auth: &Arc<MockAuthenticator>) -> SessionManager {
        SessionManager::new(auth.clone(), Credentials::new("user", "pass", "DE"))
    }

    #[tokio::test]
    async fn test_login_is_idempotent() {
        let auth = Arc::new(MockAuthenticator::new());
        let session = manager(&auth);

        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(session.ensure_logged_in().await);
        assert!(session.ensure_logged_in().await);
        assert!(session.ensure_logged_in().await);

        assert_eq!(auth.calls(), 1);
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_login_passes_credentials() {
        let auth = Arc::new(MockAuthenticator::new());
        let session = manager(&auth);

        session.ensure_logged_in().await;
        assert_eq!(
            auth.last_credentials(),
            Some(("user".to_string(), "pass".to_string(), "DE".to_string()))
        );
    }

    #[tokio::test]
    async fn test_rejected_login_stays_unauthenticated() {
        let auth = Arc::new(MockAuthenticator::new());
        auth.push_result(Ok(false));
        let session = manager(&auth);

        assert!(!session.ensure_logged_in().await);
        assert!(!session.is_authenticated());

        // Next call tries again
        assert!(session.ensure_logged_in().await);
        assert_eq!(auth.calls(), 2);
    }

    #[tokio::test]
    async fn test_login_error_counts_as_failure() {
        let auth = Arc::new(MockAuthenticator::new());
        auth.push_result(Err(ServiceError::transport("connection refused")));
        let session = manager(&auth);

        assert!(!session.ensure_logged_in().await);
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_login() {
        let auth = Arc::new(MockAuthenticator::new());
        let session = manager(&auth);

        assert!(session.ensure_logged_in().await);
        session.invalidate();
        assert!(!session.is_authenticated());
        assert!(session.ensure_logged_in().await);
        assert_eq!(auth.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_logins_share_one_attempt() {
        let auth = Arc::new(MockAuthenticator::new());
        let session = Arc::new(manager(&auth));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                tokio::spawn(async move { session.ensure_logged_in().await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(auth.calls(), 1);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("user", "hunter2", "DE");
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
