//! Mock authentication
//!
//! Login only checks that both fields are filled in, waits for a simulated
//! network round trip and stores a demo token. Being "logged in" means the
//! token key is set.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::storage::{KeyValueStore, keys};

/// Token stored on successful login
pub const DEMO_TOKEN: &str = "demo-token";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter your email")]
    MissingEmail,

    #[error("Please enter your password")]
    MissingPassword,

    #[error("Login failed. Please try again.")]
    Storage(#[source] anyhow::Error),
}

/// Logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub token: String,
}

pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
    latency: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            latency: Duration::ZERO,
        }
    }

    /// Simulated network delay applied to each login
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::MissingEmail);
        }
        if password.trim().is_empty() {
            return Err(AuthError::MissingPassword);
        }

        info!("Logging in with: {}", email);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.store
            .set_item(keys::USER_TOKEN, DEMO_TOKEN)
            .await
            .map_err(AuthError::Storage)?;

        Ok(Session {
            email: email.to_string(),
            token: DEMO_TOKEN.to_string(),
        })
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store
            .remove_item(keys::USER_TOKEN)
            .await
            .map_err(AuthError::Storage)?;
        info!("Logged out");
        Ok(())
    }

    /// A stored token of any value counts as logged in
    pub async fn is_logged_in(&self) -> Result<bool, AuthError> {
        let token = self
            .store
            .get_item(keys::USER_TOKEN)
            .await
            .map_err(AuthError::Storage)?;
        Ok(token.is_some_and(|t| !t.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> (AuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (AuthService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (auth, store) = service();
        assert!(matches!(
            auth.login("  ", "secret").await,
            Err(AuthError::MissingEmail)
        ));
        assert!(matches!(
            auth.login("rick@citadel.com", "").await,
            Err(AuthError::MissingPassword)
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let (auth, store) = service();
        assert!(!auth.is_logged_in().await.unwrap());

        let session = auth.login(" morty@smith.com ", "aw-geez").await.unwrap();
        assert_eq!(session.email, "morty@smith.com");
        assert_eq!(
            store.get_item(keys::USER_TOKEN).await.unwrap().as_deref(),
            Some(DEMO_TOKEN)
        );
        assert!(auth.is_logged_in().await.unwrap());

        auth.logout().await.unwrap();
        assert!(!auth.is_logged_in().await.unwrap());
    }
}
