use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::models::domain::User;

/// Process-wide authentication state: a bearer token and the user it belongs to.
///
/// Set on login or registration, cleared on logout, and rehydrated at startup
/// from whatever token the embedding application persisted.
#[derive(Default)]
pub struct AuthSession {
    token: RwLock<Option<SecretString>>,
    user: RwLock<Option<User>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: SecretString) -> Self {
        Self {
            token: RwLock::new(Some(token)),
            user: RwLock::new(None),
        }
    }

    pub async fn sign_in(&self, token: SecretString, user: User) {
        log::info!("Signed in as user {} ({:?})", user.id, user.role);
        *self.token.write().await = Some(token);
        *self.user.write().await = Some(user);
    }

    pub async fn set_token(&self, token: SecretString) {
        *self.token.write().await = Some(token);
    }

    pub async fn set_user(&self, user: User) {
        *self.user.write().await = Some(user);
    }

    pub async fn clear(&self) {
        *self.token.write().await = None;
        *self.user.write().await = None;
        log::info!("Session cleared");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Raw token for the `Authorization` header.
    pub async fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }
}
