use std::sync::Arc;

use secrecy::SecretString;
use validator::Validate;

use crate::{
    api::StructopiaApi,
    auth::AuthSession,
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::request::{LoginRequest, RegisterRequest},
    },
    services::{
        demo_data::{DEMO, DEMO_TOKEN, DEMO_USER_ID},
        fallback::{report_failure, DEMO_DATA_DESCRIPTION, DEMO_DATA_TITLE},
        notice::Notifier,
    },
};

pub struct AuthService {
    api: Arc<dyn StructopiaApi>,
    session: Arc<AuthSession>,
    notifier: Notifier,
}

/// Credential problems are the user's to fix; everything else means the
/// server could not answer.
fn is_rejection(err: &AppError) -> bool {
    matches!(err, AppError::Unauthorized(_) | AppError::ValidationError(_))
}

impl AuthService {
    pub fn new(api: Arc<dyn StructopiaApi>, session: Arc<AuthSession>, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<User> {
        request.validate()?;

        let user = match self.api.login(request).await {
            Ok(auth) => {
                self.session
                    .sign_in(SecretString::from(auth.token), auth.user.clone())
                    .await;
                auth.user
            }
            Err(err) if is_rejection(&err) => {
                return report_failure(&self.notifier, "Login", Err(err));
            }
            Err(err) => self.sign_in_offline(err, DEMO.user(Some(&request.email))).await,
        };

        Ok(user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        request.validate()?;

        let user = match self.api.register(request).await {
            Ok(auth) => {
                self.session
                    .sign_in(SecretString::from(auth.token), auth.user.clone())
                    .await;
                auth.user
            }
            Err(err) if is_rejection(&err) => {
                return report_failure(&self.notifier, "Registration", Err(err));
            }
            Err(err) => {
                self.sign_in_offline(err, User::from_request(DEMO_USER_ID, request))
                    .await
            }
        };

        Ok(user)
    }

    async fn sign_in_offline(&self, err: AppError, user: User) -> User {
        log::warn!("Signing in with the demo session: {}", err);
        self.notifier.destructive(DEMO_DATA_TITLE, DEMO_DATA_DESCRIPTION);
        self.session
            .sign_in(SecretString::from(DEMO_TOKEN.to_string()), user.clone())
            .await;
        user
    }

    /// The local token is dropped whatever the server says.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            log::warn!("Remote logout failed: {}", err);
        }
        self.session.clear().await;
    }

    /// Restores a persisted token and loads its user. A token the server
    /// rejects is discarded; an unreachable server yields the demo user.
    pub async fn rehydrate(&self, token: SecretString) -> Option<User> {
        self.session.set_token(token).await;

        match self.api.current_user().await {
            Ok(user) => {
                self.session.set_user(user.clone()).await;
                Some(user)
            }
            Err(AppError::Unauthorized(reason)) => {
                log::info!("Stored token rejected: {}", reason);
                self.session.clear().await;
                None
            }
            Err(err) => {
                log::warn!("Fetch current user failed, using demo user: {}", err);
                self.notifier.info(DEMO_DATA_TITLE, DEMO_DATA_DESCRIPTION);
                let user = DEMO.user(None);
                self.session.set_user(user.clone()).await;
                Some(user)
            }
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.session.current_user().await
    }
}
