use std::sync::Arc;

use crate::{
    api::{ApiClient, StructopiaApi},
    auth::AuthSession,
    config::Config,
    errors::AppResult,
    services::{AdminService, AuthService, LearningService, Notifier},
};

#[derive(Clone)]
pub struct AppState {
    pub learning_service: Arc<LearningService>,
    pub admin_service: Arc<AdminService>,
    pub auth_service: Arc<AuthService>,
    pub session: Arc<AuthSession>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the services to a reqwest client for `config.api_base_url`. A token
    /// from the environment is loaded into the session up front.
    pub fn new(config: Config, notifier: Notifier) -> AppResult<Self> {
        let session = Arc::new(match &config.api_token {
            Some(token) => AuthSession::with_token(token.clone()),
            None => AuthSession::new(),
        });
        let api: Arc<dyn StructopiaApi> = Arc::new(ApiClient::new(&config, session.clone())?);

        Ok(Self::with_api(api, session, config, notifier))
    }

    pub fn with_api(
        api: Arc<dyn StructopiaApi>,
        session: Arc<AuthSession>,
        config: Config,
        notifier: Notifier,
    ) -> Self {
        Self {
            learning_service: Arc::new(LearningService::new(api.clone(), notifier.clone())),
            admin_service: Arc::new(AdminService::new(api.clone(), notifier.clone())),
            auth_service: Arc::new(AuthService::new(api, session.clone(), notifier)),
            session,
            config: Arc::new(config),
        }
    }
}
