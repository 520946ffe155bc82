use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::StructopiaApi;
use crate::auth::AuthSession;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{
    AdminStats, Badge, LeaderboardEntry, Level, Material, Quiz, QuizResult, User, UserProgress,
};
use crate::models::dto::request::{
    CreateLevelRequest, CreateMaterialRequest, CreateQuizRequest, LoginRequest,
    PaginationParams, RegisterRequest, SubmitAnswersRequest, UpdateLevelRequest,
    UpdateMaterialRequest, UpdateQuizRequest,
};
use crate::models::dto::response::{ApiResponse, AuthResponse, MessageResponse, Paginated};

/// Some endpoints (`/user`) answer without the `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeEnveloped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    fn into_inner(self) -> T {
        match self {
            MaybeEnveloped::Wrapped { data } => data,
            MaybeEnveloped::Bare(data) => data,
        }
    }
}

/// reqwest-backed client for the Structopia REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<AuthSession>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<AuthSession>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(endpoint))
            .header(ACCEPT, "application/json");

        match self.session.bearer().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        builder: RequestBuilder,
    ) -> AppResult<T> {
        let response = builder.send().await.map_err(|e| {
            log::error!("Error fetching {}: {}", endpoint, e);
            AppError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Error fetching {}: API error {}", endpoint, status);
            return Err(AppError::from_status(status, &body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("Error decoding {}: {}", endpoint, e);
            AppError::from(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        let builder = self.request(Method::GET, endpoint).await;
        let envelope: ApiResponse<T> = self.execute(endpoint, builder).await?;
        Ok(envelope.into_inner())
    }

    async fn send_json<B, T>(&self, method: Method, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, endpoint).await.json(body);
        self.execute(endpoint, builder).await
    }

    async fn send_empty<T: DeserializeOwned>(&self, method: Method, endpoint: &str) -> AppResult<T> {
        let builder = self.request(method, endpoint).await;
        self.execute(endpoint, builder).await
    }
}

#[async_trait]
impl StructopiaApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        self.send_json(Method::POST, "/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse> {
        self.send_json(Method::POST, "/register", request).await
    }

    async fn logout(&self) -> AppResult<()> {
        let _: serde_json::Value = self.send_empty(Method::POST, "/logout").await?;
        Ok(())
    }

    async fn current_user(&self) -> AppResult<User> {
        let user: MaybeEnveloped<User> = self.send_empty(Method::GET, "/user").await?;
        Ok(user.into_inner())
    }

    async fn levels(&self) -> AppResult<Vec<Level>> {
        self.get("/levels").await
    }

    async fn level(&self, level_id: i64) -> AppResult<Level> {
        self.get(&format!("/levels/{}", level_id)).await
    }

    async fn materials(&self, level_id: i64) -> AppResult<Vec<Material>> {
        self.get(&format!("/levels/{}/materials", level_id)).await
    }

    async fn material(&self, material_id: i64) -> AppResult<Material> {
        self.get(&format!("/materials/{}", material_id)).await
    }

    async fn complete_material(&self, material_id: i64) -> AppResult<MessageResponse> {
        self.send_empty(Method::POST, &format!("/materials/{}/complete", material_id))
            .await
    }

    async fn quizzes(&self, level_id: i64) -> AppResult<Vec<Quiz>> {
        self.get(&format!("/levels/{}/quizzes", level_id)).await
    }

    async fn quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        self.get(&format!("/quizzes/{}", quiz_id)).await
    }

    async fn submit_quiz(
        &self,
        quiz_id: i64,
        request: &SubmitAnswersRequest,
    ) -> AppResult<QuizResult> {
        let envelope: ApiResponse<QuizResult> = self
            .send_json(Method::POST, &format!("/quizzes/{}/submit", quiz_id), request)
            .await?;
        Ok(envelope.into_inner())
    }

    async fn progress(&self, level_id: i64) -> AppResult<UserProgress> {
        self.get(&format!("/progress/level/{}", level_id)).await
    }

    async fn badges(&self) -> AppResult<Vec<Badge>> {
        self.get("/badges").await
    }

    async fn leaderboard(&self, limit: u32) -> AppResult<Vec<LeaderboardEntry>> {
        self.get(&format!("/leaderboard?limit={}", limit)).await
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        self.get("/admin/stats").await
    }

    async fn admin_users(&self, params: &PaginationParams) -> AppResult<Paginated<User>> {
        let endpoint = format!("/admin/users?page={}&limit={}", params.page, params.limit);
        self.send_empty(Method::GET, &endpoint).await
    }

    async fn create_level(&self, request: &CreateLevelRequest) -> AppResult<Level> {
        let envelope: ApiResponse<Level> =
            self.send_json(Method::POST, "/admin/levels", request).await?;
        Ok(envelope.into_inner())
    }

    async fn update_level(&self, level_id: i64, request: &UpdateLevelRequest) -> AppResult<Level> {
        let envelope: ApiResponse<Level> = self
            .send_json(Method::PUT, &format!("/admin/levels/{}", level_id), request)
            .await?;
        Ok(envelope.into_inner())
    }

    async fn delete_level(&self, level_id: i64) -> AppResult<MessageResponse> {
        self.send_empty(Method::DELETE, &format!("/admin/levels/{}", level_id))
            .await
    }

    async fn create_material(&self, request: &CreateMaterialRequest) -> AppResult<Material> {
        let envelope: ApiResponse<Material> =
            self.send_json(Method::POST, "/admin/materials", request).await?;
        Ok(envelope.into_inner())
    }

    async fn update_material(
        &self,
        material_id: i64,
        request: &UpdateMaterialRequest,
    ) -> AppResult<Material> {
        let envelope: ApiResponse<Material> = self
            .send_json(
                Method::PUT,
                &format!("/admin/materials/{}", material_id),
                request,
            )
            .await?;
        Ok(envelope.into_inner())
    }

    async fn delete_material(&self, material_id: i64) -> AppResult<MessageResponse> {
        self.send_empty(Method::DELETE, &format!("/admin/materials/{}", material_id))
            .await
    }

    async fn create_quiz(&self, request: &CreateQuizRequest) -> AppResult<Quiz> {
        let envelope: ApiResponse<Quiz> =
            self.send_json(Method::POST, "/admin/quizzes", request).await?;
        Ok(envelope.into_inner())
    }

    async fn update_quiz(&self, quiz_id: i64, request: &UpdateQuizRequest) -> AppResult<Quiz> {
        let envelope: ApiResponse<Quiz> = self
            .send_json(Method::PUT, &format!("/admin/quizzes/{}", quiz_id), request)
            .await?;
        Ok(envelope.into_inner())
    }

    async fn delete_quiz(&self, quiz_id: i64) -> AppResult<MessageResponse> {
        self.send_empty(Method::DELETE, &format!("/admin/quizzes/{}", quiz_id))
            .await
    }
}
