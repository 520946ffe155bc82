pub mod client;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::domain::{
    AdminStats, Badge, LeaderboardEntry, Level, Material, Quiz, QuizResult, User, UserProgress,
};
use crate::models::dto::request::{
    CreateLevelRequest, CreateMaterialRequest, CreateQuizRequest, LoginRequest,
    PaginationParams, RegisterRequest, SubmitAnswersRequest, UpdateLevelRequest,
    UpdateMaterialRequest, UpdateQuizRequest,
};
use crate::models::dto::response::{AuthResponse, MessageResponse, Paginated};

pub use client::ApiClient;

/// The remote Structopia REST API. Envelopes are already unwrapped.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StructopiaApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse>;
    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse>;
    async fn logout(&self) -> AppResult<()>;
    async fn current_user(&self) -> AppResult<User>;

    async fn levels(&self) -> AppResult<Vec<Level>>;
    async fn level(&self, level_id: i64) -> AppResult<Level>;

    async fn materials(&self, level_id: i64) -> AppResult<Vec<Material>>;
    async fn material(&self, material_id: i64) -> AppResult<Material>;
    async fn complete_material(&self, material_id: i64) -> AppResult<MessageResponse>;

    async fn quizzes(&self, level_id: i64) -> AppResult<Vec<Quiz>>;
    async fn quiz(&self, quiz_id: i64) -> AppResult<Quiz>;
    async fn submit_quiz(
        &self,
        quiz_id: i64,
        request: &SubmitAnswersRequest,
    ) -> AppResult<QuizResult>;

    async fn progress(&self, level_id: i64) -> AppResult<UserProgress>;
    async fn badges(&self) -> AppResult<Vec<Badge>>;
    async fn leaderboard(&self, limit: u32) -> AppResult<Vec<LeaderboardEntry>>;

    async fn admin_stats(&self) -> AppResult<AdminStats>;
    async fn admin_users(&self, params: &PaginationParams) -> AppResult<Paginated<User>>;

    async fn create_level(&self, request: &CreateLevelRequest) -> AppResult<Level>;
    async fn update_level(&self, level_id: i64, request: &UpdateLevelRequest) -> AppResult<Level>;
    async fn delete_level(&self, level_id: i64) -> AppResult<MessageResponse>;

    async fn create_material(&self, request: &CreateMaterialRequest) -> AppResult<Material>;
    async fn update_material(
        &self,
        material_id: i64,
        request: &UpdateMaterialRequest,
    ) -> AppResult<Material>;
    async fn delete_material(&self, material_id: i64) -> AppResult<MessageResponse>;

    async fn create_quiz(&self, request: &CreateQuizRequest) -> AppResult<Quiz>;
    async fn update_quiz(&self, quiz_id: i64, request: &UpdateQuizRequest) -> AppResult<Quiz>;
    async fn delete_quiz(&self, quiz_id: i64) -> AppResult<MessageResponse>;
}
