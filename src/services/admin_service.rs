use std::sync::Arc;

use validator::Validate;

use crate::{
    api::StructopiaApi,
    errors::AppResult,
    models::{
        domain::{AdminStats, Level, Material, Quiz, User},
        dto::{
            request::{
                CreateLevelRequest, CreateMaterialRequest, CreateQuizRequest, PaginationParams,
                UpdateLevelRequest, UpdateMaterialRequest, UpdateQuizRequest,
            },
            response::{MessageResponse, Paginated},
        },
    },
    services::{
        demo_data::DEMO,
        fallback::{report_failure, with_fallback},
        notice::Notifier,
    },
};

/// Admin reads fall back like every other read. Writes are validated locally,
/// then sent; a failure is reported and returned, never substituted.
pub struct AdminService {
    api: Arc<dyn StructopiaApi>,
    notifier: Notifier,
}

impl AdminService {
    pub fn new(api: Arc<dyn StructopiaApi>, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    pub async fn stats(&self) -> AdminStats {
        with_fallback(&self.notifier, "Fetch admin stats", self.api.admin_stats(), || {
            DEMO.admin_stats()
        })
        .await
    }

    pub async fn users(&self, params: &PaginationParams) -> AppResult<Paginated<User>> {
        params.validate()?;

        Ok(with_fallback(
            &self.notifier,
            "Fetch users",
            self.api.admin_users(params),
            || DEMO.users_page(),
        )
        .await)
    }

    pub async fn create_level(&self, request: &CreateLevelRequest) -> AppResult<Level> {
        request.validate()?;
        report_failure(
            &self.notifier,
            "Create level",
            self.api.create_level(request).await,
        )
    }

    pub async fn update_level(&self, level_id: i64, request: &UpdateLevelRequest) -> AppResult<Level> {
        request.validate()?;
        report_failure(
            &self.notifier,
            "Update level",
            self.api.update_level(level_id, request).await,
        )
    }

    pub async fn delete_level(&self, level_id: i64) -> AppResult<MessageResponse> {
        report_failure(
            &self.notifier,
            "Delete level",
            self.api.delete_level(level_id).await,
        )
    }

    pub async fn create_material(&self, request: &CreateMaterialRequest) -> AppResult<Material> {
        request.validate()?;
        report_failure(
            &self.notifier,
            "Create material",
            self.api.create_material(request).await,
        )
    }

    pub async fn update_material(
        &self,
        material_id: i64,
        request: &UpdateMaterialRequest,
    ) -> AppResult<Material> {
        request.validate()?;
        report_failure(
            &self.notifier,
            "Update material",
            self.api.update_material(material_id, request).await,
        )
    }

    pub async fn delete_material(&self, material_id: i64) -> AppResult<MessageResponse> {
        report_failure(
            &self.notifier,
            "Delete material",
            self.api.delete_material(material_id).await,
        )
    }

    pub async fn create_quiz(&self, request: &CreateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;
        report_failure(
            &self.notifier,
            "Create quiz",
            self.api.create_quiz(request).await,
        )
    }

    pub async fn update_quiz(&self, quiz_id: i64, request: &UpdateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;
        report_failure(
            &self.notifier,
            "Update quiz",
            self.api.update_quiz(quiz_id, request).await,
        )
    }

    pub async fn delete_quiz(&self, quiz_id: i64) -> AppResult<MessageResponse> {
        report_failure(
            &self.notifier,
            "Delete quiz",
            self.api.delete_quiz(quiz_id).await,
        )
    }
}
