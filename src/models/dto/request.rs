use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Answer, LevelStatus, MaterialType, Question, Role};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: i64,
    pub answer: Answer,
}

/// Not validated: a timed-out attempt is submitted with whatever was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLevelRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(range(min = 1))]
    pub order: i32,

    #[validate(length(max = 1000))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateLevelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub order: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LevelStatus>,

    #[serde(rename = "keterangan", skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMaterialRequest {
    #[validate(range(min = 1))]
    pub level_id: i64,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(rename = "type")]
    pub material_type: MaterialType,

    #[validate(length(min = 1))]
    pub content: String,

    #[validate(range(min = 1))]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMaterialRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub material_type: Option<MaterialType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(range(min = 1))]
    pub level_id: i64,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: String,

    #[validate(range(min = 1, max = 180))]
    pub time_limit: u32,

    #[validate(range(max = 100))]
    pub passing_score: u32,

    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 180))]
    pub time_limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 100))]
    pub passing_score: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 1))]
    pub page: u32,

    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}
