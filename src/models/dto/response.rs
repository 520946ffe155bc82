use serde::{Deserialize, Serialize};

use crate::models::domain::User;

/// The `{ "data": ... }` envelope every endpoint uses.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Body of write endpoints that only acknowledge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn default_success() -> bool {
    true
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
