use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::dto::request::RegisterRequest;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
}

impl User {
    pub fn new(id: i64, name: &str, email: &str, role: Role) -> Self {
        User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            avatar: None,
            xp: None,
            rank: None,
            badges_count: None,
            joined_at: None,
        }
    }

    /// Local stand-in for a registration the server never confirmed.
    pub fn from_request(id: i64, request: &RegisterRequest) -> Self {
        User::new(id, &request.name, &request.email, request.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Aggregates shown on the admin console.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub active_users: u64,
    pub completed_levels: u64,
    pub average_quiz_score: f64,
    pub total_badges_earned: u64,
}

#[cfg(test)]
impl User {
    pub fn test_student(id: i64, name: &str) -> Self {
        User::new(
            id,
            name,
            &format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            Role::Student,
        )
    }
}
