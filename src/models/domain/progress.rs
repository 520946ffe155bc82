use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per (user, level) progress record.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProgress {
    pub user_id: i64,
    pub level_id: i64,
    pub status: ProgressStatus,
    pub progress_percentage: u32,
    #[serde(default)]
    pub completed_materials: Vec<i64>,
    #[serde(default)]
    pub completed_quizzes: Vec<i64>,
    pub xp_earned: u32,
    pub last_activity_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}
