use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Badge {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub criteria: String,
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}

impl Badge {
    /// The timestamp is the only signal of the earned state.
    pub fn is_earned(&self) -> bool {
        self.earned_at.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub rank: u32,
    pub xp: u32,
    pub badges_count: u32,
    pub level_completed: u32,
}
