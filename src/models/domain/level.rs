use serde::{Deserialize, Serialize};

use crate::models::domain::{Material, Quiz};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Level {
    pub id: i64,
    pub name: String,
    pub order: i32,
    pub description: String,
    pub status: LevelStatus,
    #[serde(rename = "keterangan", default)]
    pub remark: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<Material>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quizzes: Option<Vec<Quiz>>,
}

/// Server-authoritative; the client only renders it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStatus {
    Locked,
    Unlocked,
    Ongoing,
    Completed,
}

impl LevelStatus {
    /// Whether a student may open the level.
    pub fn is_accessible(self) -> bool {
        !matches!(self, LevelStatus::Locked)
    }
}

impl Level {
    pub fn with_materials(mut self, materials: Vec<Material>) -> Self {
        self.materials = Some(materials);
        self
    }
}
