use serde::{Deserialize, Serialize};

const WORDS_PER_MINUTE: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Material {
    pub id: i64,
    pub level_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub content: String, // markdown body, or a URL for image/video
    pub order: i32,
    pub status: MaterialStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Text,
    Image,
    Video,
    Code,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialStatus {
    Unread,
    Reading,
    Completed,
}

impl Material {
    pub fn is_completed(&self) -> bool {
        self.status == MaterialStatus::Completed
    }

    /// Estimated reading time in whole minutes. Only text materials have one.
    pub fn reading_time_minutes(&self) -> Option<usize> {
        if self.material_type != MaterialType::Text {
            return None;
        }
        let words = self.content.split_whitespace().count();
        Some(words.div_ceil(WORDS_PER_MINUTE))
    }
}
