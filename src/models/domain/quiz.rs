use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: i64,
    pub level_id: i64,
    pub title: String,
    pub description: String,
    pub time_limit: u32,    // minutes
    pub passing_score: u32, // percent
    #[serde(default)]
    pub questions: Vec<Question>,
    pub status: QuizStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_score: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    Unattempted,
    InProgress,
    Completed,
    Failed,
    Passed,
}

impl Quiz {
    pub fn time_limit_secs(&self) -> u64 {
        u64::from(self.time_limit) * 60
    }

    pub fn question(&self, question_id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Still open to the student: never tried, or tried and failed.
    pub fn is_open(&self) -> bool {
        matches!(self.status, QuizStatus::Unattempted | QuizStatus::Failed)
    }

    pub fn is_passing(&self, score: u32) -> bool {
        score >= self.passing_score
    }
}
