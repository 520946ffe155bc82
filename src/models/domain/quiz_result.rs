use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::Answer;

/// What the API returns after grading a submission.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub quiz_id: i64,
    pub user_id: i64,
    pub score: u32,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
    pub answers: Vec<GradedAnswer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GradedAnswer {
    pub question_id: i64,
    pub user_answer: Answer,
    pub is_correct: bool,
}

impl QuizResult {
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_deserializes_mixed_answer_shapes() {
        let json = r#"{
            "quiz_id": 1,
            "user_id": 1,
            "score": 80,
            "passed": true,
            "completed_at": "2024-05-10T16:00:00Z",
            "answers": [
                {"question_id": 1, "user_answer": "a", "is_correct": true},
                {"question_id": 2, "user_answer": ["b", "d"], "is_correct": false}
            ]
        }"#;

        let result: QuizResult = serde_json::from_str(json).expect("result should deserialize");

        assert!(result.passed);
        assert_eq!(result.correct_count(), 1);
        assert!(matches!(result.answers[1].user_answer, Answer::Multiple(_)));
    }
}
