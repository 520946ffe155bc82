#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;

    use crate::models::domain::{
        Answer, Material, MaterialStatus, MaterialType, ProgressStatus, Question, QuestionOption,
        QuestionType, Quiz, QuizStatus, UserProgress,
    };

    /// A 15-minute quiz with `questions` multiple-choice questions worth 10
    /// points each; the key is always option "a".
    pub fn sample_quiz(questions: usize) -> Quiz {
        Quiz {
            id: 1,
            level_id: 1,
            title: "Quiz: Sample".to_string(),
            description: "Fixture quiz".to_string(),
            time_limit: 15,
            passing_score: 70,
            questions: (0..questions)
                .map(|i| sample_question(i as i64 + 1, 1))
                .collect(),
            status: QuizStatus::Unattempted,
            user_score: None,
        }
    }

    pub fn sample_question(id: i64, quiz_id: i64) -> Question {
        Question {
            id,
            quiz_id,
            prompt: format!("Question {}", id),
            question_type: QuestionType::MultipleChoice,
            options: ["a", "b", "c", "d"]
                .iter()
                .map(|key| QuestionOption {
                    id: key.to_string(),
                    text: format!("Option {}", key.to_uppercase()),
                })
                .collect(),
            correct_answer: Answer::single("a"),
            explanation: Some("Option A is the key".to_string()),
            points: 10,
        }
    }

    /// Materials with ids `level_id * 100 + 1..=count`, all unread.
    pub fn sample_materials(level_id: i64, count: usize) -> Vec<Material> {
        (0..count)
            .map(|i| Material {
                id: level_id * 100 + i as i64 + 1,
                level_id,
                title: format!("Material {}", i + 1),
                material_type: MaterialType::Text,
                content: "Lorem ipsum".to_string(),
                order: i as i32 + 1,
                status: MaterialStatus::Unread,
            })
            .collect()
    }

    pub fn sample_progress(level_id: i64, completed: &[i64]) -> UserProgress {
        UserProgress {
            user_id: 1,
            level_id,
            status: ProgressStatus::NotStarted,
            progress_percentage: 0,
            completed_materials: completed.to_vec(),
            completed_quizzes: vec![],
            xp_earned: 0,
            last_activity_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_quiz() {
        let quiz = sample_quiz(3);
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.time_limit_secs(), 900);
    }

    #[test]
    fn test_fixtures_sample_materials() {
        let materials = sample_materials(2, 2);
        assert_eq!(materials[0].id, 201);
        assert_eq!(materials[1].id, 202);
        assert!(materials.iter().all(|m| m.level_id == 2));
    }
}
