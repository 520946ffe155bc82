use std::collections::HashMap;

use chrono::Utc;

use crate::models::domain::{GradedAnswer, Question, Quiz, QuizResult};
use crate::models::dto::request::AnswerInput;

/// Grades a submission against the quiz's own answer keys.
///
/// Scoring is normally the server's job; this is what the client uses when the
/// server cannot be reached. The score is the percentage of points earned out
/// of all points in the quiz, so unanswered questions count as wrong.
pub fn grade_locally(quiz: &Quiz, answers: &[AnswerInput], user_id: i64) -> QuizResult {
    let questions: HashMap<i64, &Question> = quiz.questions.iter().map(|q| (q.id, q)).collect();

    let total_points: i64 = quiz.questions.iter().map(|q| i64::from(q.points.max(0))).sum();
    let mut earned_points: i64 = 0;
    let mut graded = Vec::with_capacity(answers.len());

    for submitted in answers {
        let is_correct = questions
            .get(&submitted.question_id)
            .map(|q| q.is_correct(&submitted.answer))
            .unwrap_or(false);

        if is_correct {
            if let Some(question) = questions.get(&submitted.question_id) {
                earned_points += i64::from(question.points.max(0));
            }
        }

        graded.push(GradedAnswer {
            question_id: submitted.question_id,
            user_answer: submitted.answer.clone(),
            is_correct,
        });
    }

    let score = if total_points == 0 {
        0
    } else {
        ((earned_points as f64 / total_points as f64) * 100.0).round() as u32
    };

    QuizResult {
        quiz_id: quiz.id,
        user_id,
        score,
        passed: quiz.is_passing(score),
        completed_at: Utc::now(),
        answers: graded,
    }
}
