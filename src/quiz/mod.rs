//! Quiz-taking: the session state machine, its countdown and grading.

pub mod grading;
pub mod session;
pub mod timer;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::domain::QuizResult;
use crate::models::dto::request::AnswerInput;

pub use grading::grade_locally;
pub use session::{format_time, submit_shared, AnswerReview, QuizPhase, QuizSession, Tick};
pub use timer::{run_countdown, spawn_countdown, TimerOutcome};

/// Whoever decides the score of a submission.
#[async_trait]
pub trait QuizGrader: Send + Sync {
    async fn grade(&self, quiz_id: i64, answers: Vec<AnswerInput>) -> AppResult<QuizResult>;
}
