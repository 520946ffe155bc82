use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Answer, Quiz, QuizResult};
use crate::models::dto::request::AnswerInput;
use crate::quiz::QuizGrader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Completed,
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(u64),
    Expired,
    /// The session is not running; nothing was counted.
    Idle,
}

/// One graded answer joined with its question, ready to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    pub question_id: i64,
    pub prompt: String,
    pub user_answer: String,
    pub is_correct: bool,
    /// Only set for wrong answers.
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
}

/// Timed quiz attempt: `NotStarted → InProgress → Completed`.
///
/// `Completed` is terminal. A retry after a failed attempt re-runs the start
/// action from scratch; nothing ever moves back to `InProgress` otherwise.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    phase: QuizPhase,
    answers: HashMap<i64, Answer>,
    current_index: usize,
    time_left: u64,
    result: Option<QuizResult>,
}

impl QuizSession {
    /// Open quizzes (unattempted or failed) begin `NotStarted`; anything else is
    /// shown as already completed, without a local result.
    pub fn new(quiz: Quiz) -> Self {
        let phase = if quiz.is_open() {
            QuizPhase::NotStarted
        } else {
            QuizPhase::Completed
        };
        let time_left = quiz.time_limit_secs();

        Self {
            quiz,
            phase,
            answers: HashMap::new(),
            current_index: 0,
            time_left,
            result: None,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn answer_for(&self, question_id: i64) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn unanswered_count(&self) -> usize {
        self.quiz.questions.len().saturating_sub(self.answers.len())
    }

    pub fn start(&mut self) -> AppResult<()> {
        if self.phase != QuizPhase::NotStarted {
            return Err(AppError::ValidationError(format!(
                "Quiz {} cannot be started from {:?}",
                self.quiz.id, self.phase
            )));
        }
        self.begin();
        Ok(())
    }

    fn begin(&mut self) {
        self.phase = QuizPhase::InProgress;
        self.time_left = self.quiz.time_limit_secs();
        self.current_index = 0;
        self.answers.clear();
        self.result = None;
        log::info!(
            "Quiz {} started: {} question(s), {}s on the clock",
            self.quiz.id,
            self.quiz.questions.len(),
            self.time_left
        );
    }

    fn ensure_in_progress(&self) -> AppResult<()> {
        if self.phase == QuizPhase::InProgress {
            Ok(())
        } else {
            Err(AppError::ValidationError(format!(
                "Quiz {} is not in progress",
                self.quiz.id
            )))
        }
    }

    /// Records or replaces the answer to a question. An empty selection
    /// clears it.
    pub fn answer(&mut self, question_id: i64, answer: Answer) -> AppResult<()> {
        self.ensure_in_progress()?;

        if self.quiz.question(question_id).is_none() {
            return Err(AppError::NotFound(format!(
                "Question {} is not part of quiz {}",
                question_id, self.quiz.id
            )));
        }

        if answer.is_empty() {
            self.answers.remove(&question_id);
        } else {
            self.answers.insert(question_id, answer);
        }
        Ok(())
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.quiz.questions.len()
    }

    fn current_is_answered(&self) -> bool {
        self.quiz
            .questions
            .get(self.current_index)
            .map(|q| self.answers.contains_key(&q.id))
            .unwrap_or(false)
    }

    pub fn can_go_next(&self) -> bool {
        self.phase == QuizPhase::InProgress && !self.is_last_question() && self.current_is_answered()
    }

    pub fn can_go_previous(&self) -> bool {
        self.phase == QuizPhase::InProgress && self.current_index > 0
    }

    /// The submit action only exists on the last question.
    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::InProgress && self.is_last_question()
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current_index += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Counts one second down. Reaching zero reports `Expired`; the caller is
    /// expected to submit with `force`.
    pub fn tick(&mut self) -> Tick {
        if self.phase != QuizPhase::InProgress {
            return Tick::Idle;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            log::info!("Quiz {} ran out of time", self.quiz.id);
            Tick::Expired
        } else {
            Tick::Running(self.time_left)
        }
    }

    /// Answers in question order. Without `force`, every question must be
    /// answered and the last question must be showing.
    pub fn prepare_submission(&self, force: bool) -> AppResult<Vec<AnswerInput>> {
        self.ensure_in_progress()?;

        if !force {
            let unanswered = self.unanswered_count();
            if unanswered > 0 {
                return Err(AppError::SubmitRejected { unanswered });
            }
            if !self.is_last_question() {
                return Err(AppError::ValidationError(format!(
                    "Quiz {} can only be submitted from the last question",
                    self.quiz.id
                )));
            }
        }

        Ok(self
            .quiz
            .questions
            .iter()
            .filter_map(|q| {
                self.answers.get(&q.id).map(|a| AnswerInput {
                    question_id: q.id,
                    answer: a.clone(),
                })
            })
            .collect())
    }

    /// Records the grader's verdict and ends the attempt.
    pub fn complete_with(&mut self, result: QuizResult) -> AppResult<()> {
        self.ensure_in_progress()?;

        log::info!(
            "Quiz {} completed: score {} ({})",
            self.quiz.id,
            result.score,
            if result.passed { "passed" } else { "failed" }
        );
        self.phase = QuizPhase::Completed;
        self.result = Some(result);
        Ok(())
    }

    /// Sends the answers to the grader and completes the session with its
    /// verdict. On any error the session stays `InProgress` untouched.
    ///
    /// Holds `&mut self` while grading; a shared session should go through
    /// [`submit_shared`] instead.
    pub async fn submit(&mut self, grader: &dyn QuizGrader, force: bool) -> AppResult<QuizResult> {
        let answers = self.prepare_submission(force)?;
        let result = grade(grader, self.quiz.id, answers).await?;
        self.complete_with(result.clone())?;
        Ok(result)
    }

    /// Only a failed attempt can be retried.
    pub fn can_retry(&self) -> bool {
        self.phase == QuizPhase::Completed && self.result.as_ref().is_some_and(|r| !r.passed)
    }

    pub fn retry(&mut self) -> AppResult<()> {
        if !self.can_retry() {
            return Err(AppError::ValidationError(format!(
                "Quiz {} has no retry available",
                self.quiz.id
            )));
        }
        self.begin();
        Ok(())
    }

    /// Position through the quiz, as a percentage.
    pub fn position_percent(&self) -> u32 {
        let total = self.quiz.questions.len();
        if total == 0 {
            return 0;
        }
        (((self.current_index + 1) as f64 / total as f64) * 100.0).round() as u32
    }

    pub fn formatted_time_left(&self) -> String {
        format_time(self.time_left)
    }

    /// Joins the graded answers with their questions.
    pub fn review(&self) -> Vec<AnswerReview> {
        let Some(result) = &self.result else {
            return vec![];
        };

        result
            .answers
            .iter()
            .map(|graded| {
                let question = self.quiz.question(graded.question_id);
                let user_answer = match question {
                    Some(q) => q.describe(&graded.user_answer),
                    None => graded.user_answer.ids().join(", "),
                };
                let (correct_answer, explanation) = match question {
                    Some(q) if !graded.is_correct => {
                        (Some(q.describe(&q.correct_answer)), q.explanation.clone())
                    }
                    _ => (None, None),
                };

                AnswerReview {
                    question_id: graded.question_id,
                    prompt: question.map(|q| q.prompt.clone()).unwrap_or_default(),
                    user_answer,
                    is_correct: graded.is_correct,
                    correct_answer,
                    explanation,
                }
            })
            .collect()
    }
}

async fn grade(grader: &dyn QuizGrader, quiz_id: i64, answers: Vec<AnswerInput>) -> AppResult<QuizResult> {
    grader.grade(quiz_id, answers).await.map_err(|e| {
        log::error!("Submitting quiz {} failed: {}", quiz_id, e);
        e
    })
}

/// Submits a session shared behind a mutex. The lock is only taken to collect
/// the answers and to record the verdict, never while the grader runs.
pub async fn submit_shared(
    session: &Mutex<QuizSession>,
    grader: &dyn QuizGrader,
    force: bool,
) -> AppResult<QuizResult> {
    let (quiz_id, answers) = {
        let guard = session.lock().await;
        (guard.quiz.id, guard.prepare_submission(force)?)
    };

    let result = grade(grader, quiz_id, answers).await?;

    session.lock().await.complete_with(result.clone())?;
    Ok(result)
}

/// `m:ss`
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
