use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    api::StructopiaApi,
    errors::AppResult,
    models::{
        domain::{Badge, LeaderboardEntry, Level, Material, Quiz, QuizResult, UserProgress},
        dto::{request::AnswerInput, request::SubmitAnswersRequest, response::MessageResponse},
    },
    progress::{DashboardSummary, LevelWorkspace},
    quiz::{grading::grade_locally, QuizGrader},
    services::{
        demo_data::{DEMO, DEMO_USER_ID},
        fallback::{report_failure, with_fallback, DEMO_DATA_DESCRIPTION, DEMO_DATA_TITLE},
        notice::Notifier,
    },
};

/// Student-facing reads and writes. Reads never fail: an unreachable server
/// yields the demo dataset instead.
pub struct LearningService {
    api: Arc<dyn StructopiaApi>,
    notifier: Notifier,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub levels: Vec<Level>,
    pub badges: Vec<Badge>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub summary: DashboardSummary,
}

impl LearningService {
    pub fn new(api: Arc<dyn StructopiaApi>, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    pub async fn levels(&self) -> Vec<Level> {
        with_fallback(&self.notifier, "Fetch levels", self.api.levels(), || {
            DEMO.levels()
        })
        .await
    }

    pub async fn level(&self, level_id: i64) -> Level {
        with_fallback(&self.notifier, "Fetch level", self.api.level(level_id), || {
            DEMO.level_detail(level_id)
        })
        .await
    }

    pub async fn materials(&self, level_id: i64) -> Vec<Material> {
        with_fallback(
            &self.notifier,
            "Fetch materials",
            self.api.materials(level_id),
            || DEMO.materials_for(level_id),
        )
        .await
    }

    pub async fn material(&self, material_id: i64) -> Material {
        with_fallback(
            &self.notifier,
            "Fetch material",
            self.api.material(material_id),
            || DEMO.material(material_id),
        )
        .await
    }

    pub async fn quizzes(&self, level_id: i64) -> Vec<Quiz> {
        with_fallback(
            &self.notifier,
            "Fetch quizzes",
            self.api.quizzes(level_id),
            || DEMO.quizzes_for(level_id),
        )
        .await
    }

    pub async fn quiz(&self, quiz_id: i64) -> Quiz {
        with_fallback(&self.notifier, "Fetch quiz", self.api.quiz(quiz_id), || {
            DEMO.quiz(quiz_id)
        })
        .await
    }

    pub async fn progress(&self, level_id: i64) -> UserProgress {
        with_fallback(
            &self.notifier,
            "Fetch progress",
            self.api.progress(level_id),
            || DEMO.progress(level_id),
        )
        .await
    }

    pub async fn badges(&self) -> Vec<Badge> {
        with_fallback(&self.notifier, "Fetch badges", self.api.badges(), || {
            DEMO.badges()
        })
        .await
    }

    pub async fn leaderboard(&self, limit: u32) -> Vec<LeaderboardEntry> {
        with_fallback(
            &self.notifier,
            "Fetch leaderboard",
            self.api.leaderboard(limit),
            || DEMO.leaderboard(limit),
        )
        .await
    }

    /// The server is told first; the local state only changes once it agrees
    /// (or is unreachable, in which case the completion is kept locally).
    pub async fn mark_material_complete(&self, material_id: i64) -> MessageResponse {
        with_fallback(
            &self.notifier,
            "Complete material",
            self.api.complete_material(material_id),
            || MessageResponse::ok("Material marked as completed"),
        )
        .await
    }

    pub async fn complete_material(&self, workspace: &mut LevelWorkspace, material_id: i64) -> bool {
        let response = self.mark_material_complete(material_id).await;
        if !response.success {
            log::warn!(
                "Server declined completion of material {}: {}",
                material_id,
                response.message
            );
            return false;
        }
        workspace.complete_material(material_id)
    }

    /// Submits answers for grading. When the server fails, quizzes from the
    /// demo dataset are graded locally against their own keys; anything else
    /// is reported and returned.
    pub async fn submit_quiz(&self, quiz_id: i64, answers: Vec<AnswerInput>) -> AppResult<QuizResult> {
        let request = SubmitAnswersRequest { answers };

        match self.api.submit_quiz(quiz_id, &request).await {
            Ok(result) => Ok(result),
            Err(err) => match DEMO.find_quiz(quiz_id) {
                Some(quiz) => {
                    log::warn!("Submit quiz failed, grading locally: {}", err);
                    self.notifier.info(DEMO_DATA_TITLE, DEMO_DATA_DESCRIPTION);
                    Ok(grade_locally(quiz, &request.answers, DEMO_USER_ID))
                }
                None => report_failure(&self.notifier, "Submit quiz", Err(err)),
            },
        }
    }

    /// Materials, quizzes and progress for one level, fetched together.
    pub async fn level_workspace(&self, level_id: i64) -> LevelWorkspace {
        let (materials, quizzes, mut progress) = futures::join!(
            self.materials(level_id),
            self.quizzes(level_id),
            self.progress(level_id)
        );

        // keep the percentage consistent with the materials actually loaded
        progress.progress_percentage =
            crate::progress::progress_percentage(&progress.completed_materials, &materials);

        LevelWorkspace::new(level_id, materials, quizzes, progress)
    }

    pub async fn dashboard(&self, leaderboard_limit: u32) -> Dashboard {
        let (levels, badges, leaderboard) = futures::join!(
            self.levels(),
            self.badges(),
            self.leaderboard(leaderboard_limit)
        );
        let summary = DashboardSummary::from_parts(&levels, &badges);

        Dashboard {
            levels,
            badges,
            leaderboard,
            summary,
        }
    }
}

#[async_trait]
impl QuizGrader for LearningService {
    async fn grade(&self, quiz_id: i64, answers: Vec<AnswerInput>) -> AppResult<QuizResult> {
        self.submit_quiz(quiz_id, answers).await
    }
}
