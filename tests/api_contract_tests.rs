use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use structopia::{
    api::StructopiaApi,
    app_state::AppState,
    auth::AuthSession,
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{
            AdminStats, Answer, Badge, LeaderboardEntry, Level, LevelStatus, Material,
            MaterialStatus, MaterialType, ProgressStatus, Quiz, QuizResult, QuizStatus, Role,
            User, UserProgress,
        },
        dto::{
            request::{
                CreateLevelRequest, CreateMaterialRequest, CreateQuizRequest, LoginRequest,
                PaginationParams, RegisterRequest, SubmitAnswersRequest, UpdateLevelRequest,
                UpdateMaterialRequest, UpdateQuizRequest,
            },
            response::{AuthResponse, MessageResponse, PageMeta, Paginated},
        },
    },
    quiz::{grade_locally, QuizGrader, QuizPhase, QuizSession},
    services::{demo_data::DEMO, Notifier},
};

const TOKEN: &str = "server-issued-token";

/// A server that keeps everything in memory and grades with the quiz keys.
struct InMemoryApi {
    levels: RwLock<HashMap<i64, Level>>,
    materials: RwLock<HashMap<i64, Material>>,
    quizzes: RwLock<HashMap<i64, Quiz>>,
    progress: RwLock<HashMap<i64, UserProgress>>,
    users: RwLock<Vec<User>>,
    session: Arc<AuthSession>,
}

impl InMemoryApi {
    fn seeded(session: Arc<AuthSession>) -> Self {
        let level = Level {
            id: 10,
            name: "Stacks".to_string(),
            order: 1,
            description: "LIFO".to_string(),
            status: LevelStatus::Ongoing,
            remark: String::new(),
            materials: None,
            quizzes: None,
        };
        let materials = (1..=4)
            .map(|i| Material {
                id: 100 + i,
                level_id: 10,
                title: format!("Stack part {}", i),
                material_type: MaterialType::Text,
                content: "push and pop".to_string(),
                order: i as i32,
                status: MaterialStatus::Unread,
            })
            .collect::<Vec<_>>();
        let mut quiz = DEMO.quizzes[0].clone();
        quiz.id = 50;
        quiz.level_id = 10;
        quiz.status = QuizStatus::Unattempted;

        Self {
            levels: RwLock::new(HashMap::from([(level.id, level)])),
            materials: RwLock::new(materials.into_iter().map(|m| (m.id, m)).collect()),
            quizzes: RwLock::new(HashMap::from([(quiz.id, quiz)])),
            progress: RwLock::new(HashMap::from([(
                10,
                UserProgress {
                    user_id: 7,
                    level_id: 10,
                    status: ProgressStatus::InProgress,
                    progress_percentage: 0,
                    completed_materials: vec![],
                    completed_quizzes: vec![],
                    xp_earned: 0,
                    last_activity_at: Utc::now(),
                },
            )])),
            users: RwLock::new(vec![User::new(7, "Ayu", "ayu@example.com", Role::Student)]),
            session,
        }
    }

    async fn require_auth(&self) -> AppResult<()> {
        match self.session.bearer().await {
            Some(token) if token == TOKEN => Ok(()),
            _ => Err(AppError::Unauthorized("Unauthenticated.".to_string())),
        }
    }

    fn not_found<T>(what: &str, id: i64) -> AppResult<T> {
        Err(AppError::NotFound(format!("{} {} not found", what, id)))
    }
}

#[async_trait]
impl StructopiaApi for InMemoryApi {
    async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        let users = self.users.read().await;
        let user = users
            .iter()
            .find(|u| u.email == request.email)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;
        Ok(AuthResponse {
            token: TOKEN.to_string(),
            user,
        })
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == request.email) {
            return Err(AppError::ValidationError("email taken".to_string()));
        }
        let user = User::from_request(users.len() as i64 + 100, request);
        users.push(user.clone());
        Ok(AuthResponse {
            token: TOKEN.to_string(),
            user,
        })
    }

    async fn logout(&self) -> AppResult<()> {
        self.require_auth().await
    }

    async fn current_user(&self) -> AppResult<User> {
        self.require_auth().await?;
        Ok(self.users.read().await[0].clone())
    }

    async fn levels(&self) -> AppResult<Vec<Level>> {
        let mut levels: Vec<_> = self.levels.read().await.values().cloned().collect();
        levels.sort_by_key(|l| l.order);
        Ok(levels)
    }

    async fn level(&self, level_id: i64) -> AppResult<Level> {
        let level = match self.levels.read().await.get(&level_id) {
            Some(level) => level.clone(),
            None => return Self::not_found("Level", level_id),
        };
        let materials = self.materials(level_id).await?;
        Ok(level.with_materials(materials))
    }

    async fn materials(&self, level_id: i64) -> AppResult<Vec<Material>> {
        let mut materials: Vec<_> = self
            .materials
            .read()
            .await
            .values()
            .filter(|m| m.level_id == level_id)
            .cloned()
            .collect();
        materials.sort_by_key(|m| m.order);
        Ok(materials)
    }

    async fn material(&self, material_id: i64) -> AppResult<Material> {
        match self.materials.read().await.get(&material_id) {
            Some(material) => Ok(material.clone()),
            None => Self::not_found("Material", material_id),
        }
    }

    async fn complete_material(&self, material_id: i64) -> AppResult<MessageResponse> {
        self.require_auth().await?;
        let level_id = self.material(material_id).await?.level_id;
        let mut progress = self.progress.write().await;
        if let Some(row) = progress.get_mut(&level_id) {
            if !row.completed_materials.contains(&material_id) {
                row.completed_materials.push(material_id);
            }
        }
        Ok(MessageResponse::ok("Material completed"))
    }

    async fn quizzes(&self, level_id: i64) -> AppResult<Vec<Quiz>> {
        Ok(self
            .quizzes
            .read()
            .await
            .values()
            .filter(|q| q.level_id == level_id)
            .cloned()
            .collect())
    }

    async fn quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        match self.quizzes.read().await.get(&quiz_id) {
            Some(quiz) => Ok(quiz.clone()),
            None => Self::not_found("Quiz", quiz_id),
        }
    }

    async fn submit_quiz(
        &self,
        quiz_id: i64,
        request: &SubmitAnswersRequest,
    ) -> AppResult<QuizResult> {
        self.require_auth().await?;
        let mut quizzes = self.quizzes.write().await;
        let Some(quiz) = quizzes.get_mut(&quiz_id) else {
            return Self::not_found("Quiz", quiz_id);
        };
        let result = grade_locally(quiz, &request.answers, 7);
        quiz.status = if result.passed {
            QuizStatus::Passed
        } else {
            QuizStatus::Failed
        };
        quiz.user_score = Some(result.score);
        Ok(result)
    }

    async fn progress(&self, level_id: i64) -> AppResult<UserProgress> {
        match self.progress.read().await.get(&level_id) {
            Some(row) => Ok(row.clone()),
            None => Self::not_found("Progress", level_id),
        }
    }

    async fn badges(&self) -> AppResult<Vec<Badge>> {
        Ok(vec![])
    }

    async fn leaderboard(&self, _limit: u32) -> AppResult<Vec<LeaderboardEntry>> {
        Ok(vec![])
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        Ok(AdminStats {
            total_users: self.users.read().await.len() as u64,
            active_users: 1,
            completed_levels: 0,
            average_quiz_score: 0.0,
            total_badges_earned: 0,
        })
    }

    async fn admin_users(&self, params: &PaginationParams) -> AppResult<Paginated<User>> {
        let users = self.users.read().await;
        let start = ((params.page - 1) * params.limit) as usize;
        let data: Vec<_> = users
            .iter()
            .skip(start)
            .take(params.limit as usize)
            .cloned()
            .collect();
        let total = users.len() as u64;
        Ok(Paginated {
            data,
            meta: PageMeta {
                current_page: params.page,
                last_page: total.div_ceil(u64::from(params.limit)).max(1) as u32,
                per_page: params.limit,
                total,
            },
        })
    }

    async fn create_level(&self, request: &CreateLevelRequest) -> AppResult<Level> {
        let mut levels = self.levels.write().await;
        let id = levels.keys().max().copied().unwrap_or(0) + 1;
        let level = Level {
            id,
            name: request.name.clone(),
            order: request.order,
            description: request.description.clone(),
            status: LevelStatus::Locked,
            remark: String::new(),
            materials: None,
            quizzes: None,
        };
        levels.insert(id, level.clone());
        Ok(level)
    }

    async fn update_level(&self, level_id: i64, request: &UpdateLevelRequest) -> AppResult<Level> {
        let mut levels = self.levels.write().await;
        let Some(level) = levels.get_mut(&level_id) else {
            return Self::not_found("Level", level_id);
        };
        if let Some(name) = &request.name {
            level.name = name.clone();
        }
        if let Some(status) = request.status {
            level.status = status;
        }
        Ok(level.clone())
    }

    async fn delete_level(&self, level_id: i64) -> AppResult<MessageResponse> {
        match self.levels.write().await.remove(&level_id) {
            Some(_) => Ok(MessageResponse::ok("Level deleted")),
            None => Self::not_found("Level", level_id),
        }
    }

    async fn create_material(&self, _request: &CreateMaterialRequest) -> AppResult<Material> {
        Err(AppError::Api {
            status: 501,
            message: "not supported".to_string(),
        })
    }

    async fn update_material(
        &self,
        material_id: i64,
        _request: &UpdateMaterialRequest,
    ) -> AppResult<Material> {
        self.material(material_id).await
    }

    async fn delete_material(&self, material_id: i64) -> AppResult<MessageResponse> {
        match self.materials.write().await.remove(&material_id) {
            Some(_) => Ok(MessageResponse::ok("Material deleted")),
            None => Self::not_found("Material", material_id),
        }
    }

    async fn create_quiz(&self, _request: &CreateQuizRequest) -> AppResult<Quiz> {
        Err(AppError::Api {
            status: 501,
            message: "not supported".to_string(),
        })
    }

    async fn update_quiz(&self, quiz_id: i64, _request: &UpdateQuizRequest) -> AppResult<Quiz> {
        self.quiz(quiz_id).await
    }

    async fn delete_quiz(&self, quiz_id: i64) -> AppResult<MessageResponse> {
        match self.quizzes.write().await.remove(&quiz_id) {
            Some(_) => Ok(MessageResponse::ok("Quiz deleted")),
            None => Self::not_found("Quiz", quiz_id),
        }
    }
}

fn config() -> Config {
    Config {
        api_base_url: "http://in-memory.test/api".to_string(),
        request_timeout_secs: 1,
        leaderboard_limit: 5,
        admin_page_size: 10,
        api_token: None,
    }
}

fn state() -> AppState {
    let session = Arc::new(AuthSession::new());
    let api = Arc::new(InMemoryApi::seeded(session.clone()));
    AppState::with_api(api, session, config(), Notifier::silent())
}

async fn sign_in(state: &AppState) {
    state
        .auth_service
        .login(&LoginRequest {
            email: "ayu@example.com".to_string(),
            password: "password".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reading_a_level_to_completion() {
    let state = state();
    sign_in(&state).await;

    let mut workspace = state.learning_service.level_workspace(10).await;
    assert_eq!(workspace.percentage(), 0);
    assert_eq!(workspace.active_material().unwrap().id, 101);

    let ids: Vec<i64> = workspace.materials.iter().map(|m| m.id).collect();
    for id in &ids {
        assert!(state.learning_service.complete_material(&mut workspace, *id).await);
    }
    assert!(!state.learning_service.complete_material(&mut workspace, ids[0]).await);

    assert_eq!(workspace.percentage(), 100);
    // the server kept the same set
    let reloaded = state.learning_service.level_workspace(10).await;
    assert_eq!(reloaded.percentage(), 100);
    // completion never changes the level status locally
    assert_eq!(
        state.learning_service.level(10).await.status,
        LevelStatus::Ongoing
    );
}

#[tokio::test]
async fn test_taking_a_quiz_end_to_end() {
    let state = state();
    sign_in(&state).await;

    let quiz = state.learning_service.quiz(50).await;
    let keys: Vec<(i64, Answer)> = quiz
        .questions
        .iter()
        .map(|q| (q.id, q.correct_answer.clone()))
        .collect();

    let mut session = QuizSession::new(quiz);
    session.start().unwrap();
    for (question_id, answer) in keys {
        session.answer(question_id, answer).unwrap();
        session.next();
    }
    assert!(session.can_submit());

    let grader: &dyn QuizGrader = &*state.learning_service;
    let result = session.submit(grader, false).await.unwrap();

    assert_eq!(result.score, 100);
    assert!(result.passed);
    assert_eq!(session.phase(), QuizPhase::Completed);
    assert!(!session.can_retry());
    assert_eq!(
        state.learning_service.quiz(50).await.status,
        QuizStatus::Passed
    );
}

#[tokio::test(start_paused = true)]
async fn test_timer_auto_submits_through_the_service() {
    let state = state();
    sign_in(&state).await;

    let mut quiz = state.learning_service.quiz(50).await;
    quiz.time_limit = 1;
    let first = quiz.questions[0].clone();
    let session = Arc::new(Mutex::new(QuizSession::new(quiz)));
    {
        let mut guard = session.lock().await;
        guard.start().unwrap();
        guard.answer(first.id, first.correct_answer.clone()).unwrap();
    }

    let grader: Arc<dyn QuizGrader> = state.learning_service.clone();
    let outcome = structopia::quiz::run_countdown(session.clone(), grader).await;

    match outcome {
        structopia::quiz::TimerOutcome::AutoSubmitted(Ok(result)) => {
            assert_eq!(result.answers.len(), 1);
            assert!(!result.passed);
        }
        other => panic!("expected an auto-submit, got {:?}", other),
    }
    assert!(session.lock().await.can_retry());
}

#[tokio::test]
async fn test_submit_without_session_fails_for_server_only_quiz() {
    let state = state();

    // quiz 50 only exists on the server, so there is nothing to fall back on
    let result = state.learning_service.submit_quiz(50, vec![]).await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_admin_level_lifecycle() {
    let state = state();

    let created = state
        .admin_service
        .create_level(&CreateLevelRequest {
            name: "Queues".to_string(),
            order: 2,
            description: "FIFO".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.status, LevelStatus::Locked);

    let updated = state
        .admin_service
        .update_level(
            created.id,
            &UpdateLevelRequest {
                status: Some(LevelStatus::Unlocked),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.status.is_accessible());
    assert_eq!(state.learning_service.levels().await.len(), 2);

    state.admin_service.delete_level(created.id).await.unwrap();
    let missing = state.admin_service.delete_level(created.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_register_then_page_through_users() {
    let state = state();

    let user = state
        .auth_service
        .register(&RegisterRequest {
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            password: "secret123".to_string(),
            role: Role::Student,
        })
        .await
        .unwrap();
    assert_eq!(user.email, "budi@example.com");
    assert!(state.session.is_authenticated().await);

    let page = state
        .admin_service
        .users(&PaginationParams { page: 2, limit: 1 })
        .await
        .unwrap();
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.meta.last_page, 2);
    assert_eq!(page.data[0].name, "Budi");
}

#[tokio::test]
async fn test_logout_then_rehydrate() {
    let state = state();
    sign_in(&state).await;

    state.auth_service.logout().await;
    assert!(!state.session.is_authenticated().await);

    let stale = state
        .auth_service
        .rehydrate(secrecy::SecretString::from("stale".to_string()))
        .await;
    assert!(stale.is_none());

    let user = state
        .auth_service
        .rehydrate(secrecy::SecretString::from(TOKEN.to_string()))
        .await
        .unwrap();
    assert_eq!(user.id, 7);
}
