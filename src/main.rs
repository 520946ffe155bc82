use std::sync::Arc;

use log::{error, info};
use tokio::sync::Mutex;

use structopia::{
    app_state::AppState,
    config::Config,
    errors::AppResult,
    models::domain::Level,
    quiz::{spawn_countdown, submit_shared, QuizGrader, QuizSession},
    services::{Notice, NoticeLevel, Notifier},
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        error!("structopia exited with an error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let config = Config::from_env();
    config.validate()?;
    info!("Using API at {}", config.api_base_url);

    let (notifier, mut notices) = Notifier::channel();
    tokio::spawn(async move {
        while let Some(Notice { level, title, description }) = notices.recv().await {
            match level {
                NoticeLevel::Info => println!("[i] {}: {}", title, description),
                NoticeLevel::Destructive => println!("[!] {}: {}", title, description),
            }
        }
    });

    let limit = config.leaderboard_limit;
    let state = AppState::new(config, notifier)?;

    let dashboard = state.learning_service.dashboard(limit).await;
    let summary = dashboard.summary;
    println!(
        "Levels: {} total, {} accessible, {} completed, {} locked",
        summary.total_levels, summary.accessible_levels, summary.completed_levels, summary.locked_levels
    );
    println!(
        "Badges: {}/{} earned",
        summary.earned_badges, summary.total_badges
    );
    for entry in dashboard.leaderboard.iter().take(3) {
        println!("  #{} {} ({} XP)", entry.rank, entry.user_name, entry.xp);
    }

    let Some(level) = dashboard.levels.iter().find(|l| l.status.is_accessible()) else {
        info!("No accessible level, nothing to practise");
        return Ok(());
    };

    run_first_open_quiz(&state, level).await
}

/// Takes the first open quiz of `level` with its answer key and prints the review.
async fn run_first_open_quiz(state: &AppState, level: &Level) -> AppResult<()> {
    let workspace = state.learning_service.level_workspace(level.id).await;
    println!(
        "{}: {}% complete, {} material(s), {} quiz(zes)",
        level.name,
        workspace.percentage(),
        workspace.materials.len(),
        workspace.quizzes.len()
    );

    let Some(quiz) = workspace.quizzes.iter().find(|q| q.is_open()).cloned() else {
        info!("Every quiz in {} is already done", level.name);
        return Ok(());
    };

    let keys: Vec<_> = quiz
        .questions
        .iter()
        .map(|q| (q.id, q.correct_answer.clone()))
        .collect();
    let session = Arc::new(Mutex::new(QuizSession::new(quiz)));
    session.lock().await.start()?;

    let grader: Arc<dyn QuizGrader> = state.learning_service.clone();
    let countdown = spawn_countdown(session.clone(), grader.clone());

    {
        let mut guard = session.lock().await;
        for (question_id, answer) in keys {
            guard.answer(question_id, answer)?;
            guard.next();
        }
    }

    let result = submit_shared(&session, grader.as_ref(), false).await?;
    let guard = session.lock().await;
    println!(
        "{}: scored {} ({})",
        guard.quiz().title,
        result.score,
        if result.passed { "passed" } else { "failed" }
    );
    for review in guard.review() {
        let mark = if review.is_correct { "ok" } else { "x" };
        println!("  [{}] {} -> {}", mark, review.prompt, review.user_answer);
    }
    drop(guard);

    // the countdown sees the completed session on its next tick and stops
    if let Ok(outcome) = countdown.await {
        log::debug!("Countdown finished: {:?}", outcome);
    }
    Ok(())
}
