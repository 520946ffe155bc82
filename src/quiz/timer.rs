use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::errors::AppResult;
use crate::models::domain::QuizResult;
use crate::quiz::session::{submit_shared, QuizSession, Tick};
use crate::quiz::QuizGrader;

#[derive(Debug)]
pub enum TimerOutcome {
    /// The session left `InProgress` before time ran out.
    Stopped,
    /// Time ran out and the answers were force-submitted.
    AutoSubmitted(AppResult<QuizResult>),
}

/// Drives the session clock once per second until it stops running or expires.
///
/// On expiry the session is submitted with `force`, so partially answered
/// attempts still get graded. A failed auto-submit leaves the session
/// `InProgress` with the clock at zero.
pub async fn run_countdown(
    session: Arc<Mutex<QuizSession>>,
    grader: Arc<dyn QuizGrader>,
) -> TimerOutcome {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        let (tick, quiz_id) = {
            let mut guard = session.lock().await;
            (guard.tick(), guard.quiz().id)
        };
        match tick {
            Tick::Running(_) => continue,
            Tick::Idle => return TimerOutcome::Stopped,
            Tick::Expired => {
                log::info!("Auto-submitting quiz {}", quiz_id);
                let result = submit_shared(&session, grader.as_ref(), true).await;
                if let Err(err) = &result {
                    log::warn!("Auto-submit of quiz {} failed: {}", quiz_id, err);
                }
                return TimerOutcome::AutoSubmitted(result);
            }
        }
    }
}

pub fn spawn_countdown(
    session: Arc<Mutex<QuizSession>>,
    grader: Arc<dyn QuizGrader>,
) -> JoinHandle<TimerOutcome> {
    tokio::spawn(run_countdown(session, grader))
}
