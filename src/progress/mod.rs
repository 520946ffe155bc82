//! Level progress aggregation.
//!
//! Level status (`locked`, `unlocked`, `ongoing`, `completed`) is owned by the
//! server. Nothing here unlocks a level or marks one complete; it only keeps the
//! local completed-material and completed-quiz sets and the percentage derived
//! from them in step with what the student just did.

pub mod workspace;

use std::collections::HashSet;

use crate::models::domain::{
    Badge, Level, LevelStatus, Material, MaterialStatus, Quiz, QuizStatus, UserProgress,
};

pub use workspace::LevelWorkspace;

/// `round(|completed ∩ level materials| / |level materials| × 100)`.
///
/// Ids in `completed` that do not belong to the level are ignored. A level
/// without materials is at 0%.
pub fn progress_percentage(completed: &[i64], materials: &[Material]) -> u32 {
    if materials.is_empty() {
        return 0;
    }

    let done: HashSet<i64> = completed.iter().copied().collect();
    let hits = materials.iter().filter(|m| done.contains(&m.id)).count();

    ((hits as f64 / materials.len() as f64) * 100.0).round() as u32
}

/// Adds `material_id` to the completed set and recomputes the percentage.
///
/// Returns `false` when the id was already present; the set never holds
/// duplicates.
pub fn mark_material_complete(
    progress: &mut UserProgress,
    material_id: i64,
    materials: &[Material],
) -> bool {
    let inserted = if progress.completed_materials.contains(&material_id) {
        false
    } else {
        progress.completed_materials.push(material_id);
        true
    };

    progress.progress_percentage = progress_percentage(&progress.completed_materials, materials);
    inserted
}

/// Only passed quizzes enter the completed set.
pub fn record_quiz_outcome(progress: &mut UserProgress, quiz_id: i64, passed: bool) -> bool {
    if !passed || progress.completed_quizzes.contains(&quiz_id) {
        return false;
    }
    progress.completed_quizzes.push(quiz_id);
    true
}

/// First material being read, else the first unread one, else the first.
pub fn focus_material(materials: &[Material]) -> usize {
    materials
        .iter()
        .position(|m| m.status == MaterialStatus::Reading)
        .or_else(|| {
            materials
                .iter()
                .position(|m| m.status == MaterialStatus::Unread)
        })
        .unwrap_or(0)
}

/// First unattempted quiz, else the first.
pub fn focus_quiz(quizzes: &[Quiz]) -> usize {
    quizzes
        .iter()
        .position(|q| q.status == QuizStatus::Unattempted)
        .unwrap_or(0)
}

/// Earned badges first, then the rest, each in their original order.
pub fn partition_badges(badges: &[Badge]) -> (Vec<&Badge>, Vec<&Badge>) {
    badges.iter().partition(|b| b.is_earned())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_levels: usize,
    pub accessible_levels: usize,
    pub completed_levels: usize,
    pub locked_levels: usize,
    pub earned_badges: usize,
    pub total_badges: usize,
}

impl DashboardSummary {
    /// Accessible counts `unlocked` and `ongoing`; completed levels are counted
    /// on their own.
    pub fn from_parts(levels: &[Level], badges: &[Badge]) -> Self {
        let count = |status: LevelStatus| levels.iter().filter(|l| l.status == status).count();

        Self {
            total_levels: levels.len(),
            accessible_levels: count(LevelStatus::Unlocked) + count(LevelStatus::Ongoing),
            completed_levels: count(LevelStatus::Completed),
            locked_levels: count(LevelStatus::Locked),
            earned_badges: badges.iter().filter(|b| b.is_earned()).count(),
            total_badges: badges.len(),
        }
    }
}
