use crate::models::domain::{Material, MaterialStatus, Quiz, QuizStatus, UserProgress};
use crate::progress::{focus_material, focus_quiz, mark_material_complete, record_quiz_outcome};

/// Everything the student works with inside one level, kept in memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelWorkspace {
    pub level_id: i64,
    pub materials: Vec<Material>,
    pub quizzes: Vec<Quiz>,
    pub progress: UserProgress,
    active_material: usize,
    active_quiz: usize,
}

impl LevelWorkspace {
    pub fn new(
        level_id: i64,
        materials: Vec<Material>,
        quizzes: Vec<Quiz>,
        progress: UserProgress,
    ) -> Self {
        let active_material = focus_material(&materials);
        let active_quiz = focus_quiz(&quizzes);
        Self {
            level_id,
            materials,
            quizzes,
            progress,
            active_material,
            active_quiz,
        }
    }

    pub fn percentage(&self) -> u32 {
        self.progress.progress_percentage
    }

    pub fn active_material(&self) -> Option<&Material> {
        self.materials.get(self.active_material)
    }

    pub fn active_material_index(&self) -> usize {
        self.active_material
    }

    pub fn active_quiz(&self) -> Option<&Quiz> {
        self.quizzes.get(self.active_quiz)
    }

    pub fn select_material(&mut self, index: usize) -> bool {
        if index < self.materials.len() {
            self.active_material = index;
            true
        } else {
            false
        }
    }

    pub fn select_quiz(&mut self, index: usize) -> bool {
        if index < self.quizzes.len() {
            self.active_quiz = index;
            true
        } else {
            false
        }
    }

    pub fn next_material(&mut self) -> bool {
        self.select_material(self.active_material + 1)
    }

    /// Applies a confirmed completion locally and moves on to the next material.
    /// Returns whether the completed set grew.
    pub fn complete_material(&mut self, material_id: i64) -> bool {
        if let Some(material) = self.materials.iter_mut().find(|m| m.id == material_id) {
            material.status = MaterialStatus::Completed;
        }

        let inserted = mark_material_complete(&mut self.progress, material_id, &self.materials);
        self.next_material();
        inserted
    }

    pub fn record_quiz_result(&mut self, quiz_id: i64, passed: bool, score: u32) {
        if let Some(quiz) = self.quizzes.iter_mut().find(|q| q.id == quiz_id) {
            quiz.status = if passed {
                QuizStatus::Passed
            } else {
                QuizStatus::Failed
            };
            quiz.user_score = Some(score);
        }

        record_quiz_outcome(&mut self.progress, quiz_id, passed);
    }
}
