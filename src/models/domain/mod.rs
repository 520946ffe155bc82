pub mod badge;
pub mod level;
pub mod material;
pub mod progress;
pub mod quiz;
pub mod quiz_question;
pub mod quiz_result;
pub mod user;
pub use badge::{Badge, LeaderboardEntry};
pub use level::{Level, LevelStatus};
pub use material::{Material, MaterialStatus, MaterialType};
pub use progress::{ProgressStatus, UserProgress};
pub use quiz::{Quiz, QuizStatus};
pub use quiz_question::{Answer, Question, QuestionOption, QuestionType};
pub use quiz_result::{GradedAnswer, QuizResult};
pub use user::{AdminStats, Role, User};
