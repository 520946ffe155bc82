pub mod admin_service;
pub mod auth_service;
pub mod demo_data;
pub mod fallback;
pub mod learning_service;
pub mod notice;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use learning_service::{Dashboard, LearningService};
pub use notice::{Notice, NoticeLevel, Notifier};
